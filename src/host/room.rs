use crate::game::{Action, Applied, GameEngine, GameState, Phase, REACTION_WINDOW_TICKS, SEAT_COUNT};
use crate::host::bot;
use crate::host::message::Message;
use std::collections::VecDeque;
use tracing::{debug, info};

/// 消息出口
///
/// 主机只管往身份标识投递，底下是什么传输（点对点信道、
/// 内存管道、测试记录器）由实现决定
pub trait Publisher {
    fn publish(&mut self, identity: &str, message: &Message);
}

/// 串行队列里的一条待处理事件
#[derive(Debug)]
enum Intent {
    /// 参与者意图
    Action { identity: String, action: Action },
    /// 响应窗口超时（带窗口打开时的步号）
    WindowTimeout { step: u64 },
}

/// 响应窗口计时器
///
/// 以 tick 为单位倒数，归零时向队列投递一条超时事件。
/// `step` 锚定窗口：窗口被显式裁决后步号前进，超时自然作废
struct WindowTimer {
    step: u64,
    remaining: u64,
}

/// 主机房间
///
/// 引擎外面的那层壳：维护副本名单、把网络消息与机器人决策
/// 汇入同一条先进先出队列，逐条送进引擎，每次状态变更后把
/// 完整快照广播给所有副本。队列保证并发到达的意图也串行生效
pub struct HostRoom<P: Publisher> {
    engine: GameEngine,
    publisher: P,
    /// 需要接收广播的副本身份
    recipients: Vec<String>,
    /// 凑齐多少真人后自动开局（其余座位补机器人）
    expected_humans: usize,
    queue: VecDeque<Intent>,
    window_timer: Option<WindowTimer>,
}

impl<P: Publisher> HostRoom<P> {
    pub fn new(seed: u64, expected_humans: usize, publisher: P) -> Self {
        Self {
            engine: GameEngine::new(seed),
            publisher,
            recipients: Vec::new(),
            expected_humans,
            queue: VecDeque::new(),
            window_timer: None,
        }
    }

    /// 当前权威快照
    pub fn state(&self) -> &GameState {
        &self.engine.state
    }

    /// 处理一条来自副本的消息
    pub fn handle_message(&mut self, identity: &str, message: Message) {
        match message {
            Message::Join { name } => self.handle_join(identity, &name),
            Message::Action { action } => {
                self.queue.push_back(Intent::Action {
                    identity: identity.to_string(),
                    action,
                });
                self.drain();
            }
            // 其余消息只会由主机发出
            _ => debug!(identity, "unexpected message direction ignored"),
        }
    }

    /// 入座请求：成功则回 welcome 并广播，满员或已开局回 room_full
    pub fn handle_join(&mut self, identity: &str, name: &str) {
        match self.engine.add_seat(identity, name, false) {
            Ok(seat) => {
                info!(identity, seat, "participant joined");
                self.recipients.push(identity.to_string());
                self.publisher.publish(
                    identity,
                    &Message::Welcome {
                        seat,
                        state: self.engine.state.clone(),
                    },
                );
                self.broadcast_state();

                let humans = self
                    .engine
                    .state
                    .seats
                    .iter()
                    .filter(|s| !s.is_bot)
                    .count();
                if self.expected_humans > 0 && humans >= self.expected_humans {
                    self.start_game();
                }
            }
            Err(reason) => {
                debug!(identity, %reason, "join rejected");
                self.publisher.publish(identity, &Message::RoomFull);
            }
        }
    }

    /// 副本断开：不支持重连，人走光后整场终止
    pub fn handle_disconnect(&mut self, identity: &str) {
        self.recipients.retain(|r| r != identity);
        info!(identity, "participant disconnected");
        if self.recipients.is_empty() && self.engine.state.phase != Phase::Lobby {
            self.engine.end_game();
        }
    }

    /// 空位补机器人并开局
    pub fn start_game(&mut self) {
        while self.engine.state.seats.len() < SEAT_COUNT {
            let n = self.engine.state.seats.len();
            if self
                .engine
                .add_seat(format!("bot-{n}"), format!("电脑 {}", n + 1), true)
                .is_err()
            {
                break;
            }
        }
        if self.engine.start_game() == Applied::Mutated {
            self.sync_timer();
            self.broadcast_state();
        }
    }

    /// 时间步进：计时器倒数、机器人轮询、排空队列
    ///
    /// 由宿主以固定节奏调用（真实部署一秒一次，测试里想快就快）
    pub fn tick(&mut self) {
        if let Some(timer) = &mut self.window_timer {
            timer.remaining -= 1;
            if timer.remaining == 0 {
                let step = timer.step;
                self.window_timer = None;
                self.queue.push_back(Intent::WindowTimeout { step });
            }
        }

        for (identity, action) in bot::poll(&self.engine.state) {
            self.queue.push_back(Intent::Action { identity, action });
        }

        self.drain();
    }

    /// 逐条送进引擎，每次生效后同步计时器并广播快照
    fn drain(&mut self) {
        while let Some(intent) = self.queue.pop_front() {
            let applied = match intent {
                Intent::Action { identity, action } => {
                    self.engine.submit_action(&identity, &action)
                }
                Intent::WindowTimeout { step } => self.engine.window_timeout(step),
            };
            if applied == Applied::Mutated {
                self.sync_timer();
                self.broadcast_state();
            }
        }
    }

    /// 让计时器跟上引擎：窗口刚打开就起一个新倒数，窗口关了就撤掉
    fn sync_timer(&mut self) {
        if self.engine.state.window_open {
            let step = self.engine.state.step;
            let fresh = self.window_timer.as_ref().map_or(true, |t| t.step != step);
            if fresh {
                self.window_timer = Some(WindowTimer {
                    step,
                    remaining: REACTION_WINDOW_TICKS,
                });
            }
        } else {
            self.window_timer = None;
        }
    }

    fn broadcast_state(&mut self) {
        let message = Message::StateUpdate {
            state: self.engine.state.clone(),
        };
        for identity in &self.recipients {
            self.publisher.publish(identity, &message);
        }
    }
}
