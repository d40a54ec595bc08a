//! 可执行文件入口：四个机器人打一局，打印结算（用于测试和调试）

use xuezhan_host::host::{HostRoom, Message, Publisher};
use xuezhan_host::Phase;

/// 机器人局没有副本，消息直接丢弃
struct NoReplicas;

impl Publisher for NoReplicas {
    fn publish(&mut self, _identity: &str, _message: &Message) {}
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("血战到底主机引擎演示");

    let mut room = HostRoom::new(42, 0, NoReplicas);
    room.start_game();

    let mut ticks = 0u32;
    while room.state().phase != Phase::RoundEnd && ticks < 10_000 {
        room.tick();
        ticks += 1;
    }

    let state = room.state();
    println!(
        "第 {} 局结束（{} 个 tick，结束原因：{:?}）",
        state.round, ticks, state.end_reason
    );

    println!("结算：");
    for entry in &state.results {
        println!("  {}：{}", entry.name, entry.description);
    }

    println!("积分：");
    for seat in &state.seats {
        let que = seat
            .forbidden_suit
            .map(|s| s.display_name())
            .unwrap_or("未定");
        println!("  {}（缺{}）：{} 分", seat.name, que, seat.score);
    }
}
