use crate::game::{Action, GameState};

/// 线上消息
///
/// 主机与副本之间的全部通信都走这一个信封：副本只会发 `join` 和
/// `action`，主机只会发 `welcome`、`room_full` 和 `state_update`。
/// 状态同步始终是整体快照，没有增量补丁
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// 副本请求入座
    Join { name: String },
    /// 入座成功，告知座位号并附上当前快照
    Welcome { seat: u8, state: GameState },
    /// 房间已满，拒绝入座
    RoomFull,
    /// 状态快照广播（任何变更之后）
    StateUpdate { state: GameState },
    /// 副本提交的玩法意图
    Action { action: Action },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_string(&Message::Join {
            name: "阿福".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"join","name":"阿福"}"#);

        let json = serde_json::to_string(&Message::RoomFull).unwrap();
        assert_eq!(json, r#"{"type":"room_full"}"#);

        let msg: Message = serde_json::from_str(
            r#"{"type":"action","action":{"kind":"discard","tile":{"dot":5}}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Message::Action {
                action: Action::Discard { tile: Tile::Dot(5) }
            }
        );
    }

    #[test]
    fn test_snapshot_message_roundtrip() {
        let msg = Message::StateUpdate {
            state: GameState::new(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
