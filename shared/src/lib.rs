//! Wire protocol shared between the relay server and its clients.
//!
//! Frames are JSON text messages over a persistent WebSocket, tagged by a
//! `"type"` field. The server never interprets positions beyond relaying
//! them; clients own their reported coordinates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Port the relay listens on when none is supplied.
pub const DEFAULT_PORT: u16 = 8080;

/// Length of a session identifier in characters.
pub const SESSION_ID_LEN: usize = 7;

/// Alphabet session identifiers are drawn from (36^7 combinations).
pub const SESSION_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A 2D coordinate as reported by a client. The relay treats it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// One session's entry in a `players` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: String,
    pub position: Position,
}

impl PlayerEntry {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Frames the server sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Assigns the session its unique identifier. First frame on every
    /// connection.
    Init { id: String },
    /// Snapshot of every other session at connect time, keyed by id. Second
    /// frame on every connection; never contains the receiver itself.
    Players {
        players: HashMap<String, PlayerEntry>,
    },
    /// A new session connected.
    Join { id: String, x: f32, y: f32 },
    /// A session's position changed.
    Update { id: String, x: f32, y: f32 },
    /// A session disconnected.
    Leave { id: String },
}

/// Frames clients send to the server. `update` is the only recognized kind;
/// anything else fails to decode and is dropped by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Update { id: String, x: f32, y: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_init_wire_shape() {
        let msg = ServerMessage::Init {
            id: "abc1234".to_string(),
        };
        let value: Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({ "type": "init", "id": "abc1234" }));
    }

    #[test]
    fn test_players_wire_shape() {
        let mut players = HashMap::new();
        players.insert(
            "abc1234".to_string(),
            PlayerEntry::new("abc1234", Position { x: 3.0, y: 4.0 }),
        );
        let msg = ServerMessage::Players { players };
        let value: Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "players",
                "players": {
                    "abc1234": { "id": "abc1234", "position": { "x": 3.0, "y": 4.0 } }
                }
            })
        );
    }

    #[test]
    fn test_join_update_leave_wire_shape() {
        let join = ServerMessage::Join {
            id: "a".to_string(),
            x: 1.0,
            y: 2.0,
        };
        assert_eq!(
            serde_json::to_value(&join).unwrap(),
            json!({ "type": "join", "id": "a", "x": 1.0, "y": 2.0 })
        );

        let update = ServerMessage::Update {
            id: "a".to_string(),
            x: 5.0,
            y: 7.0,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "update", "id": "a", "x": 5.0, "y": 7.0 })
        );

        let leave = ServerMessage::Leave {
            id: "a".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&leave).unwrap(),
            json!({ "type": "leave", "id": "a" })
        );
    }

    #[test]
    fn test_client_update_decode() {
        let frame = r#"{"type":"update","id":"abc1234","x":5,"y":7}"#;
        let msg: ClientMessage = serde_json::from_str(frame).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Update {
                id: "abc1234".to_string(),
                x: 5.0,
                y: 7.0,
            }
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let frame = r#"{"type":"teleport","id":"abc1234","x":5,"y":7}"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let frame = r#"{"type":"update","id":"abc1234"}"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());

        let frame = r#"{"id":"abc1234","x":1,"y":2}"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
        assert!(serde_json::from_str::<ClientMessage>("").is_err());
    }

    #[test]
    fn test_position_defaults_to_origin() {
        let position = Position::default();
        assert_eq!(position.x, 0.0);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn test_server_message_roundtrip() {
        let messages = vec![
            ServerMessage::Init {
                id: "q1w2e3r".to_string(),
            },
            ServerMessage::Join {
                id: "q1w2e3r".to_string(),
                x: 0.0,
                y: 0.0,
            },
            ServerMessage::Update {
                id: "q1w2e3r".to_string(),
                x: -12.5,
                y: 640.0,
            },
            ServerMessage::Leave {
                id: "q1w2e3r".to_string(),
            },
        ];

        for msg in messages {
            let encoded = serde_json::to_string(&msg).unwrap();
            let decoded: ServerMessage = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn test_id_alphabet_space() {
        assert_eq!(SESSION_ID_ALPHABET.len(), 36);
        assert_eq!(SESSION_ID_LEN, 7);
    }
}
