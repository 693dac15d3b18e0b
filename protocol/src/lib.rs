//! Messages exchanged between the members of a shared flip game.
//!
//! Every message travels as an envelope `{"command": <tag>, "payload": <value>}`. The channel carrying them is
//! assumed to be reliable and ordered; nothing here deals with delivery.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::*;

mod error;

/// Flat index of a cell, `x + y * edge`.
pub type CellIndex = u16;

/// Raw cell value as it appears on the wire, expected to be `0` or `1`.
pub type CellValue = u8;

/// Untyped form of a message, as it is framed on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub command: String,
    pub payload: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Envelope", try_from = "Envelope")]
pub enum PeerMessage {
    /// Full grid and move history of a game the leader just started.
    NewGame {
        dot_list: Vec<CellValue>,
        move_list: Vec<CellIndex>,
    },
    /// A cell some peer clicked.
    DotClick(CellIndex),
}

impl PeerMessage {
    pub const NEW_GAME: &'static str = "n";
    pub const DOT_CLICK: &'static str = "p";

    pub const fn command(&self) -> &'static str {
        match self {
            Self::NewGame { .. } => Self::NEW_GAME,
            Self::DotClick(_) => Self::DOT_CLICK,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let envelope = Envelope::from(self.clone());
        // an envelope only holds strings and integers, serializing it cannot fail
        serde_json::to_vec(&envelope).unwrap_or_default()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_slice(bytes).map_err(|err| ProtocolError::Malformed(err.to_string()))?;
        Self::try_from(envelope)
    }
}

impl From<PeerMessage> for Envelope {
    fn from(message: PeerMessage) -> Self {
        let command = message.command().to_owned();
        let payload = match message {
            PeerMessage::NewGame {
                dot_list,
                move_list,
            } => Value::Array(vec![Value::from(dot_list), Value::from(move_list)]),
            PeerMessage::DotClick(index) => Value::from(index),
        };
        Self { command, payload }
    }
}

impl TryFrom<Envelope> for PeerMessage {
    type Error = ProtocolError;

    fn try_from(Envelope { command, payload }: Envelope) -> Result<Self> {
        let malformed = |err: serde_json::Error| ProtocolError::MalformedPayload {
            command: command.clone(),
            reason: err.to_string(),
        };

        match command.as_str() {
            Self::NEW_GAME => {
                let (dot_list, move_list) = serde_json::from_value(payload).map_err(malformed)?;
                Ok(Self::NewGame {
                    dot_list,
                    move_list,
                })
            }
            Self::DOT_CLICK => Ok(Self::DotClick(
                serde_json::from_value(payload).map_err(malformed)?,
            )),
            _ => {
                log::warn!("Dropping message with unknown command {:?}", command);
                Err(ProtocolError::UnknownCommand(command))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_uses_list_pair_payload() {
        let message = PeerMessage::NewGame {
            dot_list: vec![0, 1, 1, 0],
            move_list: vec![3, 0],
        };

        let encoded = String::from_utf8(message.encode()).unwrap();

        assert_eq!(encoded, r#"{"command":"n","payload":[[0,1,1,0],[3,0]]}"#);
    }

    #[test]
    fn dot_click_uses_bare_index_payload() {
        let encoded = String::from_utf8(PeerMessage::DotClick(12).encode()).unwrap();

        assert_eq!(encoded, r#"{"command":"p","payload":12}"#);
    }

    #[test]
    fn decode_reads_both_commands() {
        let new_game = PeerMessage::decode(br#"{"command":"n","payload":[[1,0,0,1],[]]}"#).unwrap();
        let click = PeerMessage::decode(br#"{"payload":5,"command":"p"}"#).unwrap();

        assert_eq!(
            new_game,
            PeerMessage::NewGame {
                dot_list: vec![1, 0, 0, 1],
                move_list: vec![],
            }
        );
        assert_eq!(click, PeerMessage::DotClick(5));
    }

    #[test]
    fn decode_rejects_unknown_command() {
        let err = PeerMessage::decode(br#"{"command":"x","payload":null}"#).unwrap_err();

        assert_eq!(err, ProtocolError::UnknownCommand("x".to_owned()));
    }

    #[test]
    fn decode_rejects_negative_click_index() {
        let err = PeerMessage::decode(br#"{"command":"p","payload":-1}"#).unwrap_err();

        assert!(matches!(err, ProtocolError::MalformedPayload { command, .. } if command == "p"));
    }

    #[test]
    fn decode_rejects_non_envelope() {
        assert!(matches!(
            PeerMessage::decode(b"[1, 2, 3]"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            PeerMessage::decode(b"not json"),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn serde_goes_through_envelope() {
        let value = serde_json::to_value(PeerMessage::DotClick(7)).unwrap();

        assert_eq!(value, serde_json::json!({"command": "p", "payload": 7}));
        assert_eq!(
            serde_json::from_value::<PeerMessage>(value).unwrap(),
            PeerMessage::DotClick(7)
        );
    }
}
