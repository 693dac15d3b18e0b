use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),
    #[error("Malformed payload for command {command:?}: {reason}")]
    MalformedPayload { command: String, reason: String },
    #[error("Malformed message: {0}")]
    Malformed(String),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;
