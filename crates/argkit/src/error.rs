use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("option declares no aliases")]
    NoAliases,

    #[error("alias conflict: '{0}' is already registered")]
    DuplicateAlias(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("option '{0}' has no value")]
    NoValue(String),

    #[error("invalid value '{value}' for '{option}': {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ArgError>;
