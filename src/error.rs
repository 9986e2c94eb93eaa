use thiserror::Error;

/// Errors surfaced by the kernel and its import/export helpers.
///
/// Physically expected boundaries (propellant depletion, ground contact,
/// reaching the end time) are never errors; they are clamped silently.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
