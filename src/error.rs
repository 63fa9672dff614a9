use thiserror::Error;

/// Failures reported by the sim channel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    /// The sim isn't running or refused the session.
    #[error("unable to open a session with the sim: {0}")]
    Open(String),
    #[error("{call} failed: {reason}")]
    Call { call: &'static str, reason: String },
}

impl ChannelError {
    pub fn call(call: &'static str, reason: impl Into<String>) -> Self {
        Self::Call { call, reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("payload holds {0} bytes, a heading needs 8")]
    ShortPayload(usize),
}

/// A panel command that isn't a known intent.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown command '{0}'")]
pub struct UnknownIntent(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("application name must not be empty")]
    EmptyAppName,
}
