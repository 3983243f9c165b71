use thiserror::Error;

/// Failure of a gateway call.
///
/// Transport, status, parse and empty-catalog failures all end up here and are not
/// told apart; the message is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", display_message(.message))]
pub struct GatewayError {
    message: Option<String>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// An error with no underlying message.
    pub fn empty() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        // alternate form keeps the context chain on one line
        Self::new(format!("{err:#}"))
    }
}

fn display_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("fetch failed")
}

pub type GatewayResult<T> = Result<T, GatewayError>;
