use std::fmt;

/// Why a lookup stage failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Rejected before any request was issued.
    Validation(String),
    /// The endpoint answered with a non-success status.
    Http { status: u16, message: String },
    /// Network, read or decode failure. `detail` is for logs, not for users.
    Transport { detail: String },
}

impl LookupError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }

    /// Text safe to show to the user.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::Http { message, .. } => message,
            Self::Transport { .. } => "fetch error (see logs)",
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            Self::Transport { detail } => write!(f, "transport error: {detail}"),
        }
    }
}

impl std::error::Error for LookupError {}
