// src/error.rs

use thiserror::Error;

/// Fixed diagnostic for an annotated header cell that fits neither grammar.
pub const MALFORMED_HEADER: &str = "Error parsing response - CSV header not properly formatted";

/// Everything that can go wrong while reading a manifest.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The server answered, but not with a success status.
    #[error("transport failure: {status} {message}")]
    Transport { status: u16, message: String },

    #[error("{}", MALFORMED_HEADER)]
    MalformedHeader,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("manifest has no header line")]
    Empty,
}

impl ReadError {
    /// HTTP status attached to the failure, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReadError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_header_uses_fixed_message() {
        assert_eq!(ReadError::MalformedHeader.to_string(), MALFORMED_HEADER);
        assert_eq!(ReadError::MalformedHeader.status(), None);
    }

    #[test]
    fn transport_carries_status() {
        let err = ReadError::Transport {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "transport failure: 404 Not Found");
    }
}
