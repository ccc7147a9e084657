//! Unified error handling for slirc-client.
//!
//! Dispatch errors never leave the session: the registry logs and drops
//! them. Session errors are returned to the command layer, which shows them
//! in the originating window.

use crate::state::WindowId;
use crate::transport::TransportError;
use thiserror::Error;

// ============================================================================
// Handler Errors (inbound event processing)
// ============================================================================

/// Errors a dispatch handler can report about one inbound event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// Event is missing parameters the handler needs.
    #[error("not enough parameters")]
    NeedMoreParams,

    /// Event targets a channel this session has no window for.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Event target is neither a channel nor the local nickname.
    #[error("unsupported target: {0}")]
    UnsupportedTarget(String),

    /// A numeric field failed to parse.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl HandlerError {
    /// Static label for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::UnknownChannel(_) => "unknown_channel",
            Self::UnsupportedTarget(_) => "unsupported_target",
            Self::InvalidValue(_) => "invalid_value",
        }
    }

    /// Protocol-shape problems log quieter than referential ones.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::NeedMoreParams | Self::InvalidValue(_))
    }
}

/// Result type for dispatch handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Session Errors (outbound operations)
// ============================================================================

/// Errors returned by outbound session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not on a channel or in a query")]
    NoSuchWindow(WindowId),

    #[error("no such channel: {0}")]
    NoSuchChannel(WindowId),

    #[error("no such query: {0}")]
    NoSuchQuery(WindowId),

    #[error("nothing to send")]
    NoTextToSend,

    #[error("not connected")]
    NotConnected,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl SessionError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchWindow(_) => "no_such_window",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NoSuchQuery(_) => "no_such_query",
            Self::NoTextToSend => "no_text_to_send",
            Self::NotConnected => "not_connected",
            Self::Transport(_) => "transport",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(
            HandlerError::UnknownChannel("#x".into()).error_code(),
            "unknown_channel"
        );
        assert!(HandlerError::InvalidValue("abc".into()).is_malformed());
        assert!(!HandlerError::UnsupportedTarget("bob".into()).is_malformed());
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::NoSuchWindow("cAAAAAB".into());
        assert_eq!(err.to_string(), "not on a channel or in a query");
        assert_eq!(err.error_code(), "no_such_window");

        let err: SessionError = TransportError::NotConnected.into();
        assert_eq!(err.error_code(), "transport");
    }
}
