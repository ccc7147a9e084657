//! Transport boundary.
//!
//! The engine does not frame lines or own sockets. A [`Transport`] connects,
//! sends and reports server features; it reports inbound traffic to one
//! registered [`TransportListener`] per connection.
//!
//! Getters (`is_connected`, `current_nick`, `isupport`, `has_capability`)
//! may be called while a session holds its lock, so implementations must
//! not call back into the listener from them. The session never calls
//! `connect`, `quit` or any send method while holding its lock.

use crate::config::ServerRecord;
use crate::proto::{Batch, IrcMessage};
use async_trait::async_trait;
use std::sync::{Arc, Weak};
use thiserror::Error;

/// Errors reported by transport implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not connected")]
    NotConnected,
    #[error("connection timed out")]
    Timeout,
}

impl TransportError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Io(_) => "io",
            Self::NotConnected => "not_connected",
            Self::Timeout => "timeout",
        }
    }
}

/// One IRC connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the connection and register with the server.
    ///
    /// On success the transport later fires [`TransportListener::on_connect`]
    /// once registration completes.
    async fn connect(&self) -> Result<(), TransportError>;

    /// Send QUIT and close. Fires [`TransportListener::on_disconnect`].
    fn quit(&self, reason: Option<&str>);

    /// Send a command with parameters; the last one may contain spaces.
    fn send(&self, command: &str, params: &[&str]) -> Result<(), TransportError>;

    /// Send a preformatted line.
    fn send_raw(&self, line: &str) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;

    /// Nickname the server currently knows us by.
    fn current_nick(&self) -> String;

    /// ISUPPORT token value, `None` when not advertised.
    fn isupport(&self, key: &str) -> Option<String>;

    /// Whether an IRCv3 capability was negotiated.
    fn has_capability(&self, name: &str) -> bool;

    /// Register the listener that receives this connection's events.
    fn register(&self, listener: Weak<dyn TransportListener>);
}

/// Receiver of transport events. Events arrive in wire order.
pub trait TransportListener: Send + Sync {
    fn on_connect(&self);

    fn on_disconnect(&self, reason: &str);

    fn on_message(&self, message: &IrcMessage);

    /// A completed batch. Its items are not delivered through
    /// [`on_message`](Self::on_message) separately.
    fn on_batch(&self, batch: Batch);
}

/// Builds a transport for a saved server record.
pub trait TransportFactory: Send + Sync {
    fn create(&self, record: &ServerRecord) -> Arc<dyn Transport>;
}
