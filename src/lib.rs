//! slirc-client - Straylight IRC client session engine.
//!
//! Maintains any number of independent IRC network sessions, turning inbound
//! protocol events into mutations of an in-memory model (windows, channels,
//! queries, users, topics, modes) and client intents into outbound lines.
//!
//! The wire transport is supplied by the embedding application through the
//! [`transport::Transport`] trait; presentation code reads state through the
//! accessors on [`session::Session`] and polls [`update::PendingUpdate`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod mode;
pub mod notification;
pub mod proto;
pub mod session;
pub mod state;
pub mod transport;
pub mod update;

pub use config::{Config, ServerRecord};
pub use error::SessionError;
pub use notification::{Notification, NotificationManager, TriggerConfig};
pub use session::{Session, SessionManager};
pub use transport::{Transport, TransportError, TransportFactory, TransportListener};
pub use update::PendingUpdate;
