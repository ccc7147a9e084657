//! Handler context and core types.
//!
//! A `Context` is built by the session for each inbound event while the
//! session lock is held. Handlers mutate `state` directly; anything that
//! must reach the network is queued in the outbox and flushed by the session
//! once the lock is released.

use crate::error::HandlerResult;
use crate::mode::ModeSpec;
use crate::notification::NotificationManager;
use crate::proto::casemap::irc_eq;
use crate::proto::isupport::{DEFAULT_CHANTYPES, PrefixSpec};
use crate::proto::IrcMessage;
use crate::session::SessionState;
use crate::state::Message;
use crate::transport::Transport;

/// Handler context passed to each event handler.
pub struct Context<'a> {
    /// Session model, guarded by the caller's lock.
    pub state: &'a mut SessionState,
    /// Read-only view of the connection (getters only).
    pub transport: &'a dyn Transport,
    pub notifications: &'a NotificationManager,
    /// Hostname from the server record, used in status lines.
    pub hostname: &'a str,
    outbox: Vec<String>,
    reconnect_requested: bool,
}

/// Work a handler left for after the lock is released.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Effects {
    pub outbox: Vec<String>,
    pub reconnect: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        state: &'a mut SessionState,
        transport: &'a dyn Transport,
        notifications: &'a NotificationManager,
        hostname: &'a str,
    ) -> Self {
        Self {
            state,
            transport,
            notifications,
            hostname,
            outbox: Vec::new(),
            reconnect_requested: false,
        }
    }

    /// Nickname the server currently knows us by.
    pub fn current_nick(&self) -> String {
        self.transport.current_nick()
    }

    pub fn is_me(&self, nick: &str) -> bool {
        !nick.is_empty() && irc_eq(nick, &self.transport.current_nick())
    }

    /// Whether `target` names a channel under the server's CHANTYPES.
    pub fn is_channel(&self, target: &str) -> bool {
        let chantypes = self
            .transport
            .isupport("CHANTYPES")
            .unwrap_or_else(|| DEFAULT_CHANTYPES.to_string());
        target.chars().next().is_some_and(|c| chantypes.contains(c))
    }

    pub fn mode_spec(&self) -> ModeSpec {
        ModeSpec::from_isupport(
            self.transport.isupport("PREFIX").as_deref(),
            self.transport.isupport("CHANMODES").as_deref(),
        )
    }

    pub fn prefix_spec(&self) -> PrefixSpec {
        self.transport
            .isupport("PREFIX")
            .and_then(|p| PrefixSpec::parse(&p))
            .unwrap_or_default()
    }

    /// Network display name.
    pub fn network(&self) -> &str {
        self.state.name()
    }

    /// Append a line to the session's own window.
    pub fn server_message(&mut self, message: Message) {
        self.state.server_mut().add_message(message);
    }

    /// Run the notification matcher over a delivered line.
    pub fn notify(&self, source: &str, nick: &str, text: &str) {
        self.notifications
            .check_and_notify(self.state.name(), source, nick, text);
    }

    /// Queue a raw line to send once the lock is released.
    pub fn queue_raw(&mut self, line: impl Into<String>) {
        self.outbox.push(line.into());
    }

    /// Ask the session to schedule a reconnect once the lock is released.
    pub fn request_reconnect(&mut self) {
        self.reconnect_requested = true;
    }

    pub fn into_effects(self) -> Effects {
        Effects {
            outbox: self.outbox,
            reconnect: self.reconnect_requested,
        }
    }
}

/// An inbound event handler.
///
/// Handlers run under the session lock and must not block.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult;
}
