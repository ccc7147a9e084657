//! Session builders and lookups shared by the integration tests.

use super::transport::MockTransport;
use slirc_client::config::ServerRecord;
use slirc_client::notification::{Notification, NotificationManager, TriggerConfig};
use slirc_client::session::Session;
use slirc_client::state::{HasWindow, Message};
use slirc_client::update::PendingUpdate;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const HOST: &str = "irc.example.net";
pub const NICK: &str = "alice";

/// A session wired to a mock transport.
pub struct TestSession {
    pub session: Arc<Session>,
    pub transport: Arc<MockTransport>,
    pub updates: Arc<PendingUpdate>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

#[allow(dead_code)]
impl TestSession {
    /// Unconnected session with no notification triggers.
    pub fn new() -> Self {
        Self::with_triggers(&[])
    }

    pub fn with_triggers(triggers: &[TriggerConfig]) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = MockTransport::new(NICK);
        let updates = Arc::new(PendingUpdate::new());
        let record = ServerRecord::new(HOST, 6697, true, NICK).with_id("s1");
        let session = Session::new(
            record,
            transport.clone(),
            Arc::new(NotificationManager::new(triggers, Some(tx))),
            Arc::clone(&updates),
        );
        Self {
            session,
            transport,
            updates,
            notifications: rx,
        }
    }

    /// Connected session with a catch-all popup trigger.
    pub async fn connected() -> Self {
        let trigger = TriggerConfig {
            popup: true,
            ..TriggerConfig::default()
        };
        let test = Self::with_triggers(&[trigger]);
        test.session.connect().await;
        test
    }

    /// Connected session that has joined `channel`.
    pub async fn in_channel(channel: &str) -> Self {
        let test = Self::connected().await;
        test.deliver(&format!(":{}!a@host JOIN {}", NICK, channel));
        test
    }

    pub fn deliver(&self, line: &str) {
        self.transport.deliver(line);
    }

    /// Text of every line in the session's own window.
    pub fn server_lines(&self) -> Vec<String> {
        let id = self.session.id().to_string();
        self.window_lines(&id)
    }

    pub fn window_lines(&self, window: &str) -> Vec<String> {
        lines(&self.session.messages(window).unwrap_or_default())
    }

    pub fn channel_lines(&self, name: &str) -> Vec<String> {
        let id = channel_id(&self.session, name).expect("channel should exist");
        self.window_lines(&id)
    }

    pub fn nicknames(&self, channel: &str) -> Vec<String> {
        let id = channel_id(&self.session, channel).expect("channel should exist");
        self.session
            .users(&id)
            .unwrap_or_default()
            .into_iter()
            .map(|u| u.display_name())
            .collect()
    }

    pub fn try_notification(&mut self) -> Option<Notification> {
        self.notifications.try_recv().ok()
    }
}

pub fn channel_id(session: &Session, name: &str) -> Option<String> {
    session.read(|state| state.channel_by_name(name).map(|c| c.id().to_string()))
}

pub fn query_id(session: &Session, nick: &str) -> Option<String> {
    session.read(|state| state.query_by_name(nick).map(|q| q.id().to_string()))
}

pub fn lines(messages: &[Message]) -> Vec<String> {
    messages.iter().map(|m| m.text().to_string()).collect()
}
