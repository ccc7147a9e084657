//! Session manager: the set of configured networks.

use super::Session;
use crate::config::ServerRecord;
use crate::notification::NotificationManager;
use crate::proto::casemap::irc_to_lower;
use crate::state::WindowId;
use crate::transport::TransportFactory;
use crate::update::PendingUpdate;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

/// Owns every session and tracks which window the user is looking at.
pub struct SessionManager {
    sessions: DashMap<String, Arc<Session>>,
    factory: Arc<dyn TransportFactory>,
    notifications: Arc<NotificationManager>,
    updates: Arc<PendingUpdate>,
    active: Mutex<Option<(String, WindowId)>>,
}

impl SessionManager {
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        notifications: Arc<NotificationManager>,
        updates: Arc<PendingUpdate>,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            factory,
            notifications,
            updates,
            active: Mutex::new(None),
        }
    }

    pub fn updates(&self) -> &Arc<PendingUpdate> {
        &self.updates
    }

    pub fn notifications(&self) -> &Arc<NotificationManager> {
        &self.notifications
    }

    /// Create a session for `record`, optionally connecting in the
    /// background. An existing session with the same id is replaced.
    pub fn add_session(&self, record: ServerRecord, connect: bool) -> Arc<Session> {
        let mut record = record;
        record.apply_defaults();
        let transport = self.factory.create(&record);
        let session = Session::new(
            record,
            transport,
            Arc::clone(&self.notifications),
            Arc::clone(&self.updates),
        );

        if let Some(previous) = self.sessions.insert(session.id().to_string(), Arc::clone(&session)) {
            warn!(session = %previous.id(), "Replacing session with duplicate id");
            previous.disconnect();
        }
        info!(session = %session.id(), host = %session.hostname(), "Added session");
        self.updates.set_pending();

        if connect {
            spawn_connect(&session);
        }
        session
    }

    /// Disconnect and forget a session.
    pub fn remove_session(&self, id: &str) -> Option<Arc<Session>> {
        let (_, session) = self.sessions.remove(id)?;
        session.disconnect();

        let mut active = self.active.lock();
        if active.as_ref().is_some_and(|(sid, _)| sid == id) {
            *active = None;
        }
        drop(active);

        info!(session = %id, "Removed session");
        self.updates.set_pending();
        Some(session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// All sessions, ordered by network name then id.
    pub fn sessions(&self) -> Vec<Arc<Session>> {
        let mut sessions: Vec<_> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        sessions.sort_by_cached_key(|s| (irc_to_lower(&s.name()), s.id().to_string()));
        sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Create a session per record; only `auto_connect` ones connect.
    pub fn load(&self, records: &[ServerRecord]) {
        for record in records {
            self.add_session(record.clone(), record.auto_connect);
        }
    }

    /// Records for persistence, in display order.
    pub fn records(&self) -> Vec<ServerRecord> {
        self.sessions()
            .iter()
            .map(|s| s.record().clone())
            .collect()
    }

    /// Connect every session that is not connected.
    pub fn start(&self) {
        for session in self.sessions() {
            if !session.is_connected() {
                spawn_connect(&session);
            }
        }
    }

    /// Disconnect every session.
    pub fn stop(&self) {
        for session in self.sessions() {
            session.disconnect();
        }
    }

    /// Make `window` of `session` the active window, marking the previous
    /// active window read.
    pub fn set_active_window(&self, session: &str, window: &str) -> bool {
        let Some(target) = self.get(session) else {
            return false;
        };

        let mut active = self.active.lock();
        if let Some((prev_session, prev_window)) = active.take()
            && let Some(prev) = self.get(&prev_session)
        {
            prev.set_active(&prev_window, false);
        }

        if target.set_active(window, true) {
            *active = Some((session.to_string(), window.to_string()));
            true
        } else {
            false
        }
    }

    pub fn active_window(&self) -> Option<(String, WindowId)> {
        self.active.lock().clone()
    }
}

fn spawn_connect(session: &Arc<Session>) {
    let Ok(runtime) = Handle::try_current() else {
        error!(session = %session.id(), "No async runtime, cannot connect");
        return;
    };
    let session = Arc::clone(session);
    runtime.spawn(async move {
        session.connect().await;
    });
}
