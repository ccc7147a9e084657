//! Sessions: one network connection each.
//!
//! A [`Session`] owns its transport, one lock over its model
//! ([`SessionState`]) and its reconnect state machine. Inbound events are
//! dispatched under the lock; network I/O never happens while it is held.
//!
//! ## Connectivity
//!
//! ```text
//! Disconnected -> Connecting -> Connected
//!       ^             |             |
//!       |             v             v
//!       +---- ReconnectScheduled <--+   (unexpected loss or connect error)
//! ```
//!
//! A manual [`disconnect`](Session::disconnect) suppresses every automatic
//! reconnect until [`connect`](Session::connect) is called again.

mod manager;
mod outbound;
mod reconnect;
mod state;

pub use manager::SessionManager;
pub use outbound::split_message;
pub use reconnect::{MAX_RECONNECT_DELAY, ReconnectState, ScheduledAttempt, reconnect_delay};
pub use state::{ConnectionState, SessionState};

use crate::config::ServerRecord;
use crate::handlers::{Context, Effects, Registry, handle_connected, handle_disconnected, unpack_batch};
use crate::notification::NotificationManager;
use crate::proto::{Batch, IrcMessage};
use crate::state::{EventType, HasWindow, Message, Topic, User, WindowId, WindowState};
use crate::transport::{Transport, TransportListener};
use crate::update::PendingUpdate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// One IRC network session.
pub struct Session {
    weak_self: Weak<Session>,
    id: String,
    record: ServerRecord,
    state: Mutex<SessionState>,
    transport: Arc<dyn Transport>,
    registry: Registry,
    notifications: Arc<NotificationManager>,
    updates: Arc<PendingUpdate>,
    registered: AtomicBool,
}

impl Session {
    pub fn new(
        record: ServerRecord,
        transport: Arc<dyn Transport>,
        notifications: Arc<NotificationManager>,
        updates: Arc<PendingUpdate>,
    ) -> Arc<Self> {
        let mut record = record;
        record.apply_defaults();
        Arc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            id: record.id.clone(),
            state: Mutex::new(SessionState::new(&record.id, &record.hostname)),
            record,
            transport,
            registry: Registry::new(),
            notifications,
            updates,
            registered: AtomicBool::new(false),
        })
    }

    /// Session id; also the id of the session's own window.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn record(&self) -> &ServerRecord {
        &self.record
    }

    pub fn hostname(&self) -> &str {
        &self.record.hostname
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    // ========================================================================
    // Locked access
    // ========================================================================

    /// Run `f` with a consistent view of the model.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Mutate the model and flag the presentation layer.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = f(&mut self.state.lock());
        self.updates.set_pending();
        result
    }

    /// Run `f` with a handler context under the lock. The returned effects
    /// must be applied after the lock is released.
    fn dispatch_with<R>(&self, f: impl FnOnce(&mut Context<'_>) -> R) -> (R, Effects) {
        let mut state = self.state.lock();
        let mut ctx = Context::new(
            &mut state,
            self.transport.as_ref(),
            &self.notifications,
            &self.record.hostname,
        );
        let result = f(&mut ctx);
        let effects = ctx.into_effects();
        drop(state);
        self.updates.set_pending();
        (result, effects)
    }

    fn apply_effects(&self, effects: Effects) {
        for line in &effects.outbox {
            if let Err(e) = self.transport.send_raw(line) {
                warn!(session = %self.id, error = %e, code = e.error_code(), "Failed to send queued line");
            }
        }
        if effects.reconnect {
            self.schedule_reconnect();
        }
    }

    // ========================================================================
    // Connectivity
    // ========================================================================

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state.lock().connection_state()
    }

    /// Connect (or reconnect after a manual disconnect).
    ///
    /// No-op while connected or while a connect is already in flight.
    /// Failures are reported in the session window and schedule a reconnect.
    pub async fn connect(&self) {
        if self.transport.is_connected() {
            debug!(session = %self.id, "Already connected");
            return;
        }
        self.register_listener();

        let started = self.with_state(|state| {
            if state.connection == ConnectionState::Connecting {
                return false;
            }
            state.reconnect.set_manual_disconnect(false);
            state.reconnect.reset();
            state.connection = ConnectionState::Connecting;
            state.server_mut().add_message(Message::event(
                EventType::Connecting,
                format!("Connecting to {}", self.record.address()),
            ));
            true
        });
        if !started {
            debug!(session = %self.id, "Connect already in progress");
            return;
        }

        self.attempt_connect(None).await;
    }

    /// Register this session as the transport's listener, once per lifetime.
    fn register_listener(&self) {
        if self.registered.swap(true, Ordering::AcqRel) {
            return;
        }
        let listener: Weak<dyn TransportListener> = self.weak_self.clone();
        self.transport.register(listener);
        debug!(session = %self.id, "Registered transport listener");
    }

    async fn attempt_connect(&self, attempt: Option<u32>) {
        info!(
            session = %self.id,
            host = %self.record.hostname,
            port = self.record.port,
            tls = self.record.tls,
            attempt = attempt.unwrap_or(0),
            "Connecting"
        );

        let Err(e) = self.transport.connect().await else {
            return;
        };

        warn!(session = %self.id, error = %e, code = e.error_code(), "Connection failed");
        let text = match attempt {
            Some(n) => format!("Reconnection attempt {} failed: {}", n, e),
            None => format!("Connection error: {}", e),
        };
        self.with_state(|state| {
            state.connection = ConnectionState::Disconnected;
            state.server_mut().add_message(Message::error(text));
        });
        self.schedule_reconnect();
    }

    /// Arm a reconnect timer unless one is pending or the user disconnected.
    pub(crate) fn schedule_reconnect(&self) {
        let mut state = self.state.lock();
        let Some(scheduled) = state.reconnect.schedule() else {
            debug!(session = %self.id, "Reconnect already pending or suppressed");
            return;
        };

        let Ok(runtime) = Handle::try_current() else {
            error!(session = %self.id, "No async runtime, cannot schedule reconnect");
            state.reconnect.cancel();
            return;
        };

        info!(
            session = %self.id,
            attempt = scheduled.attempt,
            delay_secs = scheduled.delay.as_secs(),
            "Scheduling reconnect"
        );
        state.connection = ConnectionState::ReconnectScheduled;
        state.server_mut().add_message(Message::event(
            EventType::Connecting,
            format!(
                "Reconnection attempt {} scheduled in {}s",
                scheduled.attempt,
                scheduled.delay.as_secs()
            ),
        ));

        let session = self.weak_self.clone();
        let timer = runtime.spawn(async move {
            tokio::time::sleep(scheduled.delay).await;
            if let Some(session) = session.upgrade() {
                session.fire_reconnect(scheduled.generation).await;
            }
        });
        state.reconnect.arm(timer);
        drop(state);
        self.updates.set_pending();
    }

    async fn fire_reconnect(&self, generation: u64) {
        let attempt = {
            let mut state = self.state.lock();
            let Some(attempt) = state.reconnect.fire(generation) else {
                debug!(session = %self.id, "Stale reconnect timer");
                return;
            };
            state.connection = ConnectionState::Connecting;
            state.server_mut().add_message(Message::event(
                EventType::Connecting,
                format!("Attempting to reconnect (attempt {})...", attempt),
            ));
            attempt
        };
        self.updates.set_pending();

        if self.transport.is_connected() {
            debug!(session = %self.id, "Transport already connected, skipping reconnect");
            return;
        }
        self.attempt_connect(Some(attempt)).await;
    }

    /// Disconnect on purpose: no automatic reconnect follows.
    pub fn disconnect(&self) {
        self.with_state(|state| {
            state.reconnect.set_manual_disconnect(true);
            state.reconnect.reset();
            state.connection = ConnectionState::Disconnected;
        });
        info!(session = %self.id, "Disconnecting");
        self.transport.quit(None);
    }

    // ========================================================================
    // Presentation accessors
    // ========================================================================

    /// Network display name.
    pub fn name(&self) -> String {
        self.read(|state| state.name().to_string())
    }

    pub fn messages(&self, window: &str) -> Option<Vec<Message>> {
        self.read(|state| state.window(window).map(|w| w.messages().to_vec()))
    }

    pub fn title(&self, window: &str) -> Option<String> {
        self.read(|state| state.window(window).map(|w| w.title().to_string()))
    }

    pub fn window_state(&self, window: &str) -> Option<WindowState> {
        self.read(|state| state.window(window).map(|w| w.state()))
    }

    pub fn topic(&self, channel: &str) -> Option<Topic> {
        self.read(|state| state.channel(channel).map(|c| c.topic().clone()))
    }

    pub fn users(&self, channel: &str) -> Option<Vec<User>> {
        self.read(|state| state.channel(channel).map(|c| c.users().to_vec()))
    }

    pub fn user_modes(&self) -> String {
        self.read(|state| state.user_modes().to_string())
    }

    /// Channel ids, ordered by name.
    pub fn channel_ids(&self) -> Vec<WindowId> {
        self.read(|state| state.channels().iter().map(|c| c.id().to_string()).collect())
    }

    /// Query ids, ordered by nickname.
    pub fn query_ids(&self) -> Vec<WindowId> {
        self.read(|state| state.queries().iter().map(|q| q.id().to_string()).collect())
    }

    /// Mark a window active (or not). Returns false for unknown windows.
    pub fn set_active(&self, window: &str, active: bool) -> bool {
        self.with_state(|state| match state.window_mut(window) {
            Some(w) => {
                w.set_active(active);
                true
            }
            None => false,
        })
    }

    /// Show a local error in `window`, or in the session window when the
    /// window is gone.
    pub fn report_error(&self, window: &str, text: impl Into<String>) {
        let message = Message::error(text);
        self.with_state(|state| match state.window_mut(window) {
            Some(w) => w.add_message(message),
            None => state.server_mut().add_message(message),
        });
    }
}

impl TransportListener for Session {
    fn on_connect(&self) {
        let (accepted, effects) = self.dispatch_with(|ctx| {
            if ctx.state.reconnect.is_manual_disconnect() {
                return false;
            }
            ctx.state.reconnect.reset();
            ctx.state.connection = ConnectionState::Connected;
            handle_connected(ctx);
            true
        });
        self.apply_effects(effects);

        // A disconnect() raced the in-flight connect; it stays disconnected.
        if !accepted {
            info!(session = %self.id, "Connected after manual disconnect, closing");
            self.transport.quit(None);
        }
    }

    fn on_disconnect(&self, reason: &str) {
        let (should_reconnect, effects) = self.dispatch_with(|ctx| {
            ctx.state.connection = ConnectionState::Disconnected;
            handle_disconnected(ctx, reason);
            let reconnect = &ctx.state.reconnect;
            !reconnect.is_manual_disconnect() && !reconnect.is_pending()
        });
        self.apply_effects(effects);
        if should_reconnect {
            self.schedule_reconnect();
        }
    }

    fn on_message(&self, message: &IrcMessage) {
        let ((), effects) = self.dispatch_with(|ctx| self.registry.dispatch(ctx, message));
        self.apply_effects(effects);
    }

    fn on_batch(&self, batch: Batch) {
        let items = unpack_batch(batch);
        let ((), effects) = self.dispatch_with(|ctx| {
            for item in &items {
                self.registry.dispatch(ctx, item);
            }
        });
        self.apply_effects(effects);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("hostname", &self.record.hostname)
            .finish_non_exhaustive()
    }
}
