//! Everything guarded by one session's lock.

use super::reconnect::ReconnectState;
use crate::proto::casemap::{irc_eq, irc_to_lower};
use crate::state::{Channel, HasWindow, IdGenerator, Query, Window};

/// Connectivity as seen by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    ReconnectScheduled,
}

/// Mutable state of one session: its own log window, channels, queries,
/// user modes and reconnect bookkeeping.
#[derive(Debug)]
pub struct SessionState {
    ids: IdGenerator,
    server: Window,
    channels: Vec<Channel>,
    queries: Vec<Query>,
    user_modes: String,
    pub(crate) connection: ConnectionState,
    pub(crate) reconnect: ReconnectState,
}

impl SessionState {
    /// The session window takes the session id and starts named after the
    /// host.
    pub fn new(id: &str, hostname: &str) -> Self {
        let mut server = Window::new(id, hostname);
        server.set_title(hostname);
        Self {
            ids: IdGenerator::new(),
            server,
            channels: Vec::new(),
            queries: Vec::new(),
            user_modes: String::new(),
            connection: ConnectionState::Disconnected,
            reconnect: ReconnectState::default(),
        }
    }

    /// Network display name (initially the hostname).
    pub fn name(&self) -> &str {
        self.server.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.server.set_name(name);
    }

    pub fn server(&self) -> &Window {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut Window {
        &mut self.server
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn reconnect(&self) -> &ReconnectState {
        &self.reconnect
    }

    pub fn user_modes(&self) -> &str {
        &self.user_modes
    }

    pub fn set_user_modes(&mut self, modes: impl Into<String>) {
        self.user_modes = modes.into();
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Channels ordered by name.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.channels.iter_mut()
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id() == id)
    }

    pub fn channel_mut(&mut self, id: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.id() == id)
    }

    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| irc_eq(c.name(), name))
    }

    pub fn channel_by_name_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| irc_eq(c.name(), name))
    }

    /// Get the channel called `name`, creating it if needed.
    pub fn add_channel(&mut self, name: &str) -> &mut Channel {
        let index = match self.channels.iter().position(|c| irc_eq(c.name(), name)) {
            Some(index) => index,
            None => {
                let key = irc_to_lower(name);
                let index = self
                    .channels
                    .partition_point(|c| irc_to_lower(c.name()) <= key);
                let id = self.ids.next_channel();
                self.channels.insert(index, Channel::new(id, name));
                index
            }
        };
        &mut self.channels[index]
    }

    pub fn remove_channel(&mut self, id: &str) -> Option<Channel> {
        let index = self.channels.iter().position(|c| c.id() == id)?;
        Some(self.channels.remove(index))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Queries ordered by peer nickname.
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn queries_mut(&mut self) -> impl Iterator<Item = &mut Query> {
        self.queries.iter_mut()
    }

    pub fn query(&self, id: &str) -> Option<&Query> {
        self.queries.iter().find(|q| q.id() == id)
    }

    pub fn query_mut(&mut self, id: &str) -> Option<&mut Query> {
        self.queries.iter_mut().find(|q| q.id() == id)
    }

    pub fn query_by_name(&self, nickname: &str) -> Option<&Query> {
        self.queries.iter().find(|q| irc_eq(q.nickname(), nickname))
    }

    pub fn query_by_name_mut(&mut self, nickname: &str) -> Option<&mut Query> {
        self.queries.iter_mut().find(|q| irc_eq(q.nickname(), nickname))
    }

    /// Get the query with `nickname`, creating it if needed.
    pub fn add_query(&mut self, nickname: &str) -> &mut Query {
        let index = match self.queries.iter().position(|q| irc_eq(q.nickname(), nickname)) {
            Some(index) => index,
            None => {
                let key = irc_to_lower(nickname);
                let index = self
                    .queries
                    .partition_point(|q| irc_to_lower(q.nickname()) <= key);
                let id = self.ids.next_query();
                self.queries.insert(index, Query::new(id, nickname));
                index
            }
        };
        &mut self.queries[index]
    }

    pub fn remove_query(&mut self, id: &str) -> Option<Query> {
        let index = self.queries.iter().position(|q| q.id() == id)?;
        Some(self.queries.remove(index))
    }

    /// Keep queries sorted after a peer rename.
    pub fn resort_queries(&mut self) {
        self.queries
            .sort_by_cached_key(|q| irc_to_lower(q.nickname()));
    }

    // ========================================================================
    // Windows
    // ========================================================================

    /// Session, channel or query window by id.
    pub fn window(&self, id: &str) -> Option<&Window> {
        if self.server.id() == id {
            return Some(&self.server);
        }
        self.channel(id)
            .map(HasWindow::window)
            .or_else(|| self.query(id).map(HasWindow::window))
    }

    pub fn window_mut(&mut self, id: &str) -> Option<&mut Window> {
        if self.server.id() == id {
            return Some(&mut self.server);
        }
        if let Some(index) = self.channels.iter().position(|c| c.id() == id) {
            return Some(self.channels[index].window_mut());
        }
        self.query_mut(id).map(HasWindow::window_mut)
    }

    /// Session window, then channels, then queries.
    pub fn windows_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        std::iter::once(&mut self.server)
            .chain(self.channels.iter_mut().map(HasWindow::window_mut))
            .chain(self.queries.iter_mut().map(HasWindow::window_mut))
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        std::iter::once(&self.server)
            .chain(self.channels.iter().map(HasWindow::window))
            .chain(self.queries.iter().map(HasWindow::window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_unique_and_sorted() {
        let mut state = SessionState::new("s1", "irc.example.net");
        let rust_id = state.add_channel("#rust").id().to_string();
        state.add_channel("#Alpha");
        let again = state.add_channel("#RUST").id().to_string();
        assert_eq!(rust_id, again);

        let names: Vec<_> = state.channels().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["#Alpha", "#rust"]);
        assert!(state.channel_by_name("#alpha").is_some());
    }

    #[test]
    fn test_remove_channel() {
        let mut state = SessionState::new("s1", "irc.example.net");
        let id = state.add_channel("#rust").id().to_string();
        assert!(state.remove_channel(&id).is_some());
        assert!(state.remove_channel(&id).is_none());
        assert!(state.channel_by_name("#rust").is_none());
    }

    #[test]
    fn test_queries_get_or_create() {
        let mut state = SessionState::new("s1", "irc.example.net");
        let id = state.add_query("Bob").id().to_string();
        assert_eq!(state.add_query("bob").id(), id);
        assert_eq!(state.queries().len(), 1);
        assert!(id.starts_with('q'));
    }

    #[test]
    fn test_window_lookup() {
        let mut state = SessionState::new("s1", "irc.example.net");
        let channel = state.add_channel("#rust").id().to_string();
        let query = state.add_query("bob").id().to_string();

        assert_eq!(state.window("s1").unwrap().name(), "irc.example.net");
        assert_eq!(state.window(&channel).unwrap().name(), "#rust");
        assert_eq!(state.window_mut(&query).unwrap().name(), "bob");
        assert!(state.window("nope").is_none());
        assert_eq!(state.windows().count(), 3);
    }
}
