//! Outbound operations used by the command layer.
//!
//! Targets are looked up under the session lock; lines are sent after it is
//! released. Without the `echo-message` capability our own PRIVMSG and
//! NOTICE lines are echoed into the window locally.

use super::{Session, SessionState};
use crate::error::SessionError;
use crate::proto::ctcp::format_ctcp;
use crate::proto::isupport::DEFAULT_LINELEN;
use crate::state::{HasWindow, Message, WindowId};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Capability under which the server echoes our own messages back.
const ECHO_CAP: &str = "echo-message";

/// Split outbound text into protocol-sized payloads.
///
/// Each `\n`-separated line is sent separately and empty lines are skipped.
/// Lines longer than `max` bytes break at the last space that fits, or
/// mid-word when there is none; leading spaces of continuation pieces are
/// dropped.
pub fn split_message(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut parts = Vec::new();

    for line in text.split('\n') {
        let mut rest = line.trim_end_matches('\r');
        while rest.len() > max {
            let mut cut = max;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            if cut == 0 {
                cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }
            let split = if rest[cut..].starts_with(' ') {
                cut
            } else {
                rest[..cut].rfind(' ').filter(|&i| i > 0).unwrap_or(cut)
            };
            parts.push(rest[..split].to_string());
            rest = rest[split..].trim_start_matches(' ');
        }
        if !rest.is_empty() {
            parts.push(rest.to_string());
        }
    }

    parts
}

/// Where a window's messages are addressed.
fn window_target(state: &SessionState, window: &str) -> Option<String> {
    if let Some(channel) = state.channel(window) {
        return Some(channel.name().to_string());
    }
    state.query(window).map(|q| q.nickname().to_string())
}

#[derive(Clone, Copy)]
enum Kind {
    Privmsg,
    Notice,
}

impl Kind {
    fn command(self) -> &'static str {
        match self {
            Self::Privmsg => "PRIVMSG",
            Self::Notice => "NOTICE",
        }
    }
}

impl Session {
    fn ensure_connected(&self) -> Result<(), SessionError> {
        if self.transport.is_connected() {
            Ok(())
        } else {
            Err(SessionError::NotConnected)
        }
    }

    /// Payload bytes left for `command target :` within the server's line
    /// length.
    fn payload_budget(&self, command: &str, target: &str) -> usize {
        let linelen = self
            .transport
            .isupport("LINELEN")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_LINELEN);
        linelen.saturating_sub(command.len() + 3 + target.len())
    }

    fn deliver(&self, kind: Kind, target: &str, payloads: &[String]) -> Result<(), SessionError> {
        self.ensure_connected()?;
        let echo = !self.transport.has_capability(ECHO_CAP);
        let nick = self.transport.current_nick();

        for payload in payloads {
            self.transport.send(kind.command(), &[target, payload.as_str()])?;
            if echo {
                self.echo(kind, target, &nick, payload);
            }
        }
        debug!(session = %self.id, target = %target, lines = payloads.len(), "Sent message");
        Ok(())
    }

    fn echo(&self, kind: Kind, target: &str, nick: &str, payload: &str) {
        let message = match kind {
            Kind::Privmsg => Message::chat(nick, payload, BTreeMap::new(), true, nick),
            Kind::Notice => Message::notice(nick, payload, BTreeMap::new(), true, nick),
        };
        self.with_state(|state| {
            if let Some(channel) = state.channel_by_name_mut(target) {
                channel.add_message(message);
            } else {
                state.add_query(target).add_message(message);
            }
        });
    }

    fn send_text(&self, kind: Kind, target: &str, text: &str) -> Result<(), SessionError> {
        let payloads = split_message(text, self.payload_budget(kind.command(), target));
        if payloads.is_empty() {
            return Err(SessionError::NoTextToSend);
        }
        self.deliver(kind, target, &payloads)
    }

    fn target_of(&self, window: &str) -> Result<String, SessionError> {
        self.read(|state| window_target(state, window))
            .ok_or_else(|| SessionError::NoSuchWindow(window.to_string()))
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// PRIVMSG to the channel or query shown in `window`.
    pub fn send_message(&self, window: &str, text: &str) -> Result<(), SessionError> {
        let target = self.target_of(window)?;
        self.send_text(Kind::Privmsg, &target, text)
    }

    /// PRIVMSG to `nick`, opening the query if needed.
    pub fn send_query(&self, nick: &str, text: &str) -> Result<(), SessionError> {
        self.open_query(nick);
        self.send_text(Kind::Privmsg, nick, text)
    }

    /// NOTICE to the channel or query shown in `window`.
    pub fn send_notice(&self, window: &str, text: &str) -> Result<(), SessionError> {
        let target = self.target_of(window)?;
        self.send_text(Kind::Notice, &target, text)
    }

    /// NOTICE to `nick`, opening the query if needed.
    pub fn send_query_notice(&self, nick: &str, text: &str) -> Result<(), SessionError> {
        self.open_query(nick);
        self.send_text(Kind::Notice, nick, text)
    }

    /// CTCP ACTION to the channel or query shown in `window`.
    pub fn send_action(&self, window: &str, text: &str) -> Result<(), SessionError> {
        let target = self.target_of(window)?;
        // "\x01ACTION " before the text and "\x01" after it.
        let overhead = format_ctcp("ACTION", "").len() + 1;
        let budget = self
            .payload_budget(Kind::Privmsg.command(), &target)
            .saturating_sub(overhead);
        let payloads: Vec<String> = split_message(text, budget)
            .iter()
            .map(|part| format_ctcp("ACTION", part))
            .collect();
        if payloads.is_empty() {
            return Err(SessionError::NoTextToSend);
        }
        self.deliver(Kind::Privmsg, &target, &payloads)
    }

    /// Send a preformatted line.
    pub fn send_raw(&self, line: &str) -> Result<(), SessionError> {
        self.ensure_connected()?;
        self.transport.send_raw(line)?;
        Ok(())
    }

    // ========================================================================
    // Channels and queries
    // ========================================================================

    /// JOIN, with an optional key. The window opens when the server confirms.
    pub fn join_channel(&self, name: &str, key: Option<&str>) -> Result<(), SessionError> {
        self.ensure_connected()?;
        match key.filter(|k| !k.is_empty()) {
            Some(key) => self.transport.send("JOIN", &[name, key])?,
            None => self.transport.send("JOIN", &[name])?,
        }
        info!(session = %self.id, channel = %name, "Joining channel");
        Ok(())
    }

    fn channel_name(&self, id: &str) -> Result<String, SessionError> {
        self.read(|state| state.channel(id).map(|c| c.name().to_string()))
            .ok_or_else(|| SessionError::NoSuchChannel(id.to_string()))
    }

    /// PART the channel shown in `id`. The window closes when the server
    /// confirms.
    pub fn part_channel(&self, id: &str) -> Result<(), SessionError> {
        let name = self.channel_name(id)?;
        self.ensure_connected()?;
        self.transport.send("PART", &[name.as_str()])?;
        info!(session = %self.id, channel = %name, "Parting channel");
        Ok(())
    }

    /// Close a channel window, parting first when connected.
    pub fn remove_channel(&self, id: &str) -> Result<(), SessionError> {
        let name = self.channel_name(id)?;
        if self.transport.is_connected() {
            self.transport.send("PART", &[name.as_str()])?;
        }
        self.with_state(|state| {
            state.remove_channel(id);
        });
        info!(session = %self.id, channel = %name, "Closed channel window");
        Ok(())
    }

    /// Open (or find) the query with `nick`, returning its window id.
    pub fn open_query(&self, nick: &str) -> WindowId {
        self.with_state(|state| state.add_query(nick).id().to_string())
    }

    pub fn close_query(&self, id: &str) -> Result<(), SessionError> {
        self.with_state(|state| state.remove_query(id))
            .map(|_| ())
            .ok_or_else(|| SessionError::NoSuchQuery(id.to_string()))
    }

    /// TOPIC for the channel shown in `id`.
    pub fn send_topic(&self, id: &str, text: &str) -> Result<(), SessionError> {
        let name = self.channel_name(id)?;
        self.ensure_connected()?;
        self.transport.send("TOPIC", &[name.as_str(), text])?;
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn set_nick(&self, nick: &str) -> Result<(), SessionError> {
        self.ensure_connected()?;
        self.transport.send("NICK", &[nick])?;
        Ok(())
    }

    pub fn whois(&self, nick: &str) -> Result<(), SessionError> {
        self.ensure_connected()?;
        self.transport.send("WHOIS", &[nick])?;
        Ok(())
    }
}
