//! Joined channels: topic, members and mode state.

use super::topic::Topic;
use super::uid::WindowId;
use super::user::{User, compare_users};
use super::window::{HasWindow, Window};
use crate::mode::ModeType;
use crate::proto::casemap::irc_eq;
use crate::proto::isupport::PrefixSpec;

/// A non-privilege channel mode entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMode {
    pub mode_type: ModeType,
    pub letter: char,
    pub param: Option<String>,
    pub set: bool,
}

#[derive(Debug, Clone)]
pub struct Channel {
    window: Window,
    topic: Topic,
    users: Vec<User>,
    modes: Vec<ChannelMode>,
}

impl Channel {
    pub fn new(id: impl Into<WindowId>, name: impl Into<String>) -> Self {
        let topic = Topic::default();
        let mut window = Window::new(id, name);
        window.set_title(topic.display());
        Self {
            window,
            topic,
            users: Vec::new(),
            modes: Vec::new(),
        }
    }

    // ========================================================================
    // Topic
    // ========================================================================

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Replace the topic and retitle the window to match.
    pub fn set_topic(&mut self, topic: Topic) {
        self.window.set_title(topic.display());
        self.topic = topic;
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, nickname: &str) -> Option<&User> {
        self.users.iter().find(|u| irc_eq(&u.nickname, nickname))
    }

    pub fn user_mut(&mut self, nickname: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| irc_eq(&u.nickname, nickname))
    }

    pub fn has_user(&self, nickname: &str) -> bool {
        self.user(nickname).is_some()
    }

    /// Add a member, or overwrite the privileges of an existing one.
    pub fn upsert_user(&mut self, nickname: &str, modes: &str, prefix: &PrefixSpec) {
        let modes = prefix.normalize(modes);
        match self.user_mut(nickname) {
            Some(user) => user.modes = modes,
            None => self.users.push(User::new(nickname, modes)),
        }
        self.sort_users(prefix);
    }

    /// Remove a member; returns whether one was present.
    pub fn remove_user(&mut self, nickname: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| !irc_eq(&u.nickname, nickname));
        self.users.len() != before
    }

    /// Rename a member in place; returns whether one was present.
    pub fn rename_user(&mut self, old: &str, new: &str, prefix: &PrefixSpec) -> bool {
        let Some(user) = self.user_mut(old) else {
            return false;
        };
        user.nickname = new.to_string();
        self.sort_users(prefix);
        true
    }

    pub fn sort_users(&mut self, prefix: &PrefixSpec) {
        self.users.sort_by(|a, b| compare_users(a, b, prefix));
    }

    // ========================================================================
    // Modes
    // ========================================================================

    pub fn modes(&self) -> &[ChannelMode] {
        &self.modes
    }

    /// First entry for a mode letter.
    pub fn mode(&self, letter: char) -> Option<&ChannelMode> {
        self.modes.iter().find(|m| m.letter == letter)
    }

    /// Entries currently set for a mode letter (several for list modes).
    pub fn mode_entries(&self, letter: char) -> impl Iterator<Item = &ChannelMode> {
        self.modes.iter().filter(move |m| m.letter == letter && m.set)
    }

    /// Record a non-privilege mode change.
    ///
    /// List modes keep one entry per (letter, parameter); unsetting removes
    /// the matching entry. Other modes keep one entry per letter; unsetting
    /// marks it unset and clears its parameter.
    pub fn set_mode(&mut self, mode_type: ModeType, letter: char, param: Option<String>, set: bool) {
        if mode_type == ModeType::List {
            let position = self
                .modes
                .iter()
                .position(|m| m.letter == letter && m.param == param);
            match (position, set) {
                (None, true) => self.modes.push(ChannelMode {
                    mode_type,
                    letter,
                    param,
                    set,
                }),
                (Some(i), false) => {
                    self.modes.remove(i);
                }
                _ => {}
            }
            return;
        }

        match self.modes.iter_mut().find(|m| m.letter == letter) {
            Some(existing) => {
                existing.set = set;
                existing.param = if set { param } else { None };
            }
            None if set => self.modes.push(ChannelMode {
                mode_type,
                letter,
                param,
                set,
            }),
            None => {}
        }
    }
}

impl HasWindow for Channel {
    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}
