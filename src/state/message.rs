//! Log lines shown in a window.

use crate::proto::casemap::irc_contains;
use crate::proto::ctcp::parse_action;
use crate::proto::format::strip_formatting;
use crate::proto::message::HISTORY_TAG;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Category of a status event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Join,
    Part,
    Quit,
    Kick,
    Nick,
    Topic,
    Mode,
    Connecting,
    Disconnected,
    Whois,
    Ctcp,
}

/// How a log line is rendered and how it affects unread state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Normal,
    Action,
    Notice,
    Event(EventType),
    Error,
    Highlight,
    HighlightAction,
    HighlightNotice,
}

impl MessageKind {
    pub fn is_highlight(self) -> bool {
        matches!(
            self,
            Self::Highlight | Self::HighlightAction | Self::HighlightNotice
        )
    }

    pub fn is_action(self) -> bool {
        matches!(self, Self::Action | Self::HighlightAction)
    }

    /// Lower-case name for presentation classes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Action => "action",
            Self::Notice => "notice",
            Self::Event(_) => "event",
            Self::Error => "error",
            Self::Highlight => "highlight",
            Self::HighlightAction => "highlight action",
            Self::HighlightNotice => "highlight notice",
        }
    }

    fn highlighted(self) -> Self {
        match self {
            Self::Normal => Self::Highlight,
            Self::Action => Self::HighlightAction,
            Self::Notice => Self::HighlightNotice,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    timestamp: DateTime<Local>,
    nickname: String,
    text: String,
    kind: MessageKind,
    me: bool,
    tags: BTreeMap<String, String>,
}

impl Message {
    /// A PRIVMSG line. `\x01ACTION ..\x01` bodies become actions; lines
    /// mentioning `current_nick` from someone else become highlights.
    pub fn chat(
        nickname: impl Into<String>,
        text: &str,
        tags: BTreeMap<String, String>,
        me: bool,
        current_nick: &str,
    ) -> Self {
        Self::user_line(MessageKind::Normal, nickname.into(), text, tags, me, current_nick)
    }

    pub fn notice(
        nickname: impl Into<String>,
        text: &str,
        tags: BTreeMap<String, String>,
        me: bool,
        current_nick: &str,
    ) -> Self {
        Self::user_line(MessageKind::Notice, nickname.into(), text, tags, me, current_nick)
    }

    pub fn event(event: EventType, text: impl Into<String>) -> Self {
        Self::build(MessageKind::Event(event), String::new(), text.into(), BTreeMap::new(), false)
    }

    /// Event caused by the local user.
    pub fn own_event(event: EventType, text: impl Into<String>) -> Self {
        Self::build(MessageKind::Event(event), String::new(), text.into(), BTreeMap::new(), true)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::build(MessageKind::Error, String::new(), text.into(), BTreeMap::new(), false)
    }

    fn user_line(
        kind: MessageKind,
        nickname: String,
        text: &str,
        tags: BTreeMap<String, String>,
        me: bool,
        current_nick: &str,
    ) -> Self {
        let (mut kind, text) = match parse_action(text) {
            Some(action) => (MessageKind::Action, action.to_string()),
            None => (kind, text.to_string()),
        };
        if !me && irc_contains(&text, current_nick) {
            kind = kind.highlighted();
        }
        Self::build(kind, nickname, text, tags, me)
    }

    fn build(
        kind: MessageKind,
        nickname: String,
        text: String,
        tags: BTreeMap<String, String>,
        me: bool,
    ) -> Self {
        let timestamp = tags
            .get("time")
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Local))
            .unwrap_or_else(Local::now);
        Self {
            timestamp,
            nickname,
            text,
            kind,
            me,
            tags,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Timestamp rendered with a chrono strftime pattern.
    pub fn formatted_time(&self, format: &str) -> String {
        self.timestamp.format(format).to_string()
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Text as received (formatting codes intact).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_me(&self) -> bool {
        self.me
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn is_history(&self) -> bool {
        self.tags.get(HISTORY_TAG).is_some_and(|v| v == "true")
    }

    /// Text without formatting codes; actions read `nick text`.
    pub fn plain_text(&self) -> String {
        let text = strip_formatting(&self.text);
        if self.kind.is_action() {
            format!("{} {}", self.nickname, text)
        } else {
            text
        }
    }
}
