//! Parsed IRC messages as delivered by the transport.
//!
//! The transport owns line framing; this type only models an already-framed
//! line. `FromStr` exists so transports (and tests) can build messages from
//! wire text without a separate codec.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tag attached to messages replayed inside a `chathistory` batch.
pub const HISTORY_TAG: &str = "chathistory";

/// Errors from parsing a single protocol line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageParseError {
    #[error("empty line")]
    Empty,
    #[error("line has no command")]
    MissingCommand,
}

/// A single inbound or outbound protocol message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrcMessage {
    /// IRCv3 message tags (unescaped). Valueless tags map to an empty string.
    pub tags: BTreeMap<String, String>,
    /// Message source (`nick!user@host` or a server name).
    pub source: Option<String>,
    /// Command name or three-digit numeric, uppercased.
    pub command: String,
    /// Parameters, the trailing one included as the last element.
    pub params: Vec<String>,
}

impl IrcMessage {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into().to_ascii_uppercase(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_tag(key, value);
        self
    }

    /// Nickname portion of the source, or the whole source for servers.
    pub fn nick(&self) -> &str {
        match &self.source {
            Some(source) => source.split('!').next().unwrap_or(source),
            None => "",
        }
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }

    /// Get parameter at `index`.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.params
    }

    /// Parameters from `start` onwards joined by single spaces.
    pub fn text_from(&self, start: usize) -> String {
        self.params.get(start..).map(|p| p.join(" ")).unwrap_or_default()
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Whether this message was replayed from a history batch.
    pub fn is_history(&self) -> bool {
        self.tag(HISTORY_TAG) == Some("true")
    }

    pub fn mark_history(&mut self) {
        self.set_tag(HISTORY_TAG, "true");
    }
}

impl FromStr for IrcMessage {
    type Err = MessageParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut rest = line.trim_end_matches(['\r', '\n']).trim_start_matches(' ');
        if rest.is_empty() {
            return Err(MessageParseError::Empty);
        }

        let mut tags = BTreeMap::new();
        if let Some(stripped) = rest.strip_prefix('@') {
            let (raw, after) = stripped
                .split_once(' ')
                .ok_or(MessageParseError::MissingCommand)?;
            for item in raw.split(';').filter(|item| !item.is_empty()) {
                let (key, value) = item.split_once('=').unwrap_or((item, ""));
                tags.insert(key.to_string(), unescape_tag_value(value));
            }
            rest = after.trim_start_matches(' ');
        }

        let mut source = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (src, after) = stripped
                .split_once(' ')
                .ok_or(MessageParseError::MissingCommand)?;
            source = Some(src.to_string());
            rest = after.trim_start_matches(' ');
        }

        let (command, mut rest) = rest.split_once(' ').unwrap_or((rest, ""));
        if command.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_string());
                    rest = after;
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Ok(Self {
            tags,
            source,
            command: command.to_ascii_uppercase(),
            params,
        })
    }
}

impl fmt::Display for IrcMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tags.is_empty() {
            f.write_str("@")?;
            for (i, (key, value)) in self.tags.iter().enumerate() {
                if i > 0 {
                    f.write_str(";")?;
                }
                f.write_str(key)?;
                if !value.is_empty() {
                    write!(f, "={}", escape_tag_value(value))?;
                }
            }
            f.write_str(" ")?;
        }
        if let Some(source) = &self.source {
            write!(f, ":{} ", source)?;
        }
        f.write_str(&self.command)?;
        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if last.is_empty() || last.contains(' ') || last.starts_with(':') {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }
        Ok(())
    }
}

fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ';' => out.push_str("\\:"),
            ' ' => out.push_str("\\s"),
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Batches
// ============================================================================

/// A server-grouped sequence of messages (IRCv3 `batch`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Batch reference tag.
    pub reference: String,
    /// Batch type (e.g. `chathistory`, `netjoin`).
    pub batch_type: String,
    /// Type-specific parameters (e.g. the target for `chathistory`).
    pub params: Vec<String>,
    /// Messages delivered inside the batch, in order.
    pub items: Vec<IrcMessage>,
}

impl Batch {
    pub fn new(reference: impl Into<String>, batch_type: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            batch_type: batch_type.into(),
            ..Self::default()
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn push(&mut self, item: IrcMessage) {
        self.items.push(item);
    }

    pub fn is_chathistory(&self) -> bool {
        self.batch_type.eq_ignore_ascii_case("chathistory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let msg: IrcMessage = "@time=2024-01-01T00:00:00.000Z;msgid=abc :alice!a@host PRIVMSG #chan :hello there"
            .parse()
            .unwrap();
        assert_eq!(msg.tag("time"), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(msg.tag("msgid"), Some("abc"));
        assert_eq!(msg.source(), "alice!a@host");
        assert_eq!(msg.nick(), "alice");
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.arg(0), Some("#chan"));
        assert_eq!(msg.arg(1), Some("hello there"));
    }

    #[test]
    fn test_parse_without_trailing() {
        let msg: IrcMessage = "mode #chan +ov alice bob".parse().unwrap();
        assert_eq!(msg.command, "MODE");
        assert_eq!(msg.params, vec!["#chan", "+ov", "alice", "bob"]);
        assert!(msg.source.is_none());
    }

    #[test]
    fn test_parse_empty_trailing() {
        let msg: IrcMessage = ":bob!b@h TOPIC #chan :".parse().unwrap();
        assert_eq!(msg.params, vec!["#chan", ""]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<IrcMessage>(), Err(MessageParseError::Empty));
        assert_eq!(
            ":onlysource".parse::<IrcMessage>(),
            Err(MessageParseError::MissingCommand)
        );
    }

    #[test]
    fn test_tag_escaping() {
        let msg: IrcMessage = r"@note=a\sb\:c\\d PING x".parse().unwrap();
        assert_eq!(msg.tag("note"), Some(r"a b;c\d"));
        assert_eq!(msg.to_string(), r"@note=a\sb\:c\\d PING x");
    }

    #[test]
    fn test_display_trailing() {
        let msg = IrcMessage::new("privmsg").with_params(["#chan", "hi all"]);
        assert_eq!(msg.to_string(), "PRIVMSG #chan :hi all");
        let msg = IrcMessage::new("JOIN").with_params(["#chan"]);
        assert_eq!(msg.to_string(), "JOIN #chan");
    }

    #[test]
    fn test_text_from() {
        let msg = IrcMessage::new("ERROR").with_params(["Closing", "link"]);
        assert_eq!(msg.text_from(0), "Closing link");
        assert_eq!(msg.text_from(5), "");
    }

    #[test]
    fn test_history_marker() {
        let mut msg = IrcMessage::new("PRIVMSG");
        assert!(!msg.is_history());
        msg.mark_history();
        assert!(msg.is_history());
    }

    #[test]
    fn test_server_source_nick() {
        let msg: IrcMessage = ":irc.example.net NOTICE * :hi".parse().unwrap();
        assert_eq!(msg.nick(), "irc.example.net");
    }
}
