//! CTCP (Client-to-Client Protocol) envelopes carried in PRIVMSG/NOTICE.
//!
//! ```
//! use slirc_client::proto::ctcp::{format_ctcp, CtcpKind, CtcpMessage};
//!
//! let wire = format_ctcp("VERSION", "");
//! let ctcp = CtcpMessage::parse(&wire).unwrap();
//! assert_eq!(ctcp.kind, CtcpKind::Version);
//! assert!(ctcp.params.is_empty());
//! assert!(ctcp.is_query);
//! ```

use std::fmt;

/// CTCP delimiter byte.
pub const CTCP_DELIM: char = '\x01';

/// Shortest CTCP body: two delimiters around a one-letter command. Short
/// bare queries such as `\x01PING\x01` and `\x01TIME\x01` fall above it.
const MIN_CTCP_LEN: usize = 3;

/// CTCP command names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtcpKind {
    Action,
    Version,
    Ping,
    Time,
    Clientinfo,
    Unknown(String),
}

impl CtcpKind {
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "ACTION" => Self::Action,
            "VERSION" => Self::Version,
            "PING" => Self::Ping,
            "TIME" => Self::Time,
            "CLIENTINFO" => Self::Clientinfo,
            _ => Self::Unknown(name.to_ascii_uppercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "ACTION",
            Self::Version => "VERSION",
            Self::Ping => "PING",
            Self::Time => "TIME",
            Self::Clientinfo => "CLIENTINFO",
            Self::Unknown(s) => s,
        }
    }
}

impl fmt::Display for CtcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed non-ACTION CTCP envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CtcpMessage {
    pub kind: CtcpKind,
    /// Everything after the command, empty when absent.
    pub params: String,
    /// `true` for queries (PRIVMSG), `false` for replies (NOTICE).
    pub is_query: bool,
}

impl CtcpMessage {
    /// Parse a message body as a CTCP query.
    ///
    /// Returns `None` for ordinary text, ACTION payloads, and envelopes
    /// shorter than the minimum length.
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() < MIN_CTCP_LEN {
            return None;
        }
        let inner = text.strip_prefix(CTCP_DELIM)?.strip_suffix(CTCP_DELIM)?;
        let (command, params) = inner.split_once(' ').unwrap_or((inner, ""));
        if command.is_empty() {
            return None;
        }
        let kind = CtcpKind::parse(command);
        if kind == CtcpKind::Action {
            return None;
        }
        Some(Self {
            kind,
            params: params.to_string(),
            is_query: true,
        })
    }

    /// Parse a NOTICE body as a CTCP reply.
    pub fn parse_reply(text: &str) -> Option<Self> {
        Self::parse(text).map(|ctcp| Self {
            is_query: false,
            ..ctcp
        })
    }
}

/// Format a CTCP envelope: `\x01CMD\x01` or `\x01CMD params\x01`.
pub fn format_ctcp(command: &str, params: &str) -> String {
    if params.is_empty() {
        format!("{CTCP_DELIM}{command}{CTCP_DELIM}")
    } else {
        format!("{CTCP_DELIM}{command} {params}{CTCP_DELIM}")
    }
}

/// Extract the text of an `\x01ACTION ...\x01` payload.
pub fn parse_action(text: &str) -> Option<&str> {
    let inner = text.strip_prefix(CTCP_DELIM)?.strip_suffix(CTCP_DELIM)?;
    let rest = inner.strip_prefix("ACTION")?;
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some(rest.trim())
}
