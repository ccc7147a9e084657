//! Channel and user mode classification.
//!
//! Servers advertise four channel-mode groups through `CHANMODES` and the
//! privilege modes through `PREFIX`. Together they decide, for each mode
//! letter, whether an occurrence in a MODE string consumes a parameter:
//!
//! | Type | Group | Parameter when set | Parameter when unset |
//! |------|-------|--------------------|----------------------|
//! | P    | PREFIX | yes (nickname)    | yes (nickname)       |
//! | A    | list   | yes               | yes                  |
//! | B    | always | yes               | yes                  |
//! | C    | on set | yes               | no                   |
//! | D    | flag   | no                | no                   |

mod parse;

pub use parse::{apply_user_modes, display_user_modes, parse_channel_modes};

use crate::proto::isupport::{ChanModes, DEFAULT_CHANMODES, DEFAULT_PREFIX, PrefixSpec};
use std::fmt;
use tracing::warn;

/// Category of a channel mode letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeType {
    /// User privilege (op, voice, ...), stored on the member.
    Privilege,
    /// Type A: address list (bans, exceptions).
    List,
    /// Type B: setting that always carries a parameter (key).
    Parameter,
    /// Type C: setting with a parameter only when set (limit).
    SetParameter,
    /// Type D: boolean flag.
    Flag,
}

impl ModeType {
    /// Conventional single-letter tag (`P`, `A`-`D`).
    pub fn as_char(self) -> char {
        match self {
            Self::Privilege => 'P',
            Self::List => 'A',
            Self::Parameter => 'B',
            Self::SetParameter => 'C',
            Self::Flag => 'D',
        }
    }

    /// Whether an occurrence with the given sign consumes a parameter.
    pub fn takes_param(self, adding: bool) -> bool {
        match self {
            Self::Privilege | Self::List | Self::Parameter => true,
            Self::SetParameter => adding,
            Self::Flag => false,
        }
    }
}

/// Mode alphabet advertised by one server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSpec {
    prefix: PrefixSpec,
    chanmodes: ChanModes,
}

impl ModeSpec {
    pub fn new(prefix: PrefixSpec, chanmodes: ChanModes) -> Self {
        Self { prefix, chanmodes }
    }

    /// Build from raw `PREFIX` and `CHANMODES` values, falling back to the
    /// conventional defaults when either is absent or malformed.
    pub fn from_isupport(prefix: Option<&str>, chanmodes: Option<&str>) -> Self {
        let prefix = match prefix.filter(|p| !p.is_empty()) {
            Some(raw) => PrefixSpec::parse(raw).unwrap_or_else(|| {
                warn!(prefix = %raw, default = DEFAULT_PREFIX, "Invalid PREFIX, using default");
                PrefixSpec::default()
            }),
            None => PrefixSpec::default(),
        };
        let chanmodes = match chanmodes.filter(|c| !c.is_empty()) {
            Some(raw) => ChanModes::parse(raw).unwrap_or_else(|| {
                warn!(chanmodes = %raw, default = DEFAULT_CHANMODES, "Invalid CHANMODES, using default");
                ChanModes::default()
            }),
            None => ChanModes::default(),
        };
        Self { prefix, chanmodes }
    }

    pub fn prefix(&self) -> &PrefixSpec {
        &self.prefix
    }

    pub fn chanmodes(&self) -> &ChanModes {
        &self.chanmodes
    }

    /// Classify a mode letter; `None` for letters the server never advertised.
    pub fn classify(&self, letter: char) -> Option<ModeType> {
        if self.prefix.is_prefix_mode(letter) {
            Some(ModeType::Privilege)
        } else if self.chanmodes.a.contains(letter) {
            Some(ModeType::List)
        } else if self.chanmodes.b.contains(letter) {
            Some(ModeType::Parameter)
        } else if self.chanmodes.c.contains(letter) {
            Some(ModeType::SetParameter)
        } else if self.chanmodes.d.contains(letter) {
            Some(ModeType::Flag)
        } else {
            None
        }
    }

    /// Display symbol for a privilege mode letter.
    pub fn symbol_for(&self, letter: char) -> Option<char> {
        self.prefix.prefix_for_mode(letter)
    }
}

/// One applied occurrence from a MODE string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub letter: char,
    pub adding: bool,
    pub mode_type: ModeType,
    /// Nickname for privilege modes, value for parameterized modes.
    pub param: Option<String>,
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.adding { '+' } else { '-' };
        match &self.param {
            Some(param) => write!(f, "{}{} {}", sign, self.letter, param),
            None => write!(f, "{}{}", sign, self.letter),
        }
    }
}
