//! Channel membership records.

use crate::proto::casemap::irc_to_lower;
use crate::proto::isupport::PrefixSpec;
use std::cmp::Ordering;

/// A member of one channel.
///
/// The same nickname in two channels is two independent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub nickname: String,
    /// Privilege symbols, most senior first (e.g. `@+`).
    pub modes: String,
}

impl User {
    pub fn new(nickname: impl Into<String>, modes: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            modes: modes.into(),
        }
    }

    /// Nickname prefixed with the highest privilege symbol, as in NAMES.
    pub fn display_name(&self) -> String {
        match self.modes.chars().next() {
            Some(symbol) => format!("{}{}", symbol, self.nickname),
            None => self.nickname.clone(),
        }
    }

    /// Grant a privilege symbol, keeping the string normalized.
    pub fn grant(&mut self, symbol: char, prefix: &PrefixSpec) {
        let mut modes = self.modes.clone();
        modes.push(symbol);
        self.modes = prefix.normalize(&modes);
    }

    /// Revoke every occurrence of a privilege symbol. No-op if not held.
    pub fn revoke(&mut self, symbol: char) {
        self.modes.retain(|c| c != symbol);
    }
}

/// Member ordering: most senior privilege first, then nickname.
pub fn compare_users(a: &User, b: &User, prefix: &PrefixSpec) -> Ordering {
    let rank = |user: &User| {
        user.modes
            .chars()
            .next()
            .and_then(|symbol| prefix.rank(symbol))
            .unwrap_or(usize::MAX)
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| irc_to_lower(&a.nickname).cmp(&irc_to_lower(&b.nickname)))
}
