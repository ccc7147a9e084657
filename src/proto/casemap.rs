//! RFC 1459 case mapping.
//!
//! Channel names and nicknames compare case-insensitively with `[]\~`
//! folded onto `{}|^`.

#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive equality under RFC 1459 folding.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .zip(b.chars())
            .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

/// Case-insensitive substring test used for highlight detection.
pub fn irc_contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && irc_to_lower(haystack).contains(&irc_to_lower(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irc_lower_char() {
        assert_eq!(irc_lower_char('Q'), 'q');
        assert_eq!(irc_lower_char('['), '{');
        assert_eq!(irc_lower_char('~'), '^');
        assert_eq!(irc_lower_char('#'), '#');
    }

    #[test]
    fn test_irc_eq() {
        assert!(irc_eq("#Rust", "#rust"));
        assert!(irc_eq("nick[away]", "NICK{AWAY}"));
        assert!(!irc_eq("#rust", "#rusty"));
        assert!(!irc_eq("alice", "alicf"));
    }

    #[test]
    fn test_irc_contains() {
        assert!(irc_contains("hey ALICE, ping", "alice"));
        assert!(!irc_contains("hey bob", "alice"));
        assert!(!irc_contains("anything", ""));
    }
}
