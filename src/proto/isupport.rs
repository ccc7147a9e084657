//! Parsers for the ISUPPORT tokens the engine depends on.

/// Default `PREFIX` when the server advertises none.
pub const DEFAULT_PREFIX: &str = "(ov)@+";
/// Default `CHANMODES` when the server advertises none.
pub const DEFAULT_CHANMODES: &str = "beI,k,l,imnpst";
/// Default `CHANTYPES`.
pub const DEFAULT_CHANTYPES: &str = "#";
/// Default `LINELEN`.
pub const DEFAULT_LINELEN: usize = 512;

/// Parsed `PREFIX` token: privilege mode letters and their display symbols,
/// most senior first.
///
/// ```
/// use slirc_client::proto::PrefixSpec;
///
/// let spec = PrefixSpec::parse("(qaohv)~&@%+").unwrap();
/// assert_eq!(spec.prefix_for_mode('o'), Some('@'));
/// assert_eq!(spec.mode_for_prefix('+'), Some('v'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixSpec {
    pub modes: String,
    pub prefixes: String,
}

impl PrefixSpec {
    /// Parse a `PREFIX` value like `(ov)@+`. Both halves must be non-empty
    /// and the same length.
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix('(')?;
        let (modes, prefixes) = rest.split_once(')')?;
        if modes.is_empty() || modes.chars().count() != prefixes.chars().count() {
            return None;
        }
        Some(Self {
            modes: modes.to_string(),
            prefixes: prefixes.to_string(),
        })
    }

    #[inline]
    pub fn is_prefix_mode(&self, mode: char) -> bool {
        self.modes.contains(mode)
    }

    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        self.modes
            .chars()
            .position(|c| c == mode)
            .and_then(|i| self.prefixes.chars().nth(i))
    }

    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes
            .chars()
            .position(|c| c == prefix)
            .and_then(|i| self.modes.chars().nth(i))
    }

    /// Seniority of a prefix symbol (0 is most senior).
    pub fn rank(&self, prefix: char) -> Option<usize> {
        self.prefixes.chars().position(|c| c == prefix)
    }

    /// Split a NAMES token into its privilege prefix and bare nickname.
    pub fn split_name<'n>(&self, name: &'n str) -> (&'n str, &'n str) {
        let nick = name.trim_start_matches(|c| self.prefixes.contains(c));
        (&name[..name.len() - nick.len()], nick)
    }

    /// Reorder a privilege string most-senior first, dropping duplicates and
    /// symbols this server does not advertise.
    pub fn normalize(&self, privileges: &str) -> String {
        self.prefixes
            .chars()
            .filter(|p| privileges.contains(*p))
            .collect()
    }
}

impl Default for PrefixSpec {
    fn default() -> Self {
        Self {
            modes: "ov".to_string(),
            prefixes: "@+".to_string(),
        }
    }
}

/// Parsed `CHANMODES` token (`A,B,C,D`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChanModes {
    /// Type A: list modes (always parameterized).
    pub a: String,
    /// Type B: always parameterized.
    pub b: String,
    /// Type C: parameterized only when set.
    pub c: String,
    /// Type D: never parameterized.
    pub d: String,
}

impl ChanModes {
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(4, ',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(Self {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            d: d.to_string(),
        })
    }
}

impl Default for ChanModes {
    fn default() -> Self {
        Self {
            a: "beI".to_string(),
            b: "k".to_string(),
            c: "l".to_string(),
            d: "imnpst".to_string(),
        }
    }
}
