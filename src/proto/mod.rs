//! Protocol-level value types shared by the transport boundary and dispatch.
//!
//! - [`message`]: parsed inbound/outbound IRC message and batch
//! - [`casemap`]: RFC 1459 case mapping
//! - [`isupport`]: PREFIX / CHANMODES token parsing
//! - [`ctcp`]: CTCP envelope parse/format
//! - [`numeric`]: numeric reply codes the engine reacts to
//! - [`format`]: mIRC formatting code stripping

pub mod casemap;
pub mod ctcp;
pub mod format;
pub mod isupport;
pub mod message;
pub mod numeric;

pub use casemap::{irc_eq, irc_to_lower};
pub use ctcp::{CtcpKind, CtcpMessage};
pub use isupport::{ChanModes, PrefixSpec};
pub use message::{Batch, IrcMessage, MessageParseError};
