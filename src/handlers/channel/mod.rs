//! Channel membership and topic handlers.
//!
//! Handles JOIN, PART, KICK, TOPIC, RPL_TOPIC, RPL_TOPICWHOTIME and
//! RPL_NAMREPLY.

mod join;
mod kick;
mod names;
mod part;
mod topic;

pub use join::JoinHandler;
pub use kick::KickHandler;
pub use names::NamesHandler;
pub use part::PartHandler;
pub use topic::{TopicHandler, TopicReplyHandler, TopicWhoTimeHandler};

use crate::error::HandlerError;

pub(super) fn unknown_channel(name: &str) -> HandlerError {
    HandlerError::UnknownChannel(name.to_string())
}
