//! Session model: windows, channels, queries, members, topics and log lines.

mod channel;
mod message;
mod query;
mod topic;
mod uid;
mod user;
mod window;

pub use channel::{Channel, ChannelMode};
pub use message::{EventType, Message, MessageKind};
pub use query::Query;
pub use topic::{NO_TOPIC, Topic};
pub use uid::{IdGenerator, WindowId};
pub use user::{User, compare_users};
pub use window::{HasWindow, Window, WindowState};
