//! Inbound event handlers.
//!
//! Every handler runs under the owning session's lock with a [`Context`]
//! that exposes the session model, read-only transport getters and an
//! outbox for lines to send once the lock is released.

mod batch;
mod channel;
mod connection;
mod core;
mod ctcp;
mod messaging;
mod mode;
mod user_query;

pub use self::core::{Context, Effects, Handler, Registry};
pub use batch::unpack_batch;
pub use channel::{
    JoinHandler, KickHandler, NamesHandler, PartHandler, TopicHandler, TopicReplyHandler,
    TopicWhoTimeHandler,
};
pub use connection::{
    ErrorHandler, NickHandler, NicknameInUseHandler, PasswordMismatchHandler, QuitHandler,
    handle_connected, handle_disconnected,
};
pub use ctcp::{CTCP_VERSION_REPLY, handle_ctcp_query, handle_ctcp_reply};
pub use messaging::{NoticeHandler, PrivmsgHandler};
pub use mode::{ModeHandler, UserModeIsHandler};
pub use user_query::WhoisHandler;
