//! PRIVMSG and NOTICE handlers.
//!
//! Both route by target: a channel we are in, our own nickname (the query
//! with the sender), or, for echoed lines we sent, the query with the
//! target.

mod notice;
mod privmsg;

pub use notice::NoticeHandler;
pub use privmsg::PrivmsgHandler;

use super::Context;
use crate::proto::IrcMessage;

/// Where a user line lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Route {
    Channel(String),
    /// Query keyed by peer nickname.
    Query(String),
    Unsupported,
}

pub(super) fn route(ctx: &Context<'_>, msg: &IrcMessage, target: &str) -> Route {
    if ctx.is_channel(target) {
        Route::Channel(target.to_string())
    } else if ctx.is_me(target) {
        Route::Query(msg.nick().to_string())
    } else if ctx.is_me(msg.nick()) {
        Route::Query(target.to_string())
    } else {
        Route::Unsupported
    }
}
