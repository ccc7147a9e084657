//! MODE handlers.
//!
//! A MODE aimed at a channel is parsed against the server's mode alphabet
//! and applied to members (privileges) or to the channel's mode table. A
//! MODE aimed at us updates the session's user modes.

mod channel;
mod user;

pub use user::UserModeIsHandler;

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;

pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let modes = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;

        if ctx.is_channel(target) {
            let params = msg.args().get(2..).unwrap_or_default();
            channel::apply(ctx, msg.nick(), target, modes, params)
        } else if ctx.is_me(target) {
            user::apply(ctx, modes);
            Ok(())
        } else {
            Err(HandlerError::UnsupportedTarget(target.to_string()))
        }
    }
}
