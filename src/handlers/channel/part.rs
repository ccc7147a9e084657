//! PART handler.
//!
//! Our own PART closes the channel window; anyone else's removes them from
//! the member list.

use super::super::{Context, Handler};
use super::unknown_channel;
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message};
use tracing::info;

pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let name = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let nick = msg.nick();

        if ctx.is_me(nick) {
            let id = ctx
                .state
                .channel_by_name(name)
                .map(|c| c.id().to_string())
                .ok_or_else(|| unknown_channel(name))?;
            ctx.state.remove_channel(&id);
            info!(channel = %name, "Left channel");
            return Ok(());
        }

        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        channel.remove_user(nick);
        channel.add_message(Message::event(
            EventType::Part,
            format!("{} has parted {}", msg.source(), name),
        ));
        Ok(())
    }
}
