//! KICK handler.

use super::super::{Context, Handler};
use super::unknown_channel;
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message};
use tracing::info;

pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let (Some(name), Some(target)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        let kicker = msg.nick();
        let reason = msg.text_from(2);

        if ctx.is_me(target) {
            let id = ctx
                .state
                .channel_by_name(name)
                .map(|c| c.id().to_string())
                .ok_or_else(|| unknown_channel(name))?;
            ctx.state.remove_channel(&id);
            ctx.server_message(Message::own_event(
                EventType::Kick,
                format!("{} has kicked you from {} ({})", kicker, name, reason),
            ));
            info!(channel = %name, by = %kicker, "Kicked from channel");
            return Ok(());
        }

        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        channel.remove_user(target);
        channel.add_message(Message::event(
            EventType::Kick,
            format!("{} has kicked {} from {} ({})", kicker, target, name, reason),
        ));
        Ok(())
    }
}
