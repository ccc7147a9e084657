//! QUIT handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message};

pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let nick = msg.nick();
        if nick.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }
        let line = format!("{} has quit ({})", msg.source(), msg.text_from(0));

        // Only channels that listed the user hear about it.
        for channel in ctx.state.channels_mut() {
            if channel.remove_user(nick) {
                channel.add_message(Message::event(EventType::Quit, line.clone()));
            }
        }
        Ok(())
    }
}
