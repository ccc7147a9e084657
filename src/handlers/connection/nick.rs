//! NICK handler.
//!
//! Renames the member in every channel that lists the old nickname and any
//! open query with them. Our own rename is also reported in the session
//! window.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message};
use tracing::info;

pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let new = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let old = msg.nick();
        if old.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        // The transport may already report the new nickname.
        if ctx.is_me(old) || ctx.is_me(new) {
            ctx.server_message(Message::own_event(
                EventType::Nick,
                format!("Your nickname changed to {}", new),
            ));
            info!(old = %old, new = %new, "Nickname changed");
        }

        let prefix = ctx.prefix_spec();
        for channel in ctx.state.channels_mut() {
            if channel.rename_user(old, new, &prefix) {
                channel.add_message(Message::event(
                    EventType::Nick,
                    format!("{} is now known as {}", old, new),
                ));
            }
        }

        if let Some(query) = ctx.state.query_by_name_mut(old) {
            query.rename(new);
            query.add_message(Message::event(
                EventType::Nick,
                format!("{} is now known as {}", old, new),
            ));
            ctx.state.resort_queries();
        }
        Ok(())
    }
}
