//! JOIN handler.
//!
//! ## Behavior
//! - Our own JOIN opens the channel window (or reuses an open one) and, for
//!   a newly opened window, requests recent history when the server offers
//!   `draft/chathistory`
//! - Anyone else's JOIN adds them to the member list of a channel we are in
//! - JOINs for channels we have no window for are referential errors

use super::super::{Context, Handler};
use super::unknown_channel;
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message};
use tracing::info;

/// Capability that enables history replay on join.
const CHATHISTORY_CAP: &str = "draft/chathistory";

/// Number of lines requested when replaying history.
const HISTORY_LIMIT: u32 = 100;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let name = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let nick = msg.nick();

        if ctx.is_me(nick) {
            let is_new = ctx.state.channel_by_name(name).is_none();
            let channel = ctx.state.add_channel(name);
            channel.add_message(Message::own_event(
                EventType::Join,
                format!("You have joined {}", name),
            ));
            if is_new && ctx.transport.has_capability(CHATHISTORY_CAP) {
                ctx.queue_raw(format!("CHATHISTORY LATEST {} * {}", name, HISTORY_LIMIT));
            }
            info!(channel = %name, new = is_new, "Joined channel");
            return Ok(());
        }

        let prefix = ctx.prefix_spec();
        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        channel.upsert_user(nick, "", &prefix);
        channel.add_message(Message::event(
            EventType::Join,
            format!("{} has joined {}", msg.source(), name),
        ));
        Ok(())
    }
}
