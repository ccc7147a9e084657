//! RPL_NAMREPLY handler.
//!
//! `<me> <symbol> <channel> :<names>` where each name carries zero or more
//! privilege symbols and, with `userhost-in-names`, a `!user@host` suffix.
//! Replies are merged into the member list, so a replay leaves it unchanged.

use super::super::{Context, Handler};
use super::unknown_channel;
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;

pub struct NamesHandler;

impl Handler for NamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let (Some(name), Some(names)) = (msg.arg(2), msg.arg(3)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        let prefix = ctx.prefix_spec();
        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;

        for entry in names.split_whitespace() {
            let (modes, nick) = prefix.split_name(entry);
            let nick = nick.split('!').next().unwrap_or(nick);
            if nick.is_empty() {
                continue;
            }
            channel.upsert_user(nick, modes, &prefix);
        }
        Ok(())
    }
}
