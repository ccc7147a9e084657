//! PRIVMSG handler.
//!
//! ## Behavior
//! - CTCP envelopes (other than ACTION) go to the CTCP handler
//! - Channel lines land in the channel window
//! - Lines to us open (or reuse) the query with the sender
//! - Our own echoed lines land in the query with the target
//! - Lines from others that are not history replays are offered to the
//!   notification matcher

use super::super::ctcp::handle_ctcp_query;
use super::super::{Context, Handler};
use super::{Route, route};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::ctcp::CtcpMessage;
use crate::proto::IrcMessage;
use crate::state::{HasWindow, Message};

pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.text_from(1);

        if let Some(ctcp) = CtcpMessage::parse(&text) {
            handle_ctcp_query(ctx, msg, &ctcp);
            return Ok(());
        }

        let nick = msg.nick();
        let me = ctx.is_me(nick);
        let line = Message::chat(nick, &text, msg.tags.clone(), me, &ctx.current_nick());
        let notify = !me && !line.is_history();
        let plain = line.plain_text();

        let source = match route(ctx, msg, target) {
            Route::Channel(name) => {
                let channel = ctx
                    .state
                    .channel_by_name_mut(&name)
                    .ok_or(HandlerError::UnknownChannel(name))?;
                channel.add_message(line);
                channel.name().to_string()
            }
            Route::Query(peer) => {
                let query = ctx.state.add_query(&peer);
                query.add_message(line);
                query.name().to_string()
            }
            Route::Unsupported => return Err(HandlerError::UnsupportedTarget(target.to_string())),
        };

        if notify {
            ctx.notify(&source, nick, &plain);
        }
        Ok(())
    }
}
