//! NOTICE handler.
//!
//! Server notices (no source, or a host-like source without `@`) land in
//! the session window. CTCP replies go to the CTCP handler. Everything else
//! routes like PRIVMSG but never notifies.

use super::super::ctcp::handle_ctcp_reply;
use super::super::{Context, Handler};
use super::{Route, route};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::ctcp::CtcpMessage;
use crate::proto::IrcMessage;
use crate::state::{HasWindow, Message};

pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.text_from(1);

        if let Some(ctcp) = CtcpMessage::parse_reply(&text) {
            handle_ctcp_reply(ctx, msg, &ctcp);
            return Ok(());
        }

        let nick = msg.nick();
        let me = ctx.is_me(nick);
        let line = Message::notice(nick, &text, msg.tags.clone(), me, &ctx.current_nick());

        if is_server_source(msg.source()) {
            ctx.server_message(line);
            return Ok(());
        }

        match route(ctx, msg, target) {
            Route::Channel(name) => {
                let channel = ctx
                    .state
                    .channel_by_name_mut(&name)
                    .ok_or(HandlerError::UnknownChannel(name))?;
                channel.add_message(line);
            }
            Route::Query(peer) => ctx.state.add_query(&peer).add_message(line),
            Route::Unsupported => return Err(HandlerError::UnsupportedTarget(target.to_string())),
        }
        Ok(())
    }
}

fn is_server_source(source: &str) -> bool {
    source.is_empty() || (source.contains('.') && !source.contains('@'))
}
