//! CTCP query and reply handling.
//!
//! Only VERSION is answered; other CTCP commands are logged and dropped.

use super::Context;
use crate::proto::ctcp::{CtcpKind, CtcpMessage, format_ctcp};
use crate::proto::IrcMessage;
use crate::state::{EventType, Message};
use tracing::debug;

/// Client identification sent in VERSION replies.
pub const CTCP_VERSION_REPLY: &str = "slirc-client";

/// A CTCP query arriving in a PRIVMSG.
pub fn handle_ctcp_query(ctx: &mut Context<'_>, msg: &IrcMessage, ctcp: &CtcpMessage) {
    let nick = msg.nick();
    if nick.is_empty() || ctx.is_me(nick) {
        return;
    }
    match ctcp.kind {
        CtcpKind::Version => {
            ctx.queue_raw(format!(
                "NOTICE {} :{}",
                nick,
                format_ctcp("VERSION", CTCP_VERSION_REPLY)
            ));
            ctx.server_message(Message::event(
                EventType::Ctcp,
                format!("CTCP VERSION query from {}", nick),
            ));
        }
        ref kind => debug!(command = %kind, from = %nick, "Unhandled CTCP query"),
    }
}

/// A CTCP reply arriving in a NOTICE.
pub fn handle_ctcp_reply(ctx: &mut Context<'_>, msg: &IrcMessage, ctcp: &CtcpMessage) {
    let nick = msg.nick();
    match ctcp.kind {
        CtcpKind::Version => ctx.server_message(Message::event(
            EventType::Ctcp,
            format!("CTCP VERSION reply from {}: {}", nick, ctcp.params),
        )),
        ref kind => debug!(command = %kind, from = %nick, "Unhandled CTCP reply"),
    }
}
