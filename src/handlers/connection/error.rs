//! ERROR and registration failure numerics.

use super::super::{Context, Handler};
use crate::error::HandlerResult;
use crate::proto::IrcMessage;
use crate::state::Message;
use tracing::warn;

/// ERROR from the server: the link is going away.
pub struct ErrorHandler;

impl Handler for ErrorHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let text = msg.text_from(0);
        warn!(host = %ctx.hostname, error = %text, "Server sent ERROR");
        ctx.server_message(Message::error(text));
        ctx.request_reconnect();
        Ok(())
    }
}

/// ERR_NICKNAMEINUSE: `<me> <nick> :<text>`.
pub struct NicknameInUseHandler;

impl Handler for NicknameInUseHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let nick = msg.arg(1).unwrap_or_default();
        ctx.server_message(Message::error(format!("Nickname in use: {}", nick)));
        Ok(())
    }
}

/// ERR_PASSWDMISMATCH: `<me> :<text>`.
pub struct PasswordMismatchHandler;

impl Handler for PasswordMismatchHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        ctx.server_message(Message::error(format!(
            "Password Mismatch: {}",
            msg.text_from(1)
        )));
        Ok(())
    }
}
