//! User mode handling: MODE on our own nick and RPL_UMODEIS.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::mode::{apply_user_modes, display_user_modes};
use crate::proto::IrcMessage;
use crate::state::{EventType, Message};

pub(super) fn apply(ctx: &mut Context<'_>, modes: &str) {
    let updated = apply_user_modes(ctx.state.user_modes(), modes);
    ctx.state.set_user_modes(updated);
    let line = format!("Your modes changed: {}", display_user_modes(modes));
    ctx.server_message(Message::own_event(EventType::Mode, line));
}

/// RPL_UMODEIS: `<me> <modes>`, replacing the mode string wholesale.
pub struct UserModeIsHandler;

impl Handler for UserModeIsHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let modes = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
        ctx.state.set_user_modes(modes.trim_start_matches('+'));
        ctx.server_message(Message::own_event(
            EventType::Mode,
            format!("Your modes changed: {}", modes),
        ));
        Ok(())
    }
}
