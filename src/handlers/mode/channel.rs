//! Channel MODE application.

use super::super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::mode::{ModeType, parse_channel_modes};
use crate::state::{EventType, HasWindow, Message};
use tracing::debug;

pub(super) fn apply(
    ctx: &mut Context<'_>,
    setter: &str,
    name: &str,
    modes: &str,
    params: &[String],
) -> HandlerResult {
    let spec = ctx.mode_spec();
    let channel = ctx
        .state
        .channel_by_name_mut(name)
        .ok_or_else(|| HandlerError::UnknownChannel(name.to_string()))?;

    let changes = parse_channel_modes(&spec, modes, params);
    let mut resort = false;

    for change in &changes {
        match change.mode_type {
            ModeType::Privilege => {
                let (Some(nick), Some(symbol)) = (change.param.as_deref(), spec.symbol_for(change.letter))
                else {
                    continue;
                };
                match channel.user_mut(nick) {
                    Some(user) if change.adding => user.grant(symbol, spec.prefix()),
                    Some(user) => user.revoke(symbol),
                    None => {
                        debug!(channel = %name, nick = %nick, "Privilege change for unknown member");
                    }
                }
                resort = true;
            }
            mode_type => {
                channel.set_mode(mode_type, change.letter, change.param.clone(), change.adding);
            }
        }
        channel.add_message(Message::event(
            EventType::Mode,
            format!("{} sets mode {}", setter, change),
        ));
    }

    if resort {
        channel.sort_users(spec.prefix());
    }
    Ok(())
}
