//! WHOIS reply numerics.
//!
//! Each line of the reply is appended to the session window as a WHOIS
//! event. The account line and the end marker get their own wording.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::proto::numeric::{
    RPL_ENDOFWHOIS, RPL_WHOISACCOUNT, RPL_WHOISACTUALLY, RPL_WHOISMODES,
};
use crate::state::{EventType, Message};

pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let line = match msg.command.as_str() {
            RPL_WHOISACCOUNT => {
                let (Some(nick), Some(account)) = (msg.arg(1), msg.arg(2)) else {
                    return Err(HandlerError::NeedMoreParams);
                };
                let text = msg.text_from(3);
                let text = text.trim();
                let text = if text.is_empty() { "is logged in as" } else { text };
                format!("WHOIS {} {} {}", nick, text, account)
            }
            RPL_ENDOFWHOIS => {
                let nick = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
                format!("WHOIS END {}", nick)
            }
            // These carry no leading client parameter worth dropping.
            RPL_WHOISACTUALLY | RPL_WHOISMODES => format!("WHOIS: {}", msg.text_from(0)),
            _ => format!("WHOIS: {}", msg.text_from(1)),
        };
        ctx.server_message(Message::event(EventType::Whois, line));
        Ok(())
    }
}
