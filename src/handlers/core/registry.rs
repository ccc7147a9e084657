//! Event handler registry and dispatch.

use super::context::{Context, Handler};
use crate::handlers::{
    channel::{
        JoinHandler, KickHandler, NamesHandler, PartHandler, TopicHandler, TopicReplyHandler,
        TopicWhoTimeHandler,
    },
    connection::{
        ErrorHandler, NickHandler, NicknameInUseHandler, PasswordMismatchHandler, QuitHandler,
    },
    messaging::{NoticeHandler, PrivmsgHandler},
    mode::{ModeHandler, UserModeIsHandler},
    user_query::WhoisHandler,
};
use crate::proto::IrcMessage;
use crate::proto::numeric::*;
use std::collections::HashMap;
use tracing::{debug, debug_span, trace, warn};

/// Numerics that carry one line of a WHOIS reply.
const WHOIS_NUMERICS: &[&str] = &[
    RPL_WHOISCERTFP,
    RPL_WHOISREGNICK,
    RPL_WHOISUSER,
    RPL_WHOISSERVER,
    RPL_WHOISOPERATOR,
    RPL_WHOISIDLE,
    RPL_ENDOFWHOIS,
    RPL_WHOISCHANNELS,
    RPL_WHOISACCOUNT,
    RPL_WHOISBOT,
    RPL_WHOISACTUALLY,
    RPL_WHOISMODES,
    RPL_WHOISSECURE,
];

/// Registry of event handlers keyed by command or three-digit numeric.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a registry with every handler registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Channel membership
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));
        handlers.insert("KICK", Box::new(KickHandler));
        handlers.insert("TOPIC", Box::new(TopicHandler));
        handlers.insert(RPL_TOPIC, Box::new(TopicReplyHandler));
        handlers.insert(RPL_TOPICWHOTIME, Box::new(TopicWhoTimeHandler));
        handlers.insert(RPL_NAMREPLY, Box::new(NamesHandler));

        // Users and connection
        handlers.insert("QUIT", Box::new(QuitHandler));
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("ERROR", Box::new(ErrorHandler));
        handlers.insert(ERR_NICKNAMEINUSE, Box::new(NicknameInUseHandler));
        handlers.insert(ERR_PASSWDMISMATCH, Box::new(PasswordMismatchHandler));

        // Modes
        handlers.insert("MODE", Box::new(ModeHandler));
        handlers.insert(RPL_UMODEIS, Box::new(UserModeIsHandler));

        // Messaging
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("NOTICE", Box::new(NoticeHandler));

        for &code in WHOIS_NUMERICS {
            handlers.insert(code, Box::new(WhoisHandler));
        }

        Self { handlers }
    }

    /// Whether an event with this command has a handler.
    pub fn handles(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Dispatch one event.
    ///
    /// Handler errors are logged and dropped: the event leaves the model as
    /// it was.
    pub fn dispatch(&self, ctx: &mut Context<'_>, msg: &IrcMessage) {
        let Some(handler) = self.handlers.get(msg.command.as_str()) else {
            trace!(command = %msg.command, "No handler for event");
            return;
        };

        let span = debug_span!("dispatch", command = %msg.command, source = %msg.source());
        let _enter = span.enter();

        if let Err(e) = handler.handle(ctx, msg) {
            if e.is_malformed() {
                debug!(error = %e, code = e.error_code(), "Dropping malformed event");
            } else {
                warn!(error = %e, code = e.error_code(), "Ignoring event");
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
