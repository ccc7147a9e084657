//! Topic handlers.
//!
//! TOPIC changes arrive with their setter; the join-time burst splits the
//! text (RPL_TOPIC) from who set it and when (RPL_TOPICWHOTIME).

use super::super::{Context, Handler};
use super::unknown_channel;
use crate::error::{HandlerError, HandlerResult};
use crate::proto::IrcMessage;
use crate::state::{EventType, HasWindow, Message, Topic};
use chrono::{Local, TimeZone};

/// TOPIC from a channel member.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let name = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let nick = msg.nick();
        let text = msg.text_from(1);

        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        let line = if text.is_empty() {
            format!("{} unset the topic", nick)
        } else {
            format!("{} changed the topic: {}", nick, text)
        };
        channel.set_topic(Topic::new(text, Some(nick.to_string()), Some(Local::now())));
        channel.add_message(Message::event(EventType::Topic, line));
        Ok(())
    }
}

/// RPL_TOPIC: `<me> <channel> :<text>`.
pub struct TopicReplyHandler;

impl Handler for TopicReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let name = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.text_from(2);

        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        channel.set_topic(Topic::new(text, None, None));
        Ok(())
    }
}

/// RPL_TOPICWHOTIME: `<me> <channel> <setter> <unix time>`.
pub struct TopicWhoTimeHandler;

impl Handler for TopicWhoTimeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &IrcMessage) -> HandlerResult {
        let (Some(name), Some(setter), Some(time)) = (msg.arg(1), msg.arg(2), msg.arg(3)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        let secs: i64 = time
            .parse()
            .map_err(|_| HandlerError::InvalidValue(time.to_string()))?;
        let set_time = Local
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| HandlerError::InvalidValue(time.to_string()))?;
        let set_by = setter.split('!').next().unwrap_or(setter).to_string();

        let channel = ctx
            .state
            .channel_by_name_mut(name)
            .ok_or_else(|| unknown_channel(name))?;
        let topic = channel.topic().with_setter(Some(set_by), Some(set_time));
        channel.set_topic(topic);
        Ok(())
    }
}
