//! Integration tests for PRIVMSG/NOTICE routing, echo and notifications.

mod common;

use common::{TestSession, channel_id, query_id};
use slirc_client::SessionError;
use slirc_client::proto::{Batch, IrcMessage};
use slirc_client::state::{EventType, MessageKind, WindowState};

#[tokio::test]
async fn test_channel_message_routed_and_notified() {
    let mut test = TestSession::in_channel("#rust").await;
    test.deliver(":bob!b@host PRIVMSG #rust :hello there");

    let id = channel_id(&test.session, "#rust").unwrap();
    let messages = test.session.messages(&id).unwrap();
    let last = messages.last().unwrap();
    assert_eq!(last.nickname(), "bob");
    assert_eq!(last.text(), "hello there");
    assert_eq!(last.kind(), MessageKind::Normal);
    assert_eq!(test.session.window_state(&id), Some(WindowState::UnreadMessage));

    let notification = test.try_notification().unwrap();
    assert_eq!(notification.title, "bob (#rust)");
    assert_eq!(notification.text, "hello there");
    assert!(notification.popup);
}

#[tokio::test]
async fn test_message_to_unknown_channel_dropped() {
    let mut test = TestSession::connected().await;
    test.deliver(":bob!b@host PRIVMSG #nowhere :hi");
    assert!(test.session.channel_ids().is_empty());
    assert!(test.try_notification().is_none());
}

#[tokio::test]
async fn test_private_message_opens_query() {
    let mut test = TestSession::connected().await;
    test.deliver(":bob!b@host PRIVMSG alice :psst");
    test.deliver(":Bob!b@host PRIVMSG alice :again");

    assert_eq!(test.session.query_ids().len(), 1);
    let id = query_id(&test.session, "bob").unwrap();
    assert!(id.starts_with('q'));
    assert_eq!(test.window_lines(&id), ["psst", "again"]);

    let notification = test.try_notification().unwrap();
    assert_eq!(notification.title, "bob (bob)");
}

#[tokio::test]
async fn test_echoed_own_message_goes_to_target_query() {
    let mut test = TestSession::connected().await;
    test.deliver(":alice!a@host PRIVMSG bob :hi bob");

    let id = query_id(&test.session, "bob").unwrap();
    let messages = test.session.messages(&id).unwrap();
    assert!(messages[0].is_me());
    assert!(query_id(&test.session, "alice").is_none());
    assert!(test.try_notification().is_none());
}

#[tokio::test]
async fn test_message_between_others_is_dropped() {
    let test = TestSession::connected().await;
    test.deliver(":bob!b@host PRIVMSG carol :not for us");
    assert!(test.session.query_ids().is_empty());
}

#[tokio::test]
async fn test_highlight_and_action() {
    let test = TestSession::in_channel("#rust").await;
    test.deliver(":bob!b@host PRIVMSG #rust :ALICE: ping");
    test.deliver(":bob!b@host PRIVMSG #rust :\x01ACTION waves\x01");

    let id = channel_id(&test.session, "#rust").unwrap();
    let messages = test.session.messages(&id).unwrap();
    let n = messages.len();
    assert_eq!(messages[n - 2].kind(), MessageKind::Highlight);
    assert_eq!(messages[n - 1].kind(), MessageKind::Action);
    assert_eq!(messages[n - 1].text(), "waves");
    assert_eq!(messages[n - 1].plain_text(), "bob waves");
    assert_eq!(test.session.window_state(&id), Some(WindowState::UnreadHighlight));
}

#[tokio::test]
async fn test_history_batch_renders_without_notifying() {
    let mut test = TestSession::in_channel("#rust").await;
    let mut batch = Batch::new("h1", "chathistory").with_params(["#rust"]);
    for text in ["old one", "old two alice"] {
        batch.push(
            IrcMessage::new("PRIVMSG")
                .with_source("bob!b@host")
                .with_tag("time", "2024-01-01T12:00:00.000Z")
                .with_params(["#rust", text]),
        );
    }
    test.transport.deliver_batch(batch);

    let id = channel_id(&test.session, "#rust").unwrap();
    let messages = test.session.messages(&id).unwrap();
    let history: Vec<_> = messages.iter().filter(|m| m.is_history()).collect();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].timestamp().timestamp(), 1_704_110_400);
    assert!(test.try_notification().is_none());
}

#[tokio::test]
async fn test_server_notice_lands_in_session_window() {
    let mut test = TestSession::connected().await;
    test.deliver(":irc.example.net NOTICE * :*** Looking up your hostname");
    test.deliver("NOTICE alice :no prefix at all");

    let lines = test.server_lines();
    assert!(lines.contains(&"*** Looking up your hostname".to_string()));
    assert!(lines.contains(&"no prefix at all".to_string()));
    assert!(test.session.query_ids().is_empty());
    assert!(test.try_notification().is_none());
}

#[tokio::test]
async fn test_user_notice_routed_to_query() {
    let mut test = TestSession::connected().await;
    test.deliver(":bob!b@host NOTICE alice :heads up");
    let id = query_id(&test.session, "bob").unwrap();
    let messages = test.session.messages(&id).unwrap();
    assert_eq!(messages[0].kind(), MessageKind::Notice);
    assert!(test.try_notification().is_none());
}

#[tokio::test]
async fn test_ctcp_version_query_answered() {
    let test = TestSession::connected().await;
    test.deliver(":bob!b@host PRIVMSG alice :\x01VERSION\x01");

    assert_eq!(
        test.transport.sent(),
        ["NOTICE bob :\x01VERSION slirc-client\x01"]
    );
    assert!(test.session.query_ids().is_empty());
    let messages = test.session.messages(test.session.id()).unwrap();
    let last = messages.last().unwrap();
    assert_eq!(last.kind(), MessageKind::Event(EventType::Ctcp));
    assert_eq!(last.text(), "CTCP VERSION query from bob");
}

#[tokio::test]
async fn test_ctcp_from_self_ignored() {
    let test = TestSession::connected().await;
    test.deliver(":alice!a@host PRIVMSG alice :\x01VERSION\x01");
    test.deliver(":bob!b@host PRIVMSG alice :\x01PING 123\x01");
    assert!(test.transport.sent().is_empty());
}

#[tokio::test]
async fn test_ctcp_version_reply_reported() {
    let test = TestSession::connected().await;
    test.deliver(":bob!b@host NOTICE alice :\x01VERSION hexchat 2.16\x01");
    assert!(
        test.server_lines()
            .contains(&"CTCP VERSION reply from bob: hexchat 2.16".to_string())
    );
    assert!(test.session.query_ids().is_empty());
}

#[tokio::test]
async fn test_send_message_echoes_without_cap() {
    let test = TestSession::in_channel("#rust").await;
    let id = channel_id(&test.session, "#rust").unwrap();

    test.session.send_message(&id, "hello\nworld").unwrap();
    assert_eq!(
        test.transport.take_sent(),
        ["PRIVMSG #rust hello", "PRIVMSG #rust world"]
    );
    let messages = test.session.messages(&id).unwrap();
    let echoed: Vec<_> = messages.iter().filter(|m| m.is_me() && m.nickname() == "alice").collect();
    assert_eq!(echoed.len(), 2);
}

#[tokio::test]
async fn test_send_message_no_echo_with_cap() {
    let test = TestSession::in_channel("#rust").await;
    test.transport.add_capability("echo-message");
    let id = channel_id(&test.session, "#rust").unwrap();
    let before = test.session.messages(&id).unwrap().len();

    test.session.send_message(&id, "hello").unwrap();
    assert_eq!(test.transport.sent(), ["PRIVMSG #rust hello"]);
    assert_eq!(test.session.messages(&id).unwrap().len(), before);
}

#[tokio::test]
async fn test_send_errors() {
    let test = TestSession::in_channel("#rust").await;
    let id = channel_id(&test.session, "#rust").unwrap();

    assert!(matches!(
        test.session.send_message("c999999", "hi"),
        Err(SessionError::NoSuchWindow(_))
    ));
    assert!(matches!(
        test.session.send_message(&id, "\n\n"),
        Err(SessionError::NoTextToSend)
    ));

    test.session.disconnect();
    assert!(matches!(
        test.session.send_message(&id, "hi"),
        Err(SessionError::NotConnected)
    ));
}

#[tokio::test]
async fn test_long_message_split_to_linelen() {
    let test = TestSession::in_channel("#rust").await;
    test.transport.set_isupport("LINELEN", "64");
    let id = channel_id(&test.session, "#rust").unwrap();

    let text = "lorem ipsum dolor ".repeat(10);
    test.session.send_message(&id, &text).unwrap();
    let sent = test.transport.sent();
    assert!(sent.len() > 1);
    // "PRIVMSG #rust :" leaves 49 bytes of payload.
    assert!(sent.iter().all(|l| l.len() <= 64));
    let words: usize = sent
        .iter()
        .map(|l| l.trim_start_matches("PRIVMSG #rust ").trim_start_matches(':').split_whitespace().count())
        .sum();
    assert_eq!(words, 30);
}

#[tokio::test]
async fn test_send_action_and_query() {
    let test = TestSession::connected().await;
    test.session.send_query("bob", "hi").unwrap();
    let id = query_id(&test.session, "bob").unwrap();
    test.session.send_action(&id, "waves").unwrap();

    assert_eq!(
        test.transport.sent(),
        ["PRIVMSG bob hi", "PRIVMSG bob :\x01ACTION waves\x01"]
    );
    let messages = test.session.messages(&id).unwrap();
    assert_eq!(messages.last().unwrap().kind(), MessageKind::Action);
}

#[tokio::test]
async fn test_query_window_lifecycle() {
    let test = TestSession::connected().await;
    let id = test.session.open_query("bob");
    assert_eq!(test.session.open_query("BOB"), id);
    test.session.close_query(&id).unwrap();
    assert!(matches!(
        test.session.close_query(&id),
        Err(SessionError::NoSuchQuery(_))
    ));
}

#[tokio::test]
async fn test_join_part_and_topic_commands() {
    let test = TestSession::in_channel("#rust").await;
    let id = channel_id(&test.session, "#rust").unwrap();

    test.session.join_channel("#secret", Some("hunter2")).unwrap();
    test.session.join_channel("#open", Some("")).unwrap();
    test.session.send_topic(&id, "New topic here").unwrap();
    test.session.part_channel(&id).unwrap();
    assert_eq!(
        test.transport.take_sent(),
        [
            "JOIN #secret hunter2",
            "JOIN #open",
            "TOPIC #rust :New topic here",
            "PART #rust",
        ]
    );
    assert!(channel_id(&test.session, "#rust").is_some());

    test.session.remove_channel(&id).unwrap();
    assert_eq!(test.transport.sent(), ["PART #rust"]);
    assert!(channel_id(&test.session, "#rust").is_none());
    assert!(matches!(
        test.session.part_channel(&id),
        Err(SessionError::NoSuchChannel(_))
    ));
}

#[tokio::test]
async fn test_whois_reply_lines() {
    let test = TestSession::connected().await;
    test.session.whois("bob").unwrap();
    assert_eq!(test.transport.take_sent(), ["WHOIS bob"]);

    test.deliver(":server 311 alice bob b host * :Bob Builder");
    test.deliver(":server 330 alice bob bobacct :is logged in as");
    test.deliver(":server 318 alice bob :End of /WHOIS list.");

    let lines = test.server_lines();
    let n = lines.len();
    assert_eq!(lines[n - 3], "WHOIS: bob b host * Bob Builder");
    assert_eq!(lines[n - 2], "WHOIS bob is logged in as bobacct");
    assert_eq!(lines[n - 1], "WHOIS END bob");
}
