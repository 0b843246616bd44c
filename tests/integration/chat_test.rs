//! Chat room over a scripted transport

use reelsync::chat::{ChatMessage, ChatPayload, ChatRoom};
use reelsync::timecode::{format_epoch_label_in, JUST_NOW};

use crate::helpers::ScriptedTransport;

fn msg(when: &str, name: &str, text: &str) -> ChatMessage {
    ChatMessage::new(when, name, text, None)
}

#[test]
fn history_batch_is_sorted_and_deduplicated() {
    let transport = ScriptedTransport::new();
    transport.deliver(ChatPayload::Batch(vec![
        msg("1700000300", "Bo", "third"),
        msg("1700000100", "Ana", "first"),
        msg("1700000200", "Cy", "second"),
    ]));
    transport.deliver(ChatPayload::Batch(vec![
        msg("1700000100", "Ana", "first"),
        msg("1700000400", "Ana", "fourth"),
    ]));
    let mut room = ChatRoom::new("Moi", Some(transport));

    assert_eq!(room.poll(), 4);
    let texts: Vec<&str> = room.feed.messages().iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third", "fourth"]);
}

#[test]
fn raw_frames_parse_single_and_batch() {
    let single = ChatPayload::parse(r#"{"when": 1700000000, "name": "Ana", "message": "hi"}"#)
        .unwrap();
    assert!(matches!(single, ChatPayload::Single(ref m) if m.when == "1700000000"));

    let batch = ChatPayload::parse(
        r#"[{"when": "1700000000", "name": "Ana", "message": "hi", "moment": 95}]"#,
    )
    .unwrap();
    match batch {
        ChatPayload::Batch(messages) => assert_eq!(messages[0].moment, Some(95.0)),
        other => panic!("expected batch, got {:?}", other),
    }

    assert!(ChatPayload::parse("not json").is_err());
}

#[test]
fn sent_message_carries_moment_and_is_echoed_locally() {
    let transport = ScriptedTransport::new();
    let log = transport.log.clone();
    let mut room = ChatRoom::new("Ana", Some(transport));

    room.composer.body = "Look at this shot".to_string();
    room.composer.toggle_moment(3723.4);
    let sent = room.send_composed_at("1700000000").unwrap();

    assert_eq!(sent.moment, Some(3723.0));
    assert_eq!(sent.name, "Ana");
    assert_eq!(log.borrow().sent, vec![sent.clone()]);
    assert_eq!(room.feed.messages(), &[sent]);
    assert!(room.composer.body.is_empty());
    assert!(!room.composer.attach_moment());
}

#[test]
fn echo_from_server_does_not_duplicate() {
    let transport = ScriptedTransport::new();
    let handle = transport.clone();
    let mut room = ChatRoom::new("Ana", Some(transport));

    room.composer.body = "hello".to_string();
    let sent = room.send_composed_at("1700000000").unwrap();
    handle.deliver(ChatPayload::Single(sent));

    assert_eq!(room.poll(), 0);
    assert_eq!(room.feed.len(), 1);
}

#[test]
fn failed_send_still_shows_locally() {
    let transport = ScriptedTransport::new();
    transport.log.borrow_mut().fail_sends = true;
    let mut room = ChatRoom::new("Ana", Some(transport));

    room.composer.body = "offline".to_string();
    assert!(room.send_composed_at("1700000000").is_some());
    assert_eq!(room.feed.len(), 1);
}

#[test]
fn non_numeric_moment_fields_count_as_zero() {
    let mut room: ChatRoom<ScriptedTransport> = ChatRoom::new("Ana", None);
    room.composer.body = "x".to_string();
    room.composer.toggle_moment(0.0);
    room.composer.hours = "ab".to_string();
    room.composer.minutes = "2".to_string();
    room.composer.seconds = "".to_string();

    let sent = room.send_composed_at("1").unwrap();
    assert_eq!(sent.moment, Some(120.0));
}

#[test]
fn moments_are_listed_for_jumping() {
    let transport = ScriptedTransport::new();
    transport.deliver(ChatPayload::Batch(vec![
        ChatMessage::new("1700000100", "Ana", "here", Some(42.0)),
        msg("1700000200", "Bo", "no moment"),
    ]));
    let mut room = ChatRoom::new("Moi", Some(transport));
    room.poll();

    let moments: Vec<(usize, f64)> = room.feed.with_moments().collect();
    assert_eq!(moments, vec![(0, 42.0)]);
}

#[test]
fn close_reaches_transport() {
    let transport = ScriptedTransport::new();
    let log = transport.log.clone();
    let mut room = ChatRoom::new("Moi", Some(transport));

    room.close();
    assert!(log.borrow().closed);
    assert!(!room.is_connected());
}

#[test]
fn send_time_labels() {
    let label = format_epoch_label_in("1700000000", &chrono::Utc);
    assert_eq!(label, "22:13");
    assert_eq!(format_epoch_label_in("", &chrono::Utc), JUST_NOW);
}
