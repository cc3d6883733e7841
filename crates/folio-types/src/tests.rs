use serde_json::json;
use test_case::test_case;

use crate::{Author, Book, DecodeError, Event, SliceName};

// ============================================================================
// Event decoding
// ============================================================================

#[test_case(json!({"type": "ADD_AUTHOR", "payload": {"name": "Mark Twain"}}), Event::add_author("Mark Twain"); "add author")]
#[test_case(json!({"type": "REMOVE_AUTHOR", "payload": {"name": "Mark Twain"}}), Event::remove_author("Mark Twain"); "remove author")]
#[test_case(json!({"type": "ADD_BOOK", "payload": {"title": "Huck Finn"}}), Event::add_book(Book::new("Huck Finn")); "add book")]
#[test_case(json!({"type": "ADD_BOOK", "payload": {"title": "Huck Finn", "author": "Mark Twain"}}), Event::add_book(Book::new("Huck Finn").by("Mark Twain")); "add book with author")]
#[test_case(json!({"type": "REMOVE_BOOK", "payload": {"title": "Huck Finn"}}), Event::remove_book("Huck Finn"); "remove book")]
fn decodes_known_tags(value: serde_json::Value, expected: Event) {
    let event = Event::from_value(value).expect("known tag should decode");
    assert_eq!(event, expected);
}

#[test]
fn unknown_tag_is_preserved_as_other() {
    let event = Event::from_json(r#"{"type": "CHECKOUT_BOOK", "payload": {"copies": 2}}"#)
        .expect("unknown tags are not an error");

    assert_eq!(event.tag(), "CHECKOUT_BOOK");
    assert_eq!(
        event,
        Event::Other {
            tag: "CHECKOUT_BOOK".to_string(),
            payload: Some(json!({"copies": 2})),
        }
    );
}

#[test]
fn unknown_tag_without_payload() {
    let event = Event::from_json(r#"{"type": "@@INIT"}"#).expect("should decode");
    assert_eq!(event, Event::other("@@INIT"));
}

#[test]
fn init_event_round_trips() {
    let event = Event::init();
    assert_eq!(event.tag(), crate::tags::INIT);
    assert_eq!(Event::from_value(event.to_value()).expect("decode"), event);
}

#[test_case("ADD_AUTHOR")]
#[test_case("REMOVE_AUTHOR")]
#[test_case("ADD_BOOK")]
#[test_case("REMOVE_BOOK")]
fn known_tags_are_listed(tag: &str) {
    assert!(crate::tags::is_known(tag));
    assert!(!crate::tags::is_known(&tag.to_lowercase()));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "known tag ADD_BOOK")]
fn other_rejects_known_tag() {
    let _ = Event::other("ADD_BOOK");
}

#[test]
fn missing_tag_is_rejected() {
    let result = Event::from_json(r#"{"payload": {"name": "Mark Twain"}}"#);
    assert!(matches!(result, Err(DecodeError::MissingTag)));
}

#[test]
fn non_string_tag_is_rejected() {
    let result = Event::from_value(json!({"type": 7}));
    assert!(matches!(result, Err(DecodeError::MissingTag)));
}

#[test]
fn non_object_is_rejected() {
    let result = Event::from_value(json!(["ADD_AUTHOR"]));
    assert!(matches!(result, Err(DecodeError::NotAnObject)));
}

#[test]
fn malformed_json_is_rejected() {
    let result = Event::from_json("{\"type\": ");
    assert!(matches!(result, Err(DecodeError::Json(_))));
}

#[test]
fn known_tag_with_missing_payload_is_rejected() {
    let result = Event::from_json(r#"{"type": "ADD_BOOK"}"#);
    assert!(matches!(
        result,
        Err(DecodeError::InvalidPayload { ref tag, .. }) if tag == "ADD_BOOK"
    ));
}

#[test]
fn known_tag_with_wrong_payload_shape_is_rejected() {
    let result = Event::from_json(r#"{"type": "ADD_AUTHOR", "payload": {"title": "x"}}"#);
    assert!(matches!(result, Err(DecodeError::InvalidPayload { .. })));
}

// ============================================================================
// Event encoding
// ============================================================================

#[test]
fn encodes_envelope_without_absent_author() {
    let value = Event::add_book(Book::new("Huck Finn")).to_value();
    assert_eq!(value, json!({"type": "ADD_BOOK", "payload": {"title": "Huck Finn"}}));
}

#[test]
fn other_without_payload_omits_payload_field() {
    let value = Event::other("NOOP").to_value();
    assert_eq!(value, json!({"type": "NOOP"}));
}

#[test]
fn serde_goes_through_the_envelope() {
    let event = Event::add_author("Mark Twain");
    let text = serde_json::to_string(&event).expect("serialize");
    assert_eq!(text, r#"{"payload":{"name":"Mark Twain"},"type":"ADD_AUTHOR"}"#);

    let back: Event = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, event);
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn book_serializes_without_author_when_absent() {
    let value = serde_json::to_value(Book::new("Huck Finn")).expect("serialize");
    assert_eq!(value, json!({"title": "Huck Finn"}));
}

#[test]
fn author_serializes_as_record() {
    let value = serde_json::to_value(Author::new("Mark Twain")).expect("serialize");
    assert_eq!(value, json!({"name": "Mark Twain"}));
}

#[test]
fn slice_name_is_transparent() {
    let name = SliceName::new("books");
    assert_eq!(serde_json::to_value(&name).expect("serialize"), json!("books"));
    assert_eq!(name.as_str(), "books");
    assert!(!name.is_empty());
    assert!(SliceName::from("").is_empty());
}
