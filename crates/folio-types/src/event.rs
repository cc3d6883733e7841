//! Events and their JSON envelope.
//!
//! On the wire an event is an object `{"type": TAG, "payload": ...}` where
//! the payload is optional. Inside the process an event is the [`Event`] sum
//! type so reducers can match exhaustively; tags nobody recognizes are kept
//! as [`Event::Other`] and fall through every reducer's default arm.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Author, Book};

/// Wire tags of the events the library slices understand.
pub mod tags {
    pub const ADD_AUTHOR: &str = "ADD_AUTHOR";
    pub const REMOVE_AUTHOR: &str = "REMOVE_AUTHOR";
    pub const ADD_BOOK: &str = "ADD_BOOK";
    pub const REMOVE_BOOK: &str = "REMOVE_BOOK";

    /// Seeds a new store. No slice recognizes it.
    pub const INIT: &str = "@@INIT";

    /// Tags that decode to a dedicated [`super::Event`] variant.
    pub const KNOWN: [&str; 4] = [ADD_AUTHOR, REMOVE_AUTHOR, ADD_BOOK, REMOVE_BOOK];

    pub fn is_known(tag: &str) -> bool {
        KNOWN.contains(&tag)
    }
}

/// Something that happened, submitted to the store by `dispatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Event {
    AddAuthor(Author),
    RemoveAuthor { name: String },
    AddBook(Book),
    RemoveBook { title: String },
    /// Any tag without a dedicated variant. Every reducer treats it as a no-op.
    Other { tag: String, payload: Option<Value> },
}

#[derive(Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Deserialize)]
struct TitlePayload {
    title: String,
}

impl Event {
    pub fn add_author(name: impl Into<String>) -> Self {
        Self::AddAuthor(Author::new(name))
    }

    pub fn remove_author(name: impl Into<String>) -> Self {
        Self::RemoveAuthor { name: name.into() }
    }

    pub fn add_book(book: Book) -> Self {
        Self::AddBook(book)
    }

    pub fn remove_book(title: impl Into<String>) -> Self {
        Self::RemoveBook {
            title: title.into(),
        }
    }

    /// Creates an event with a tag no library slice recognizes.
    ///
    /// `tag` must not be one of [`tags::KNOWN`]: such an event would decode
    /// back into a dedicated variant, or fail to decode without its payload.
    pub fn other(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        debug_assert!(
            !tags::is_known(&tag),
            "Event::other called with known tag {tag}"
        );
        Self::Other { tag, payload: None }
    }

    /// The event a store is seeded with.
    pub fn init() -> Self {
        Self::other(tags::INIT)
    }

    /// Returns the wire tag of this event.
    pub fn tag(&self) -> &str {
        match self {
            Self::AddAuthor(_) => tags::ADD_AUTHOR,
            Self::RemoveAuthor { .. } => tags::REMOVE_AUTHOR,
            Self::AddBook(_) => tags::ADD_BOOK,
            Self::RemoveBook { .. } => tags::REMOVE_BOOK,
            Self::Other { tag, .. } => tag,
        }
    }

    /// Parses one event from its JSON text form.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decodes an event envelope.
    ///
    /// A missing or non-string `type` is rejected. A known tag whose payload
    /// does not have the expected shape is rejected. Unknown tags decode to
    /// [`Event::Other`] with the payload preserved.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut fields) = value else {
            return Err(DecodeError::NotAnObject);
        };

        let tag = match fields.remove("type") {
            Some(Value::String(tag)) => tag,
            _ => return Err(DecodeError::MissingTag),
        };
        let payload = fields.remove("payload");

        match tag.as_str() {
            tags::ADD_AUTHOR => decode_payload::<Author>(&tag, payload).map(Self::AddAuthor),
            tags::REMOVE_AUTHOR => decode_payload::<NamePayload>(&tag, payload)
                .map(|p| Self::RemoveAuthor { name: p.name }),
            tags::ADD_BOOK => decode_payload::<Book>(&tag, payload).map(Self::AddBook),
            tags::REMOVE_BOOK => decode_payload::<TitlePayload>(&tag, payload)
                .map(|p| Self::RemoveBook { title: p.title }),
            _ => Ok(Self::Other { tag, payload }),
        }
    }

    /// Encodes this event as its JSON envelope.
    pub fn to_value(&self) -> Value {
        let payload = match self {
            Self::AddAuthor(author) => Some(serde_json::json!({ "name": author.name })),
            Self::RemoveAuthor { name } => Some(serde_json::json!({ "name": name })),
            Self::AddBook(book) => {
                let mut fields = Map::new();
                fields.insert("title".to_string(), Value::String(book.title.clone()));
                if let Some(author) = &book.author {
                    fields.insert("author".to_string(), Value::String(author.clone()));
                }
                Some(Value::Object(fields))
            }
            Self::RemoveBook { title } => Some(serde_json::json!({ "title": title })),
            Self::Other { payload, .. } => payload.clone(),
        };

        let mut envelope = Map::new();
        envelope.insert("type".to_string(), Value::String(self.tag().to_string()));
        if let Some(payload) = payload {
            envelope.insert("payload".to_string(), payload);
        }
        Value::Object(envelope)
    }
}

fn decode_payload<T>(tag: &str, payload: Option<Value>) -> Result<T, DecodeError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(payload.unwrap_or(Value::Null)).map_err(|source| {
        DecodeError::InvalidPayload {
            tag: tag.to_string(),
            source,
        }
    })
}

impl TryFrom<Value> for Event {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Event> for Value {
    fn from(event: Event) -> Self {
        event.to_value()
    }
}

/// Errors raised while decoding an event envelope.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("event is not a JSON object")]
    NotAnObject,

    #[error("event has no string `type` tag")]
    MissingTag,

    #[error("invalid payload for {tag}: {source}")]
    InvalidPayload {
        tag: String,
        source: serde_json::Error,
    },

    #[error("malformed event JSON: {0}")]
    Json(#[from] serde_json::Error),
}
