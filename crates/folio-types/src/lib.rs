//! # folio-types: Core types for `Folio`
//!
//! This crate contains shared types used across the `Folio` system:
//! - Slice identifiers ([`SliceName`])
//! - Library records ([`Book`], [`Author`])
//! - Events and their JSON envelope ([`Event`], [`DecodeError`])

use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};

mod event;

pub use event::{DecodeError, Event, tags};

// ============================================================================
// Slice Name - Clone (contains String, cloned once per registration)
// ============================================================================

/// Name of one region of the root state tree.
///
/// Each slice name is owned by exactly one slice reducer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceName(String);

impl SliceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for SliceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for SliceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for SliceName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for SliceName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<SliceName> for String {
    fn from(value: SliceName) -> Self {
        value.0
    }
}

// ============================================================================
// Library Records
// ============================================================================

/// An author tracked by the `authors` slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A book tracked by the `books` slice.
///
/// The author is referenced by name and resolved against the `authors`
/// slice only after both slices have settled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    /// Sets the author name this book refers to.
    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[cfg(test)]
mod tests;
