//! The book/author library slices.
//!
//! `books` holds the ordered list of [`Book`]s and `authors` the ordered list
//! of [`Author`]s. Books refer to their author by name; the relation is
//! resolved by [`LibraryView`] once both slices have settled for an event.

use folio_types::{Author, Book, Event};

use crate::kernel::{Combiner, KernelError, RootReducer};
use crate::reducer::Reducer;
use crate::state::RootState;

/// Slice name of the books list.
pub const BOOKS: &str = "books";

/// Slice name of the authors list.
pub const AUTHORS: &str = "authors";

// ============================================================================
// Sequence helpers
// ============================================================================

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// Returns `items` without the last element matching `matches`.
///
/// Removing the last match makes removal the exact inverse of an append.
fn without_last<T: Clone>(items: &[T], matches: impl Fn(&T) -> bool) -> Vec<T> {
    match items.iter().rposition(matches) {
        Some(index) => items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect(),
        None => items.to_vec(),
    }
}

// ============================================================================
// Books
// ============================================================================

/// Reducer for the `books` slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooksReducer;

impl Reducer<Event> for BooksReducer {
    type State = Vec<Book>;

    fn initial_state(&self) -> Vec<Book> {
        Vec::new()
    }

    fn reduce(&self, books: &Vec<Book>, event: &Event) -> Vec<Book> {
        match event {
            Event::AddBook(book) => appended(books, book.clone()),
            Event::RemoveBook { title } => without_last(books, |book| book.title == *title),
            Event::AddAuthor(_) | Event::RemoveAuthor { .. } | Event::Other { .. } => {
                books.clone()
            }
        }
    }
}

// ============================================================================
// Authors
// ============================================================================

/// Reducer for the `authors` slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorsReducer {
    /// Also react to `ADD_BOOK`: append the book's author when no author of
    /// that name is known yet.
    pub register_from_books: bool,
}

impl AuthorsReducer {
    pub fn registering_from_books() -> Self {
        Self {
            register_from_books: true,
        }
    }
}

impl Reducer<Event> for AuthorsReducer {
    type State = Vec<Author>;

    fn initial_state(&self) -> Vec<Author> {
        Vec::new()
    }

    fn reduce(&self, authors: &Vec<Author>, event: &Event) -> Vec<Author> {
        match event {
            Event::AddAuthor(author) => appended(authors, author.clone()),
            Event::RemoveAuthor { name } => without_last(authors, |author| author.name == *name),
            Event::AddBook(Book {
                author: Some(name), ..
            }) if self.register_from_books && !authors.iter().any(|a| a.name == *name) => {
                appended(authors, Author::new(name.clone()))
            }
            Event::AddBook(_) | Event::RemoveBook { .. } | Event::Other { .. } => authors.clone(),
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Options for the library slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryOptions {
    /// See [`AuthorsReducer::register_from_books`].
    pub register_authors_from_books: bool,
}

/// Composes the `books` and `authors` slices into one root reducer.
pub fn library_reducer(options: LibraryOptions) -> Result<RootReducer<Event>, KernelError> {
    let authors = AuthorsReducer {
        register_from_books: options.register_authors_from_books,
    };

    Ok(Combiner::new()
        .slice(BOOKS, BooksReducer)?
        .slice(AUTHORS, authors)?
        .build())
}

// ============================================================================
// Selectors
// ============================================================================

/// Read-only queries over a settled library snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LibraryView<'a> {
    state: &'a RootState,
}

impl<'a> LibraryView<'a> {
    pub fn new(state: &'a RootState) -> Self {
        Self { state }
    }

    /// Returns the books in insertion order; empty if the slice is missing.
    pub fn books(&self) -> &'a [Book] {
        self.state
            .get::<Vec<Book>>(BOOKS)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the authors in insertion order; empty if the slice is missing.
    pub fn authors(&self) -> &'a [Author] {
        self.state
            .get::<Vec<Author>>(AUTHORS)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves the author a book refers to.
    pub fn author_of(&self, book: &Book) -> Option<&'a Author> {
        let name = book.author.as_deref()?;
        self.authors().iter().find(|author| author.name == name)
    }

    /// Returns the books referring to the named author.
    pub fn books_by(&self, name: &str) -> Vec<&'a Book> {
        self.books()
            .iter()
            .filter(|book| book.author.as_deref() == Some(name))
            .collect()
    }
}
