//! The book/author store, wired from configuration.

use folio_config::LibraryConfig;
use folio_kernel::library::{LibraryOptions, library_reducer};
use folio_types::Event;

use crate::error::Result;
use crate::store::Store;

/// Maps the `[library]` config section onto the slice options.
pub fn library_options(config: &LibraryConfig) -> LibraryOptions {
    LibraryOptions {
        register_authors_from_books: config.register_authors_from_books,
    }
}

/// Builds a store over the `books` and `authors` slices.
pub fn library_store(config: &LibraryConfig) -> Result<Store<Event>> {
    let root = library_reducer(library_options(config))?;
    Ok(Store::init(root, &Event::init()))
}
