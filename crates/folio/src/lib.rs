//! # Folio
//!
//! Composable reducers and an explicit state store.
//!
//! State lives in one immutable snapshot owned by a [`Store`]. Each region
//! of the snapshot (a *slice*) is owned by one pure slice reducer; the
//! slice reducers are combined into a single root reducer, and every
//! dispatched event produces the next snapshot:
//!
//! ```text
//!   event ──► Store::dispatch ──► RootReducer
//!                                   ├─ books   (state.books,   event) ─┐
//!                                   └─ authors (state.authors, event) ─┤
//!                                                                      ▼
//!   listeners ◄── Store::state ◄──────────────────────────── new snapshot
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use folio::{library_store, Event, Book, LibraryView};
//!
//! let mut store = library_store(&LibraryConfig::default())?;
//!
//! store.dispatch(&Event::add_author("Mark Twain"));
//! store.dispatch(&Event::add_book(Book::new("Huck Finn").by("Mark Twain")));
//!
//! let view = LibraryView::new(store.state());
//! assert_eq!(view.books().len(), 1);
//! ```
//!
//! # Modules
//!
//! - **Store**: [`Store`], [`library_store`] - state container
//! - **Kernel**: [`Combiner`], [`RootReducer`], [`Reducer`] - composition
//! - **Types**: [`Event`], [`Book`], [`Author`] - domain records

mod error;
mod library;
mod store;

#[cfg(feature = "broadcast")]
pub mod broadcast;

// SDK Layer - Main API
pub use error::{FolioError, Result};
pub use library::{library_options, library_store};
pub use store::{Listener, Store, SubscriptionId};

#[cfg(feature = "broadcast")]
pub use broadcast::{StateBroadcast, StateChanged};

// Re-export the kernel
pub use folio_kernel::library::{AUTHORS, AuthorsReducer, BOOKS, BooksReducer, LibraryOptions, LibraryView};
pub use folio_kernel::{
    Combiner, FnReducer, KernelError, Reducer, Reduction, RootReducer, RootState, SliceData,
    SliceValue, reducer_fn, replay, replay_states,
};

// Re-export core types
pub use folio_types::{Author, Book, DecodeError, Event, SliceName};

// Re-export configuration
pub use folio_config::{FolioConfig, LibraryConfig};
