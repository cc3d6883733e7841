//! # folio-kernel: Functional core of `Folio`
//!
//! The kernel is the pure, deterministic heart of the system. It composes
//! per-slice reducers into one root reducer that maps a root state and an
//! event to the next root state.
//!
//! ## Key Principles
//!
//! - **No IO**: Reducers never touch disk, network, or any external resource
//! - **No mutation**: Reducers borrow their input and return a new value
//! - **Totality**: Every reducer answers every event, unrecognized ones with
//!   the unchanged state
//! - **Isolation**: A slice reducer only ever sees the slice it owns
//!
//! ## Architecture
//!
//! - [`reducer`]: The [`Reducer`] trait implemented once per slice
//! - [`state`]: The immutable [`RootState`] snapshot keyed by slice name
//! - [`kernel`]: [`Combiner`] and the composed [`RootReducer`]
//! - [`library`]: The `books` and `authors` slices
//! - [`replay`]: Folding an event history into a snapshot
//!
//! ## Example
//!
//! ```ignore
//! use folio_kernel::{Combiner, library::{AuthorsReducer, BooksReducer}};
//!
//! let root = Combiner::new()
//!     .slice("books", BooksReducer)?
//!     .slice("authors", AuthorsReducer::default())?
//!     .build();
//!
//! let state = root.reduce(None, &Event::add_author("Mark Twain"));
//! ```

pub mod kernel;
pub mod library;
pub mod reducer;
pub mod replay;
pub mod state;


#[cfg(test)]
mod tests_properties;

pub use kernel::{Combiner, KernelError, Reduction, RootReducer};
pub use reducer::{FnReducer, Reducer, reducer_fn};
pub use replay::{replay, replay_states};
pub use state::{RootState, SliceData, SliceValue};
