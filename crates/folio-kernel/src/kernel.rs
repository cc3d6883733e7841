//! The root composer - combines slice reducers into one root reducer.
//!
//! The root reducer hands every registered slice reducer its own slice of the
//! previous snapshot together with the event, and assembles the results into
//! the next snapshot. It is completely pure: no IO, no clocks, no randomness.
//!
//! # Example
//!
//! ```ignore
//! let root = Combiner::new()
//!     .slice("books", BooksReducer)?
//!     .slice("authors", AuthorsReducer::default())?
//!     .build();
//!
//! let initial = root.reduce(None, &event);
//! let next = root.reduce(Some(&initial), &event);
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use folio_types::SliceName;

use crate::reducer::Reducer;
use crate::state::{RootState, SliceValue};

// ============================================================================
// Type Erasure
// ============================================================================

/// A slice reducer with its state type erased, so reducers over different
/// state types can live in one map.
trait ErasedReducer<E>: Send + Sync {
    fn initial(&self) -> SliceValue;

    fn accepts(&self, value: &SliceValue) -> bool;

    fn reduce(&self, prior: Option<&SliceValue>, event: &E) -> SliceValue;
}

struct Erased<R>(R);

impl<E, R> ErasedReducer<E> for Erased<R>
where
    R: Reducer<E>,
{
    fn initial(&self) -> SliceValue {
        SliceValue::new(self.0.initial_state())
    }

    fn accepts(&self, value: &SliceValue) -> bool {
        value.downcast_ref::<R::State>().is_some()
    }

    fn reduce(&self, prior: Option<&SliceValue>, event: &E) -> SliceValue {
        let typed = prior.and_then(SliceValue::downcast_ref::<R::State>);
        let next = self.0.reduce_slice(typed, event);

        // Unchanged slices keep their allocation.
        match prior {
            Some(prior) if typed == Some(&next) => prior.clone(),
            _ => SliceValue::new(next),
        }
    }
}

// ============================================================================
// Combiner
// ============================================================================

/// Builder mapping slice names to slice reducers.
pub struct Combiner<E> {
    slices: BTreeMap<SliceName, Box<dyn ErasedReducer<E>>>,
}

impl<E> Combiner<E> {
    /// Creates a combiner with no slices.
    pub fn new() -> Self {
        Self {
            slices: BTreeMap::new(),
        }
    }

    /// Registers a slice reducer under `name`.
    ///
    /// Names must be non-empty and unique.
    pub fn slice<R>(mut self, name: impl Into<SliceName>, reducer: R) -> Result<Self, KernelError>
    where
        R: Reducer<E> + 'static,
    {
        let name = name.into();

        // Precondition: name is non-empty
        if name.is_empty() {
            return Err(KernelError::EmptySliceName);
        }

        // Precondition: name isn't registered yet
        if self.slices.contains_key(&name) {
            return Err(KernelError::DuplicateSlice(name));
        }

        self.slices.insert(name, Box::new(Erased(reducer)));
        Ok(self)
    }

    /// Returns the number of registered slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Finishes composition.
    pub fn build(self) -> RootReducer<E> {
        RootReducer {
            slices: self.slices,
        }
    }
}

impl<E> Default for Combiner<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Root Reducer
// ============================================================================

/// Result of applying one event to a root state.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: RootState,
    /// False when every slice returned a value equal to its previous one.
    pub changed: bool,
}

/// The composed reducer over the whole state tree.
pub struct RootReducer<E> {
    slices: BTreeMap<SliceName, Box<dyn ErasedReducer<E>>>,
}

impl<E> RootReducer<E> {
    /// Returns the registered slice names in key order.
    pub fn slice_names(&self) -> impl Iterator<Item = &SliceName> {
        self.slices.keys()
    }

    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Returns the state every slice starts from.
    ///
    /// Equal to reducing an absent state with an event no slice recognizes,
    /// provided every slice reducer returns its state unchanged for such
    /// events.
    pub fn initial_state(&self) -> RootState {
        self.slices
            .iter()
            .fold(RootState::new(), |state, (name, reducer)| {
                state.with_value(name.clone(), reducer.initial())
            })
    }

    /// Applies an event to a possibly absent root state.
    pub fn reduce(&self, state: Option<&RootState>, event: &E) -> RootState {
        self.apply(state, event).state
    }

    /// Applies an event and reports whether any slice changed.
    ///
    /// For every registered slice `k`, the result holds
    /// `slice_k(state[k], event)`, where a missing `state` or a missing key
    /// takes that slice's absent path. Keys not registered with this reducer
    /// are dropped.
    pub fn apply(&self, state: Option<&RootState>, event: &E) -> Reduction {
        let mut changed = state.is_none();

        if let Some(state) = state {
            changed |= self.warn_unregistered(state);
        }

        let next = self
            .slices
            .iter()
            .fold(RootState::new(), |next, (name, reducer)| {
                let prior = state.and_then(|s| s.slice(name.as_str()));
                let value = reducer.reduce(prior, event);

                changed |= prior.is_none_or(|prior| !prior.ptr_eq(&value));

                next.with_value(name.clone(), value)
            });

        // Postcondition: key set equals the registered slice names
        debug_assert!(next.names().eq(self.slices.keys()));

        Reduction {
            state: next,
            changed,
        }
    }

    /// Conforms a preloaded state to the registered slices.
    ///
    /// Registered slices keep their value when it has the reducer's state
    /// type and fall back to the initial value otherwise. Unregistered keys
    /// are dropped.
    pub fn normalize(&self, state: RootState) -> RootState {
        self.warn_unregistered(&state);

        self.slices
            .iter()
            .fold(RootState::new(), |next, (name, reducer)| {
                let value = match state.slice(name.as_str()) {
                    Some(value) if reducer.accepts(value) => value.clone(),
                    Some(_) => {
                        tracing::warn!(slice = %name, "slice value has unexpected type, using initial state");
                        reducer.initial()
                    }
                    None => reducer.initial(),
                };
                next.with_value(name.clone(), value)
            })
    }

    /// Logs keys of `state` that no slice reducer owns.
    ///
    /// Returns true if there were any.
    fn warn_unregistered(&self, state: &RootState) -> bool {
        let mut found = false;
        for (name, _) in state.iter() {
            if !self.slices.contains_key(name) {
                tracing::warn!(slice = %name, "dropping state for unregistered slice");
                found = true;
            }
        }
        found
    }
}

impl<E> Debug for RootReducer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootReducer")
            .field("slices", &self.slices.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Errors that can occur while composing slice reducers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("slice name must not be empty")]
    EmptySliceName,

    #[error("slice '{0}' is already registered")]
    DuplicateSlice(SliceName),
}
