//! Root state snapshots.
//!
//! A [`RootState`] maps each registered slice name to that slice's value.
//! Slice values are held behind `Arc`, so a snapshot is cheap to clone and
//! slices that did not change are shared between successive snapshots.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use folio_types::SliceName;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// Slice Values
// ============================================================================

/// Requirements on a value stored in a slice.
///
/// Implemented for every `'static` type that is `Debug + PartialEq +
/// Serialize + Send + Sync`; there is nothing to implement by hand.
pub trait SliceData: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_dyn(&self, other: &dyn SliceData) -> bool;

    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T> SliceData for T
where
    T: Any + Debug + PartialEq + Serialize + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn SliceData) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The type-erased, shared value of one slice.
#[derive(Clone)]
pub struct SliceValue(Arc<dyn SliceData>);

impl SliceValue {
    pub fn new<T: SliceData>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the value if it has type `T`.
    pub fn downcast_ref<T: SliceData>(&self) -> Option<&T> {
        self.0.as_ref().as_any().downcast_ref::<T>()
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        self.0.as_ref().to_json()
    }
}

impl PartialEq for SliceValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.as_ref().eq_dyn(other.0.as_ref())
    }
}

impl Debug for SliceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.0.as_ref(), f)
    }
}

// ============================================================================
// Root State
// ============================================================================

/// An immutable snapshot of the whole state tree.
///
/// Produced by a [`crate::RootReducer`]; its key set is exactly the set of
/// slice names registered with that reducer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    slices: BTreeMap<SliceName, SliceValue>,
}

impl RootState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slice value and returns the updated state.
    ///
    /// Used to build preloaded states. States produced by a root reducer
    /// never need this.
    pub fn with_slice<T: SliceData>(self, name: impl Into<SliceName>, value: T) -> Self {
        self.with_value(name.into(), SliceValue::new(value))
    }

    pub(crate) fn with_value(mut self, name: SliceName, value: SliceValue) -> Self {
        self.slices.insert(name, value);
        self
    }

    /// Returns the typed value of a slice.
    ///
    /// `None` if the slice is missing or holds a different type.
    pub fn get<T: SliceData>(&self, name: &str) -> Option<&T> {
        self.slices.get(name).and_then(SliceValue::downcast_ref)
    }

    /// Returns the type-erased value of a slice.
    pub fn slice(&self, name: &str) -> Option<&SliceValue> {
        self.slices.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slices.contains_key(name)
    }

    /// Returns the slice names in key order.
    pub fn names(&self) -> impl Iterator<Item = &SliceName> {
        self.slices.keys()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&SliceName, &SliceValue)> {
        self.slices.iter()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Renders the snapshot as a JSON object keyed by slice name.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for RootState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slices.len()))?;
        for (name, value) in &self.slices {
            let value = value.to_json().map_err(S::Error::custom)?;
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
