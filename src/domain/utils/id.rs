use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A typed numeric identifier. The tag keeps ids of different domains apart.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id<T> {
    pub id: u64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: u64) -> Self {
        Id { id, _marker: PhantomData }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {}", display_name, self.id)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.id)
    }
}

/// Hands out ids in creation order. Ids are never reused within a session,
/// not even after the owning collection has been cleared.
#[derive(Debug)]
pub struct IdSequence<T> {
    last: u64,
    _marker: PhantomData<T>,
}

impl<T> Default for IdSequence<T> {
    fn default() -> Self {
        Self { last: 0, _marker: PhantomData }
    }
}

impl<T> IdSequence<T> {
    pub fn next_id(&mut self) -> Id<T> {
        self.last += 1;
        Id::new(self.last)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct OverlayRequestTag;

pub type NodeId = Id<NodeTag>;
pub type OverlayRequestId = Id<OverlayRequestTag>;
