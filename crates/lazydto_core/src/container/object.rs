//! Single-object facade over the synced engine.

use super::engine::SyncedValue;
use super::shape::Single;
use super::ContainerResult;
use crate::codec::{Codec, JsonCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One value kept in sync with its text encoding.
///
/// An empty container reads as `T::default()`.
pub type SyncedObject<T, T2 = T, C = JsonCodec> = SyncedValue<Single, T, T2, C>;

impl<T, T2, C> SyncedValue<Single, T, T2, C>
where
    T: Default + Serialize + DeserializeOwned,
    T2: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Mutates the value in place and regenerates the text.
    pub fn modify<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> ContainerResult<R> {
        self.update(f)
    }

    /// Replaces the value and returns the previous one.
    pub fn replace(&mut self, value: T) -> ContainerResult<T> {
        self.update(|current| std::mem::replace(current, value))
    }
}
