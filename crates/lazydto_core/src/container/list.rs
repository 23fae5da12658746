//! Sequence facade over the synced engine.
//!
//! Every mutating call materializes the list first and regenerates the text
//! afterwards. Positional calls validate the index before touching the list.

use super::engine::SyncedValue;
use super::shape::Sequence;
use super::{ContainerError, ContainerResult};
use crate::codec::{Codec, JsonCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Ordered list kept in sync with its text encoding.
pub type SyncedList<T, T2 = T, C = JsonCodec> = SyncedValue<Sequence, T, T2, C>;

impl<T, T2, C> SyncedValue<Sequence, T, T2, C>
where
    T: Serialize + DeserializeOwned,
    T2: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Appends one element.
    pub fn add(&mut self, item: T) -> ContainerResult<()> {
        self.update(|items| items.push(item))
    }

    /// Appends all elements from `items`.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> ContainerResult<()> {
        self.update(|current| current.extend(items))
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `false` when no element matched; the text is regenerated either
    /// way.
    pub fn remove(&mut self, item: &T) -> ContainerResult<bool>
    where
        T: PartialEq,
    {
        self.update(|items| match items.iter().position(|current| current == item) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        })
    }

    pub fn clear(&mut self) -> ContainerResult<()> {
        self.update(Vec::clear)
    }

    /// Inserts `item` at `index`, shifting later elements.
    ///
    /// # Errors
    /// - `ContainerError::IndexOutOfRange` when `index > len`.
    pub fn insert_at(&mut self, index: usize, item: T) -> ContainerResult<()> {
        self.try_update(|items| {
            if index > items.len() {
                return Err(ContainerError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, item);
            Ok(())
        })
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    /// - `ContainerError::IndexOutOfRange` when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> ContainerResult<T> {
        self.try_update(|items| {
            if index >= items.len() {
                return Err(ContainerError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            Ok(items.remove(index))
        })
    }

    /// Replaces the element at `index` and returns the previous one.
    ///
    /// # Errors
    /// - `ContainerError::IndexOutOfRange` when `index >= len`; the list never
    ///   grows through this call.
    pub fn set_at(&mut self, index: usize, item: T) -> ContainerResult<T> {
        self.try_update(|items| match items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(ContainerError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
        })
    }

    /// Returns a clone of the element at `index`.
    pub fn get(&mut self, index: usize) -> ContainerResult<Option<T>>
    where
        T: Clone,
    {
        Ok(self.structured()?.get(index).cloned())
    }

    pub fn len(&mut self) -> ContainerResult<usize>
    where
        T: Clone,
    {
        Ok(self.structured()?.len())
    }

    pub fn is_empty(&mut self) -> ContainerResult<bool>
    where
        T: Clone,
    {
        Ok(self.structured()?.is_empty())
    }

    pub fn contains(&mut self, item: &T) -> ContainerResult<bool>
    where
        T: Clone + PartialEq,
    {
        Ok(self.structured()?.contains(item))
    }
}
