//! Keyed-map facade over the synced engine.

use super::engine::SyncedValue;
use super::shape::Keyed;
use super::{ContainerError, ContainerResult};
use crate::codec::{Codec, JsonCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Key-ordered map kept in sync with its text encoding.
pub type SyncedMap<K, T, T2 = T, C = JsonCodec> = SyncedValue<Keyed<K>, T, T2, C>;

impl<K, T, T2, C> SyncedValue<Keyed<K>, T, T2, C>
where
    K: Ord + Clone + Display + Serialize + DeserializeOwned,
    T: Serialize + DeserializeOwned,
    T2: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Adds a new entry.
    ///
    /// # Errors
    /// - `ContainerError::DuplicateKey` when `key` is already present.
    pub fn add(&mut self, key: K, item: T) -> ContainerResult<()> {
        self.try_update(|entries| {
            if entries.contains_key(&key) {
                return Err(ContainerError::DuplicateKey(key.to_string()));
            }
            entries.insert(key, item);
            Ok(())
        })
    }

    /// Inserts or replaces an entry, returning the previous value.
    pub fn insert(&mut self, key: K, item: T) -> ContainerResult<Option<T>> {
        self.update(|entries| entries.insert(key, item))
    }

    /// Replaces the value of an existing entry and returns the previous one.
    ///
    /// # Errors
    /// - `ContainerError::KeyNotFound` when `key` is absent; the map never
    ///   grows through this call.
    pub fn set_key(&mut self, key: &K, item: T) -> ContainerResult<T> {
        self.try_update(|entries| match entries.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(ContainerError::KeyNotFound(key.to_string())),
        })
    }

    /// Removes an entry, returning its value when it was present.
    pub fn remove(&mut self, key: &K) -> ContainerResult<Option<T>> {
        self.update(|entries| entries.remove(key))
    }

    pub fn clear(&mut self) -> ContainerResult<()> {
        self.update(BTreeMap::clear)
    }

    /// Returns a clone of the value stored under `key`.
    pub fn get(&mut self, key: &K) -> ContainerResult<Option<T>>
    where
        T: Clone,
    {
        Ok(self.structured()?.get(key).cloned())
    }

    pub fn contains_key(&mut self, key: &K) -> ContainerResult<bool>
    where
        T: Clone,
    {
        Ok(self.structured()?.contains_key(key))
    }

    /// Returns the keys in ascending order.
    pub fn keys(&mut self) -> ContainerResult<Vec<K>>
    where
        T: Clone,
    {
        Ok(self.structured()?.keys().cloned().collect())
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
}
