use super::sort_key::{compare_values, is_valid_sort_key, resolve_attribute};
use super::{PagingError, PagingResult};
use crate::codec::Codec;
use crate::container::SyncedList;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Custom ordering for attribute values used by [`PagedList::reorder_items`].
pub type Comparer<'a> = &'a dyn Fn(&Value, &Value) -> Ordering;

/// Page metadata envelope for response DTOs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Paged, reorderable view over an owned sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_index: usize,
    page_size: usize,
    total_count: usize,
}

impl<T> PagedList<T> {
    /// Creates a view over `items` positioned at zero-based `page_index`.
    ///
    /// # Errors
    /// - `PagingError::InvalidArgument` when `page_size` is zero.
    pub fn new(items: Vec<T>, page_index: usize, page_size: usize) -> PagingResult<Self> {
        validate_page_size(page_size)?;
        let total_count = items.len();
        Ok(Self {
            items,
            page_index,
            page_size,
            total_count,
        })
    }

    /// Creates a view over the materialized contents of a synced list.
    ///
    /// # Errors
    /// - `PagingError::Source` when the list text cannot be decoded.
    /// - `PagingError::InvalidArgument` when `page_size` is zero.
    pub fn from_list<T2, C>(
        list: &mut SyncedList<T, T2, C>,
        page_index: usize,
        page_size: usize,
    ) -> PagingResult<Self>
    where
        T: Clone + Serialize + DeserializeOwned,
        T2: Serialize + DeserializeOwned,
        C: Codec,
    {
        let items = list.structured()?.into_owned();
        Self::new(items, page_index, page_size)
    }

    /// Full source sequence in its current order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages()
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// # Errors
    /// - `PagingError::InvalidArgument` when `page_size` is zero.
    pub fn set_page_size(&mut self, page_size: usize) -> PagingResult<()> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        Ok(())
    }

    /// Returns the items of one page.
    ///
    /// `page_index` and `page_size`, when given, replace the stored values
    /// before slicing. Pages past the end are empty.
    ///
    /// # Errors
    /// - `PagingError::InvalidArgument` when `page_size` is `Some(0)`; stored
    ///   values are left unchanged.
    pub fn paged_items(
        &mut self,
        page_index: Option<usize>,
        page_size: Option<usize>,
    ) -> PagingResult<&[T]> {
        if let Some(page_size) = page_size {
            self.set_page_size(page_size)?;
        }
        if let Some(page_index) = page_index {
            self.page_index = page_index;
        }

        let start = self.page_index.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(self.total_count);
        if start >= end {
            return Ok(&self.items[..0]);
        }
        Ok(&self.items[start..end])
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages(),
            has_previous_page: self.has_previous_page(),
            has_next_page: self.has_next_page(),
        }
    }
}

impl<T: Serialize> PagedList<T> {
    /// Stable-sorts the whole source by the attribute named `key`.
    ///
    /// `comparer` replaces the default value ordering when given. The call is
    /// a silent no-op when `key` is malformed or resolves on no element;
    /// elements lacking the attribute sort as `null`.
    pub fn reorder_items(&mut self, key: &str, descending: bool, comparer: Option<Comparer<'_>>) {
        if !is_valid_sort_key(key) {
            debug!("event=reorder module=paging status=skip reason=invalid_key key={key}");
            return;
        }

        let attributes: Vec<Option<Value>> = self
            .items
            .iter()
            .map(|item| {
                serde_json::to_value(item)
                    .ok()
                    .and_then(|value| resolve_attribute(&value, key).cloned())
            })
            .collect();
        if attributes.iter().all(Option::is_none) {
            debug!("event=reorder module=paging status=skip reason=unknown_key key={key}");
            return;
        }

        let compare: Comparer<'_> = comparer.unwrap_or(&compare_values);
        let mut keyed: Vec<(Value, T)> = attributes
            .into_iter()
            .map(|attribute| attribute.unwrap_or(Value::Null))
            .zip(std::mem::take(&mut self.items))
            .collect();
        keyed.sort_by(|(left, _), (right, _)| {
            let ordering = compare(left, right);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        self.items = keyed.into_iter().map(|(_, item)| item).collect();

        debug!(
            "event=reorder module=paging status=ok key={key} descending={descending} custom_comparer={} count={}",
            comparer.is_some(),
            self.items.len()
        );
    }
}

fn validate_page_size(page_size: usize) -> PagingResult<()> {
    if page_size == 0 {
        return Err(PagingError::InvalidArgument {
            name: "page_size",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}
