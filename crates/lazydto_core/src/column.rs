//! SQLite column mapping for synced containers.
//!
//! # Responsibility
//! - Persist a container as its text encoding in a `TEXT` column.
//! - Load a container from a `TEXT` column without decoding it eagerly.
//!
//! # Invariants
//! - Writing never mutates the container caches.
//! - Loaded containers start text-only with the default codec and no
//!   adapters; decoding happens on the first structured read.
//! - `NULL` is rejected; use `Option<SyncedList<_>>` for nullable columns.

use crate::codec::Codec;
use crate::container::{EmptyShape, Shape, SyncedValue};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

impl<S, T, T2, C> ToSql for SyncedValue<S, T, T2, C>
where
    S: EmptyShape<T>,
    S::Of<T>: Serialize + DeserializeOwned,
    S::Of<T2>: Serialize + DeserializeOwned,
    C: Codec,
{
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.encoded_text() {
            Ok(Cow::Borrowed(text)) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes()))),
            Ok(Cow::Owned(text)) => Ok(ToSqlOutput::Owned(Value::Text(text))),
            Err(err) => Err(rusqlite::Error::ToSqlConversionFailure(Box::new(err))),
        }
    }
}

impl<S, T, T2, C> FromSql for SyncedValue<S, T, T2, C>
where
    S: Shape,
    C: Default,
{
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(|text| Self::from_text(text))
    }
}
