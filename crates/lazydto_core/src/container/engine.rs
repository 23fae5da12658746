//! Generic synchronization engine shared by every container shape.

use super::adapter::Adapters;
use super::shape::{EmptyShape, Shape};
use super::{ContainerError, ContainerResult};
use crate::codec::{Codec, CodecError, JsonCodec};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{Debug, Formatter};

/// Which representations are currently cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    StructOnly,
    TextOnly,
    Both,
}

/// Container keeping a structured value of shape `S` and its text encoding
/// in sync.
///
/// `T` is the in-memory element type, `T2` the wire element type used when
/// both adapters are configured, `C` the text codec.
pub struct SyncedValue<S: Shape, T, T2 = T, C = JsonCodec> {
    structured: Option<S::Of<T>>,
    text: Option<String>,
    adapters: Adapters<T, T2>,
    codec: C,
}

impl<S: Shape, T, T2, C: Default> SyncedValue<S, T, T2, C> {
    /// Creates an empty container with the default codec and no adapters.
    pub fn new() -> Self {
        Self::with_codec(C::default())
    }

    /// Creates a text-only container; decoding is deferred to the first read.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut container = Self::new();
        container.set_text(text);
        container
    }

    /// Creates an empty container using the given adapter pair.
    ///
    /// # Precondition
    /// `forward(backward(v)) == v` for every value the caller stores.
    pub fn with_adapters(
        forward: impl Fn(T2) -> T + Send + Sync + 'static,
        backward: impl Fn(&T) -> T2 + Send + Sync + 'static,
    ) -> Self {
        let mut container = Self::new();
        container.adapters = Adapters::pair(forward, backward);
        container
    }
}

impl<S: Shape, T, T2, C> SyncedValue<S, T, T2, C> {
    /// Creates an empty container with an explicit codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            structured: None,
            text: None,
            adapters: Adapters::none(),
            codec,
        }
    }

    pub fn state(&self) -> CacheState {
        match (self.structured.is_some(), self.text.is_some()) {
            (false, false) => CacheState::Empty,
            (true, false) => CacheState::StructOnly,
            (false, true) => CacheState::TextOnly,
            (true, true) => CacheState::Both,
        }
    }

    pub fn has_structured(&self) -> bool {
        self.structured.is_some()
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Replaces the text cache and drops the structured cache.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.structured = None;
    }

    /// Drops the text cache; the next text read re-encodes.
    pub fn invalidate_text(&mut self) {
        self.text = None;
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn adapters(&self) -> &Adapters<T, T2> {
        &self.adapters
    }

    /// Mutable adapter access. Changes apply to the next encode or decode
    /// only; cached text is left untouched.
    pub fn adapters_mut(&mut self) -> &mut Adapters<T, T2> {
        &mut self.adapters
    }

    pub fn set_forward_adapter(&mut self, forward: impl Fn(T2) -> T + Send + Sync + 'static) {
        self.adapters.set_forward(forward);
    }

    pub fn set_backward_adapter(&mut self, backward: impl Fn(&T) -> T2 + Send + Sync + 'static) {
        self.adapters.set_backward(backward);
    }

    pub fn clear_adapters(&mut self) {
        self.adapters = Adapters::none();
    }
}

impl<S, T, T2, C> SyncedValue<S, T, T2, C>
where
    S: EmptyShape<T>,
    S::Of<T>: Serialize + DeserializeOwned,
    S::Of<T2>: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Creates a container holding `value`, with its text encoded eagerly.
    pub fn from_structured(value: S::Of<T>) -> ContainerResult<Self>
    where
        C: Default,
    {
        let mut container = Self::new();
        container.set_structured(value)?;
        Ok(container)
    }

    /// Returns the structured value, decoding cached text on a cache miss.
    ///
    /// An empty container yields the shape's empty default without caching
    /// it.
    ///
    /// # Errors
    /// - `ContainerError::Decode` when cached text does not parse.
    pub fn structured(&mut self) -> ContainerResult<Cow<'_, S::Of<T>>>
    where
        S::Of<T>: Clone,
    {
        if self.structured.is_none() && self.text.is_some() {
            self.materialize()?;
        }
        // Why: an empty container must stay Empty after a read, so the
        // default is handed out owned instead of being cached.
        Ok(match &self.structured {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(S::empty()),
        })
    }

    /// Consumes the container and returns its structured value.
    pub fn into_structured(mut self) -> ContainerResult<S::Of<T>> {
        self.materialize()?;
        Ok(self.structured.unwrap_or_else(S::empty))
    }

    /// Stores `value` and re-encodes the text cache right away.
    ///
    /// # Errors
    /// - `ContainerError::Encode` when the codec rejects the value. The value
    ///   is kept and the text cache is left empty.
    pub fn set_structured(&mut self, value: S::Of<T>) -> ContainerResult<()> {
        let encoded = self.encode_value(&value);
        self.structured = Some(value);
        match encoded {
            Ok(text) => {
                self.text = Some(text);
                Ok(())
            }
            Err(err) => {
                self.text = None;
                Err(err)
            }
        }
    }

    /// Returns the text encoding, encoding the structured value on a cache
    /// miss.
    ///
    /// On an Empty container the empty default is cached alongside its text,
    /// leaving the container in `Both`.
    pub fn text(&mut self) -> ContainerResult<&str> {
        let text = match self.text.take() {
            Some(text) => text,
            None => {
                // Why: caching only the encoded default would make a later
                // adapter change decode it as wire text on the next read.
                if self.structured.is_none() {
                    self.structured = Some(S::empty());
                }
                self.encode_current()?
            }
        };
        Ok(self.text.insert(text).as_str())
    }

    /// Returns the text encoding without filling the text cache.
    pub fn encoded_text(&self) -> ContainerResult<Cow<'_, str>> {
        match &self.text {
            Some(text) => Ok(Cow::Borrowed(text.as_str())),
            None => self.encode_current().map(Cow::Owned),
        }
    }

    /// Mutates the structured value in place and regenerates the text.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut S::Of<T>) -> R) -> ContainerResult<R> {
        self.try_update(|value| Ok(f(value)))
    }

    /// Fallible form of [`SyncedValue::update`].
    ///
    /// `f` must reject before it mutates anything. When it fails, the
    /// materialized value and the cached text are both kept as they were.
    pub fn try_update<R>(
        &mut self,
        f: impl FnOnce(&mut S::Of<T>) -> ContainerResult<R>,
    ) -> ContainerResult<R> {
        let value = self.materialize()?;
        // Why: a rejected call leaves the value equal to the cached text;
        // re-encoding would rewrite caller text (and drift through non-inverse
        // adapters) for an operation that did nothing.
        let out = f(value)?;
        self.regenerate_text()?;
        Ok(out)
    }

    fn materialize(&mut self) -> ContainerResult<&mut S::Of<T>> {
        let value = match self.structured.take() {
            Some(value) => value,
            None => match self.text.as_deref() {
                Some(text) => self.decode_text(text)?,
                None => S::empty(),
            },
        };
        Ok(self.structured.insert(value))
    }

    fn regenerate_text(&mut self) -> ContainerResult<()> {
        self.text = None;
        if let Some(value) = &self.structured {
            let text = self.encode_value(value)?;
            self.text = Some(text);
        }
        Ok(())
    }

    fn decode_text(&self, text: &str) -> ContainerResult<S::Of<T>> {
        let decoded = match self.adapters.engaged() {
            Some((forward, _)) => self
                .codec
                .decode::<S::Of<T2>>(text)
                .map(|wire| S::map_owned::<T2, T>(wire, forward)),
            None => self.codec.decode::<S::Of<T>>(text),
        };
        match decoded {
            Ok(value) => {
                debug!(
                    "event=materialize module=container status=ok direction=decode shape={} wire={} bytes={}",
                    S::KIND,
                    self.adapters.is_engaged(),
                    text.len()
                );
                Ok(value)
            }
            Err(err) => {
                warn!(
                    "event=materialize module=container status=error direction=decode shape={} wire={} bytes={} error={}",
                    S::KIND,
                    self.adapters.is_engaged(),
                    text.len(),
                    err
                );
                Err(ContainerError::Decode {
                    shape: S::KIND,
                    source: err,
                })
            }
        }
    }

    fn encode_current(&self) -> ContainerResult<String> {
        match &self.structured {
            Some(value) => self.encode_value(value),
            None => self.encode_value(&S::empty()),
        }
    }

    fn encode_value(&self, value: &S::Of<T>) -> ContainerResult<String> {
        let encoded = match self.adapters.engaged() {
            Some((_, backward)) => self.codec.encode(&S::map_ref::<T, T2>(value, backward)),
            None => self.codec.encode(value),
        };
        encoded
            .map(|text| {
                debug!(
                    "event=materialize module=container status=ok direction=encode shape={} wire={} bytes={}",
                    S::KIND,
                    self.adapters.is_engaged(),
                    text.len()
                );
                text
            })
            .map_err(|err: CodecError| ContainerError::Encode {
                shape: S::KIND,
                source: err,
            })
    }
}

impl<S: Shape, T, T2, C: Default> Default for SyncedValue<S, T, T2, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T, T2, C> Clone for SyncedValue<S, T, T2, C>
where
    S: Shape,
    S::Of<T>: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            structured: self.structured.clone(),
            text: self.text.clone(),
            adapters: self.adapters.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<S, T, T2, C> Debug for SyncedValue<S, T, T2, C>
where
    S: Shape,
    S::Of<T>: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncedValue")
            .field("shape", &S::KIND)
            .field("structured", &self.structured)
            .field("text", &self.text)
            .field("adapters", &self.adapters)
            .finish()
    }
}
