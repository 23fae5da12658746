//! Element adapters between the in-memory type and the wire type.
//!
//! # Responsibility
//! - Hold the optional `forward: T2 -> T` and `backward: &T -> T2` pair.
//! - Report whether the wire path is engaged (both halves present).
//!
//! # Invariants
//! - The wire path engages only when both halves are set.
//! - Callers must supply mutual inverses: `forward(backward(v)) == v`.
//!   A non-inverse pair is accepted and drifts on every encode/decode cycle.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Converter from the wire element `T2` to the in-memory element `T`.
pub type ForwardFn<T, T2> = Arc<dyn Fn(T2) -> T + Send + Sync>;
/// Converter from the in-memory element `T` to the wire element `T2`.
pub type BackwardFn<T, T2> = Arc<dyn Fn(&T) -> T2 + Send + Sync>;

/// Optionally-absent adapter pair.
pub struct Adapters<T, T2> {
    forward: Option<ForwardFn<T, T2>>,
    backward: Option<BackwardFn<T, T2>>,
}

impl<T, T2> Adapters<T, T2> {
    /// Adapter set with neither half configured.
    pub fn none() -> Self {
        Self {
            forward: None,
            backward: None,
        }
    }

    /// Adapter set with both halves configured.
    pub fn pair(
        forward: impl Fn(T2) -> T + Send + Sync + 'static,
        backward: impl Fn(&T) -> T2 + Send + Sync + 'static,
    ) -> Self {
        Self {
            forward: Some(Arc::new(forward)),
            backward: Some(Arc::new(backward)),
        }
    }

    pub fn set_forward(&mut self, forward: impl Fn(T2) -> T + Send + Sync + 'static) {
        self.forward = Some(Arc::new(forward));
    }

    pub fn set_backward(&mut self, backward: impl Fn(&T) -> T2 + Send + Sync + 'static) {
        self.backward = Some(Arc::new(backward));
    }

    pub fn clear_forward(&mut self) {
        self.forward = None;
    }

    pub fn clear_backward(&mut self) {
        self.backward = None;
    }

    pub fn has_forward(&self) -> bool {
        self.forward.is_some()
    }

    pub fn has_backward(&self) -> bool {
        self.backward.is_some()
    }

    /// Returns whether encode/decode go through the wire type.
    pub fn is_engaged(&self) -> bool {
        self.forward.is_some() && self.backward.is_some()
    }

    /// Returns both halves when the wire path is engaged.
    pub(crate) fn engaged(
        &self,
    ) -> Option<(
        &(dyn Fn(T2) -> T + Send + Sync),
        &(dyn Fn(&T) -> T2 + Send + Sync),
    )> {
        match (&self.forward, &self.backward) {
            (Some(forward), Some(backward)) => Some((forward.as_ref(), backward.as_ref())),
            _ => None,
        }
    }
}

impl<T, T2> Default for Adapters<T, T2> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, T2> Clone for Adapters<T, T2> {
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            backward: self.backward.clone(),
        }
    }
}

impl<T, T2> Debug for Adapters<T, T2> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapters")
            .field("forward", &self.has_forward())
            .field("backward", &self.has_backward())
            .finish()
    }
}
