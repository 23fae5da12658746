//! Structured shapes a synced container can hold.
//!
//! A shape maps an element type `E` to the in-memory value the container
//! caches (`E`, `Vec<E>` or `BTreeMap<K, E>`) and knows how to carry that
//! value across an element adapter.

use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Element-generic structured shape.
pub trait Shape {
    /// Stable shape name used in logs and errors.
    const KIND: &'static str;

    /// Structured value holding elements of type `E`.
    type Of<E>;

    /// Builds a new value by converting each element by reference.
    fn map_ref<A, B>(value: &Self::Of<A>, f: impl FnMut(&A) -> B) -> Self::Of<B>;

    /// Builds a new value by converting each owned element.
    fn map_owned<A, B>(value: Self::Of<A>, f: impl FnMut(A) -> B) -> Self::Of<B>;
}

/// Shapes that can produce an empty default for element type `E`.
pub trait EmptyShape<E>: Shape {
    fn empty() -> Self::Of<E>;
}

/// One value of `E`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Single;

/// Ordered sequence of `E`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequence;

/// Mapping from `K` to `E`, iterated in key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyed<K>(PhantomData<fn() -> K>);

impl Shape for Single {
    const KIND: &'static str = "object";

    type Of<E> = E;

    fn map_ref<A, B>(value: &A, mut f: impl FnMut(&A) -> B) -> B {
        f(value)
    }

    fn map_owned<A, B>(value: A, mut f: impl FnMut(A) -> B) -> B {
        f(value)
    }
}

impl<E: Default> EmptyShape<E> for Single {
    fn empty() -> E {
        E::default()
    }
}

impl Shape for Sequence {
    const KIND: &'static str = "sequence";

    type Of<E> = Vec<E>;

    fn map_ref<A, B>(value: &Vec<A>, f: impl FnMut(&A) -> B) -> Vec<B> {
        value.iter().map(f).collect()
    }

    fn map_owned<A, B>(value: Vec<A>, f: impl FnMut(A) -> B) -> Vec<B> {
        value.into_iter().map(f).collect()
    }
}

impl<E> EmptyShape<E> for Sequence {
    fn empty() -> Vec<E> {
        Vec::new()
    }
}

impl<K: Ord + Clone> Shape for Keyed<K> {
    const KIND: &'static str = "map";

    type Of<E> = BTreeMap<K, E>;

    fn map_ref<A, B>(value: &BTreeMap<K, A>, mut f: impl FnMut(&A) -> B) -> BTreeMap<K, B> {
        value
            .iter()
            .map(|(key, item)| (key.clone(), f(item)))
            .collect()
    }

    fn map_owned<A, B>(value: BTreeMap<K, A>, mut f: impl FnMut(A) -> B) -> BTreeMap<K, B> {
        value
            .into_iter()
            .map(|(key, item)| (key, f(item)))
            .collect()
    }
}

impl<K: Ord + Clone, E> EmptyShape<E> for Keyed<K> {
    fn empty() -> BTreeMap<K, E> {
        BTreeMap::new()
    }
}
