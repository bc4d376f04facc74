//! A vector with at least one element.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered sequence whose first element is guaranteed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Build from a first element and the remaining ones.
    pub const fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Single-element vector.
    pub const fn singleton(head: T) -> Self {
        Self::new(head, Vec::new())
    }

    /// Returns `None` for an empty input.
    pub fn from_vec(values: Vec<T>) -> Option<Self> {
        let mut values = values.into_iter();
        let head = values.next()?;
        Some(Self::new(head, values.collect()))
    }

    /// First element.
    pub const fn first(&self) -> &T {
        &self.head
    }

    /// Number of elements (always at least one).
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Always false; present so the type reads like other collections.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Append one element.
    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    /// Append a possibly-empty sequence, keeping order.
    #[must_use]
    pub fn concat<I>(mut self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.tail.extend(other);
        self
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Transform every element.
    pub fn map<U, F>(self, mut op: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        let head = op(self.head);
        NonEmptyVec::new(head, self.tail.into_iter().map(op).collect())
    }

    /// Flatten into a plain vector.
    pub fn into_vec(self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.tail.len() + 1);
        values.push(self.head);
        values.extend(self.tail);
        values
    }
}

impl<T: fmt::Display> NonEmptyVec<T> {
    /// Render every element joined by `separator`.
    pub fn join(&self, separator: &str) -> String {
        let mut output = self.head.to_string();
        for value in &self.tail {
            output.push_str(separator);
            output.push_str(&value.to_string());
        }
        output
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(value: NonEmptyVec<T>) -> Self {
        value.into_vec()
    }
}

impl<T: Serialize> Serialize for NonEmptyVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmptyVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Self::from_vec(values).ok_or_else(|| D::Error::custom("expected at least one element"))
    }
}
