//! Optional values as a closed sum type.
//!
//! `Maybe` mirrors `std::option::Option` but carries the combinator set the
//! config reader is written against (`or_else` returning the value,
//! `to_either` bridging into [`Either`]). Conversions in both directions keep
//! it interchangeable with the standard type at API boundaries.

use crate::either::Either;
use serde::{Deserialize, Serialize};

/// A value that may be absent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maybe<A> {
    /// No payload.
    #[default]
    None,
    /// Exactly one payload.
    Some(A),
}

impl<A> Maybe<A> {
    /// The absent value.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Wrap a present value.
    pub const fn some(value: A) -> Self {
        Self::Some(value)
    }

    /// Normalize a possibly-absent source value.
    pub fn of(value: Option<A>) -> Self {
        value.map_or(Self::None, Self::Some)
    }

    /// Returns true when a value is held.
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns true when no value is held.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Transform the held value, if any.
    pub fn map<B, F>(self, op: F) -> Maybe<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Some(value) => Maybe::Some(op(value)),
            Self::None => Maybe::None,
        }
    }

    /// Chain a computation that may itself produce nothing.
    pub fn flat_map<B, F>(self, op: F) -> Maybe<B>
    where
        F: FnOnce(A) -> Maybe<B>,
    {
        match self {
            Self::Some(value) => op(value),
            Self::None => Maybe::None,
        }
    }

    /// Return the held value or the supplied fallback.
    pub fn or_else(self, fallback: A) -> A {
        match self {
            Self::Some(value) => value,
            Self::None => fallback,
        }
    }

    /// `Some(a)` becomes `Right(a)`, `None` becomes `Left(error)`.
    pub fn to_either<E>(self, error: E) -> Either<E, A> {
        match self {
            Self::Some(value) => Either::Right(value),
            Self::None => Either::Left(error),
        }
    }

    /// Borrow the held value.
    pub const fn as_ref(&self) -> Maybe<&A> {
        match self {
            Self::Some(value) => Maybe::Some(value),
            Self::None => Maybe::None,
        }
    }

    /// Convert into the standard library option.
    pub fn into_option(self) -> Option<A> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }
}

impl<A> From<Option<A>> for Maybe<A> {
    fn from(value: Option<A>) -> Self {
        Self::of(value)
    }
}

impl<A> From<Maybe<A>> for Option<A> {
    fn from(value: Maybe<A>) -> Self {
        value.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn of_normalizes_absence() {
        assert_eq!(Maybe::<i32>::of(None), Maybe::None);
        assert_eq!(Maybe::of(Some(3)), Maybe::Some(3));
    }

    #[test]
    fn map_and_flat_map_skip_none() {
        let mut called = false;
        let mapped = Maybe::<i32>::none().map(|value| {
            called = true;
            value + 1
        });
        assert_eq!(mapped, Maybe::None);
        assert!(!called);

        let chained = Maybe::some(4).flat_map(|value| {
            if value % 2 == 0 {
                Maybe::some(value / 2)
            } else {
                Maybe::none()
            }
        });
        assert_eq!(chained, Maybe::Some(2));
        assert_eq!(Maybe::some(3).flat_map(|_| Maybe::<i32>::none()), Maybe::None);
    }

    #[test]
    fn default_is_none() {
        assert_eq!(Maybe::<i64>::default(), Maybe::none());
        assert_eq!(Maybe::<String>::default().into_option(), None);
    }

    #[test]
    fn or_else_prefers_held_value() {
        assert_eq!(Maybe::some("held").or_else("fallback"), "held");
        assert_eq!(Maybe::none().or_else("fallback"), "fallback");
    }

    #[test]
    fn to_either_maps_tags() {
        assert_eq!(Maybe::some(1).to_either("missing"), Either::Right(1));
        assert_eq!(
            Maybe::<i32>::none().to_either("missing"),
            Either::Left("missing")
        );
    }

    proptest! {
        #[test]
        fn option_round_trip(value in proptest::option::of(any::<i64>())) {
            let maybe = Maybe::of(value);
            prop_assert_eq!(maybe.is_some(), value.is_some());
            prop_assert_eq!(maybe.into_option(), value);
        }
    }
}
