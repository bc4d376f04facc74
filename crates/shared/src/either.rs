//! Success/failure disjunction.
//!
//! `Either<E, A>` carries a failure in `Left` and a success in `Right`. Every
//! combinator is total and leaves the tag alone unless it exists to change it
//! (`flat_map`, `flat_map_left`). Conversions to and from `Result<A, E>` are
//! lossless, so `?` stays available at the edges.

use serde::{Deserialize, Serialize};

/// Either a failure (`Left`) or a success (`Right`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<E, A> {
    /// Failure channel.
    Left(E),
    /// Success channel.
    Right(A),
}

impl<E, A> Either<E, A> {
    /// Construct a failure.
    pub const fn left(error: E) -> Self {
        Self::Left(error)
    }

    /// Construct a success.
    pub const fn right(value: A) -> Self {
        Self::Right(value)
    }

    /// Returns true for `Left`.
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns true for `Right`.
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Transform the success value.
    pub fn map<B, F>(self, op: F) -> Either<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Right(value) => Either::Right(op(value)),
            Self::Left(error) => Either::Left(error),
        }
    }

    /// Chain a fallible computation on the success value.
    pub fn flat_map<B, F>(self, op: F) -> Either<E, B>
    where
        F: FnOnce(A) -> Either<E, B>,
    {
        match self {
            Self::Right(value) => op(value),
            Self::Left(error) => Either::Left(error),
        }
    }

    /// Transform the failure value.
    pub fn map_left<E2, F>(self, op: F) -> Either<E2, A>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Left(error) => Either::Left(op(error)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Chain a recovery computation on the failure value.
    pub fn flat_map_left<E2, F>(self, op: F) -> Either<E2, A>
    where
        F: FnOnce(E) -> Either<E2, A>,
    {
        match self {
            Self::Left(error) => op(error),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Collapse both channels into one value. Exactly one branch runs.
    pub fn match_with<B, L, R>(self, on_left: L, on_right: R) -> B
    where
        L: FnOnce(E) -> B,
        R: FnOnce(A) -> B,
    {
        match self {
            Self::Left(error) => on_left(error),
            Self::Right(value) => on_right(value),
        }
    }

    /// Borrow the failure, if any.
    pub const fn left_ref(&self) -> Option<&E> {
        match self {
            Self::Left(error) => Some(error),
            Self::Right(_) => None,
        }
    }

    /// Borrow the success, if any.
    pub const fn right_ref(&self) -> Option<&A> {
        match self {
            Self::Right(value) => Some(value),
            Self::Left(_) => None,
        }
    }

    /// Borrow both channels.
    pub const fn as_ref(&self) -> Either<&E, &A> {
        match self {
            Self::Left(error) => Either::Left(error),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Self::Right(value) => Ok(value),
            Self::Left(error) => Err(error),
        }
    }
}

impl<E, A> Either<E, Either<E, A>> {
    /// Collapse a nested success into the inner `Either`.
    pub fn flatten(self) -> Either<E, A> {
        self.flat_map(|inner| inner)
    }
}

impl<E, A> From<Result<A, E>> for Either<E, A> {
    fn from(value: Result<A, E>) -> Self {
        match value {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<E, A> From<Either<E, A>> for Result<A, E> {
    fn from(value: Either<E, A>) -> Self {
        value.into_result()
    }
}
