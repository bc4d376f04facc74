//! Error-accumulating traversal over named validations.
//!
//! [`sequence_r`] turns a collection of named `Either` values into one
//! `Either` over the whole record. Unlike `Result`'s `collect`, it does not
//! stop at the first failure: every `Left` contributes its errors, in
//! encounter order.

use crate::either::Either;
use crate::nonempty::NonEmptyVec;
use std::collections::BTreeMap;

/// A single named validation outcome.
pub type Validation<E, T> = Either<NonEmptyVec<E>, T>;

/// Combine named validations into one record, accumulating every failure.
///
/// The first entry seeds the accumulator. Each following entry is folded in:
///
/// | accumulator | entry   | result                               |
/// |-------------|---------|--------------------------------------|
/// | `Left`      | `Left`  | errors concatenated                  |
/// | `Left`      | `Right` | accumulator unchanged                |
/// | `Right`     | `Left`  | `Left` of the entry's errors         |
/// | `Right`     | `Right` | record extended with the entry       |
///
/// An empty input yields `Right` of an empty record. When a name repeats, the
/// later successful value replaces the earlier one.
///
/// ```
/// use envsure_shared::{Either, NonEmptyVec, sequence_r};
///
/// let validated = sequence_r([
///     ("host", Either::right("localhost")),
///     ("port", Either::left(NonEmptyVec::singleton("port is missing"))),
///     ("user", Either::left(NonEmptyVec::singleton("user is missing"))),
/// ]);
///
/// let errors = validated.left_ref().map(|errors| errors.join("; "));
/// assert_eq!(errors.as_deref(), Some("port is missing; user is missing"));
/// ```
pub fn sequence_r<K, E, T, I>(entries: I) -> Validation<E, BTreeMap<K, T>>
where
    K: Ord,
    I: IntoIterator<Item = (K, Validation<E, T>)>,
{
    let mut entries = entries.into_iter();
    let Some((first_key, first)) = entries.next() else {
        return Either::Right(BTreeMap::new());
    };

    let initial = first.map(|value| BTreeMap::from([(first_key, value)]));

    entries.fold(initial, |acc, (key, entry)| match (acc, entry) {
        (Either::Left(errors), Either::Left(more)) => Either::Left(errors.concat(more)),
        (Either::Left(errors), Either::Right(_)) | (Either::Right(_), Either::Left(errors)) => {
            Either::Left(errors)
        },
        (Either::Right(mut record), Either::Right(value)) => {
            record.insert(key, value);
            Either::Right(record)
        },
    })
}
