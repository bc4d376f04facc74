//! Left-to-right function application.

/// Feed a value through a function: `value.pipe(f)` is `f(value)`.
///
/// Lets a chain of free functions read in data-flow order:
///
/// ```
/// use envsure_shared::Pipe;
///
/// let trimmed_len = "  padded  ".pipe(str::trim).pipe(str::len);
/// assert_eq!(trimmed_len, 6);
/// ```
pub trait Pipe: Sized {
    /// Apply `op` to `self`.
    fn pipe<B, F>(self, op: F) -> B
    where
        F: FnOnce(Self) -> B,
    {
        op(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Either, Maybe};

    #[test]
    fn pipe_chains_in_order() {
        let result = Maybe::some(" 42 ")
            .pipe(|raw| raw.map(str::trim))
            .pipe(|raw| raw.to_either("missing"))
            .pipe(|raw| raw.flat_map(|text| Either::from(text.parse::<i32>().map_err(|_| "nan"))));
        assert_eq!(result, Either::Right(42));
    }
}
