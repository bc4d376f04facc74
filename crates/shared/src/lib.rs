//! # envsure-shared
//!
//! Functional building blocks for the envsure workspace.
//!
//! This crate provides the algebra every other crate is written against:
//!
//! - [`Maybe`] and [`Either`] sum types with total combinators
//! - [`NonEmptyVec`] as the error-accumulation container
//! - [`sequence_r`], the error-accumulating traversal over named validations
//! - Error envelope and secret redaction
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Failures are values** - Nothing here panics; errors travel in `Left`
//! 3. **Serde-compatible** - All public data types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// =============================================================================
// ALGEBRA
// =============================================================================

pub mod either;
pub mod maybe;
pub mod nonempty;
pub mod pipe;
pub mod sequence;

// =============================================================================
// ERROR HANDLING
// =============================================================================

pub mod errors;
pub mod redaction;

pub use either::Either;
pub use errors::{ErrorCode, ErrorEnvelope, ErrorMetadata};
pub use maybe::Maybe;
pub use nonempty::NonEmptyVec;
pub use pipe::Pipe;
pub use redaction::{REDACTED, is_secret_key, redact_for_key};
pub use sequence::{Validation, sequence_r};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
