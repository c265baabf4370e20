//! # attest
//!
//! A fluent assertion library with chainable checks and structured failures.
//!
//! Wrap any value with [`that`] (or call `.should()` via the [`Attest`]
//! extension trait) and chain checks on it. Each check hands the subject back
//! unchanged on success; the first violated check raises an [`AssertionError`]
//! carrying the message plus the expected and actual values, so a test
//! harness can report more than a bare panic string.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attest::that;
//!
//! #[test]
//! fn test_user_roles() {
//!     that(vec!["admin", "editor"])
//!         .is_not_empty()
//!         .contains("admin")
//!         .has_count(2);
//!
//!     that(42).is_in_range(1, 100);
//! }
//! ```
//!
//! ## Context labels
//!
//! ```rust,ignore
//! use attest::that;
//!
//! // Every failure message in the chain is prefixed with "[user id] ".
//! that(user.id).with_context("user id").is_not_null().is_in_range(1, 9999);
//! ```
//!
//! ## Inspecting failures
//!
//! ```rust,ignore
//! use attest::{capture, that, Failure};
//!
//! let failure = capture(|| that(5).is_equal_to(6)).unwrap_err();
//! if let Failure::Assertion(error) = failure {
//!     assert_eq!(error.expected.as_deref(), Some("6"));
//!     assert_eq!(error.actual.as_deref(), Some("5"));
//! }
//! ```
//!
//! ## Dynamic subjects
//!
//! Values behind a `Box<dyn Any>` (deserialized payloads, plugin data) can be
//! checked through [`that_any`]; capabilities the type system would normally
//! enforce (ordering, iterability) are probed at runtime instead and a failed
//! probe reports as an ordinary assertion failure.

pub mod chain;
pub mod signal;

mod render;

// Entry points and wrapper types
pub use chain::{that, that_any, that_any_option, that_option, AnySubject, Attest, Subject};

// Failure signals and the capture adapter
pub use signal::{capture, AssertionError, Failure, InvalidArgumentError};
