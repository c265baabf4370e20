//! Failure signals raised by assertion chains.
//!
//! Two kinds of signal exist:
//! - [`AssertionError`] - a check on the wrapped value did not hold.
//! - [`InvalidArgumentError`] - the chain itself was misused (an absent
//!   predicate, a malformed regex). This marks a bug in the calling test,
//!   not a failed expectation, and is a distinct type so callers can tell
//!   the two apart.
//!
//! Signals are raised as panic payloads, so an uncaught violation fails the
//! surrounding `#[test]` like any other assertion. Use [`capture`] to
//! intercept a signal and inspect it instead.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A failed check: the structured record of one assertion violation.
///
/// `expected` and `actual` are rendered representations - a literal, a type
/// name, a range descriptor, or a descriptive phrase - and are absent when
/// the check has nothing meaningful to put there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[error("{message}")]
pub struct AssertionError {
    /// Human-readable description, already carrying the context prefix.
    pub message: String,
    /// What the check wanted, when it can be stated.
    pub expected: Option<String>,
    /// What the check found, when it can be stated.
    pub actual: Option<String>,
}

impl AssertionError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub(crate) fn expected(mut self, value: impl Into<String>) -> Self {
        self.expected = Some(value.into());
        self
    }

    pub(crate) fn actual(mut self, value: impl Into<String>) -> Self {
        self.actual = Some(value.into());
        self
    }

    /// The failure as a JSON value, for adapters that ship failures across a
    /// process boundary.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "expected": self.expected,
            "actual": self.actual,
        })
    }
}

/// Misuse of the assertion API itself.
///
/// Raised instead of an [`AssertionError`] when a required argument is absent
/// or malformed - the test code is wrong, not the value under test.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[error("invalid argument `{argument}`: {reason}")]
pub struct InvalidArgumentError {
    /// Name of the offending argument.
    pub argument: &'static str,
    /// Why it was rejected.
    pub reason: String,
}

/// Either kind of signal, as intercepted by [`capture`].
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// A check on the wrapped value did not hold.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    /// The chain was misused.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),
    /// A panic that did not originate from this crate.
    #[error("unexpected panic: {0}")]
    Unexpected(String),
}

impl Failure {
    /// The assertion error, if that is what this failure is.
    pub fn as_assertion(&self) -> Option<&AssertionError> {
        match self {
            Failure::Assertion(error) => Some(error),
            _ => None,
        }
    }

    /// The invalid-argument error, if that is what this failure is.
    pub fn as_invalid_argument(&self) -> Option<&InvalidArgumentError> {
        match self {
            Failure::InvalidArgument(error) => Some(error),
            _ => None,
        }
    }
}

/// Raise an assertion violation.
pub(crate) fn raise(error: AssertionError) -> ! {
    panic::panic_any(error)
}

/// Raise a programmer-misuse signal.
pub(crate) fn raise_invalid(argument: &'static str, reason: impl Into<String>) -> ! {
    panic::panic_any(InvalidArgumentError {
        argument,
        reason: reason.into(),
    })
}

/// Run `check` and intercept any signal it raises.
///
/// Returns the closure's value on success, or the classified [`Failure`] if a
/// check raised. Panics that did not come from this crate are reported as
/// [`Failure::Unexpected`] with their panic message.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{capture, that};
///
/// let failure = capture(|| that(2).is_equal_to(3)).unwrap_err();
/// let error = failure.as_assertion().unwrap();
/// assert_eq!(error.expected.as_deref(), Some("3"));
/// ```
pub fn capture<R>(check: impl FnOnce() -> R) -> Result<R, Failure> {
    match panic::catch_unwind(AssertUnwindSafe(check)) {
        Ok(value) => Ok(value),
        Err(payload) => Err(classify(payload)),
    }
}

fn classify(payload: Box<dyn Any + Send>) -> Failure {
    let payload = match payload.downcast::<AssertionError>() {
        Ok(error) => return Failure::Assertion(*error),
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<InvalidArgumentError>() {
        Ok(error) => return Failure::InvalidArgument(*error),
        Err(payload) => payload,
    };
    if let Some(text) = payload.downcast_ref::<&str>() {
        Failure::Unexpected((*text).to_string())
    } else if let Some(text) = payload.downcast_ref::<String>() {
        Failure::Unexpected(text.clone())
    } else {
        Failure::Unexpected("non-string panic payload".to_string())
    }
}
