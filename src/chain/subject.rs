//! Core wrapper type and scalar checks.
//!
//! `Subject` holds the value under test together with an optional context
//! label. Absence is modelled explicitly (`Option<T>`), so the null checks
//! behave the same whether `T` is a reference type, a number, or anything
//! else. Every check consumes the subject and hands it back unchanged on
//! success; the first violation raises and ends the chain.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::render::{display_optional, display_value, prefixed, short_type_name};
use crate::signal::{raise, raise_invalid, AssertionError};

const SATISFIES_DEFAULT: &str = "Value did not satisfy the specified condition.";
const FAILS_DEFAULT: &str = "Value unexpectedly satisfied the condition.";

/// Wrap a value to start an assertion chain.
///
/// # Example
///
/// ```rust,ignore
/// use attest::that;
///
/// that(5).is_in_range(1, 10);
/// that("admin").is_equal_to("admin");
/// ```
pub fn that<T>(value: T) -> Subject<T> {
    Subject {
        value: Some(value),
        context: None,
    }
}

/// Wrap a possibly-absent value to start an assertion chain.
///
/// This is the explicit entry for null checks:
///
/// ```rust,ignore
/// use attest::that_option;
///
/// that_option(Some(5)).is_not_null();
/// that_option::<String>(None).is_null();
/// ```
pub fn that_option<T>(value: Option<T>) -> Subject<T> {
    Subject {
        value,
        context: None,
    }
}

/// Extension trait: start a chain directly on any value.
///
/// # Example
///
/// ```rust,ignore
/// use attest::Attest;
///
/// 5.should().is_in_range(1, 10);
/// "admin".should().is_not_null();
/// ```
pub trait Attest: Sized {
    /// Wrap `self` in a [`Subject`].
    fn should(self) -> Subject<Self> {
        that(self)
    }
}

impl<T: Sized> Attest for T {}

/// A value under test, with an optional context label.
///
/// Immutable: checks never alter the wrapped value, and
/// [`with_context`](Subject::with_context) returns a new subject rather than
/// mutating in place.
#[derive(Debug, Clone)]
pub struct Subject<T> {
    value: Option<T>,
    context: Option<String>,
}

impl<T> Subject<T> {
    // =========================================================================
    // Context and accessors
    // =========================================================================

    /// Attach a context label; every later failure message in the chain is
    /// prefixed with `"[<label>] "`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// that(user.age).with_context("age").is_in_range(0, 130);
    /// ```
    pub fn with_context(self, label: impl Into<String>) -> Self {
        Self {
            value: self.value,
            context: Some(label.into()),
        }
    }

    /// The wrapped value, or `None` when the subject is absent.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consume the subject and return the wrapped value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// The context label, if one was attached.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Start a failure record with the context prefix applied.
    pub(crate) fn fail(&self, message: impl Into<String>) -> AssertionError {
        AssertionError::new(prefixed(self.context.as_deref(), &message.into()))
    }

    // =========================================================================
    // Null checks
    // =========================================================================

    /// Check the value is present.
    ///
    /// # Panics
    ///
    /// Raises an [`AssertionError`] if the subject is absent.
    pub fn is_not_null(self) -> Self {
        if self.value.is_none() {
            raise(self.fail("Expected value to not be null.").actual("null"));
        }
        self
    }

    /// Check the value is absent.
    ///
    /// # Panics
    ///
    /// Raises an [`AssertionError`] if the subject holds a value.
    pub fn is_null(self) -> Self
    where
        T: Debug,
    {
        if let Some(value) = &self.value {
            let rendered = display_value(value);
            raise(
                self.fail(format!("Expected value to be null, but was '{}'.", rendered))
                    .actual(rendered),
            );
        }
        self
    }

    // =========================================================================
    // Equality checks
    // =========================================================================

    /// Check the value equals `expected`, by `PartialEq`.
    ///
    /// An absent subject is unequal to everything.
    ///
    /// # Panics
    ///
    /// Raises an [`AssertionError`] carrying both values if they differ.
    pub fn is_equal_to(self, expected: T) -> Self
    where
        T: PartialEq + Debug,
    {
        if self.value.as_ref() != Some(&expected) {
            let wanted = display_value(&expected);
            let found = display_optional(self.value.as_ref());
            raise(
                self.fail(format!(
                    "Expected value to be '{}', but was '{}'.",
                    wanted, found
                ))
                .expected(wanted)
                .actual(found),
            );
        }
        self
    }

    /// Check the value does not equal `unexpected`.
    ///
    /// # Panics
    ///
    /// Raises an [`AssertionError`] if the values are equal.
    pub fn is_not_equal_to(self, unexpected: T) -> Self
    where
        T: PartialEq + Debug,
    {
        if self.value.as_ref() == Some(&unexpected) {
            let rendered = display_value(&unexpected);
            raise(
                self.fail(format!(
                    "Expected value to not be '{}', but it was.",
                    rendered
                ))
                .expected(format!("Not {}", rendered))
                .actual(display_optional(self.value.as_ref())),
            );
        }
        self
    }

    // =========================================================================
    // Type checks
    // =========================================================================

    /// Check the runtime type of the value is `U`.
    ///
    /// An absent subject never matches; its type renders as the literal
    /// string `null`. Type names render unqualified (`String`, not
    /// `alloc::string::String`).
    pub fn is_of_type<U: Any>(self) -> Self
    where
        T: Any,
    {
        if self.value.is_none() || TypeId::of::<T>() != TypeId::of::<U>() {
            let wanted = short_type_name::<U>();
            let found = self.found_type_name();
            raise(
                self.fail(format!("Expected type '{}', but found '{}'.", wanted, found))
                    .expected(wanted)
                    .actual(found),
            );
        }
        self
    }

    /// Check the runtime type of the value is not `U`.
    ///
    /// An absent subject matches no type, so it always passes.
    pub fn is_not_of_type<U: Any>(self) -> Self
    where
        T: Any,
    {
        if self.value.is_some() && TypeId::of::<T>() == TypeId::of::<U>() {
            let unwanted = short_type_name::<U>();
            raise(
                self.fail(format!(
                    "Did not expect type '{}', but found it.",
                    unwanted
                ))
                .expected(format!("Not {}", unwanted))
                .actual(self.found_type_name()),
            );
        }
        self
    }

    fn found_type_name(&self) -> String
    where
        T: Any,
    {
        match &self.value {
            Some(_) => short_type_name::<T>(),
            None => "null".to_string(),
        }
    }

    // =========================================================================
    // Predicate checks
    // =========================================================================

    /// Check the value satisfies `predicate`.
    ///
    /// An absent subject satisfies nothing.
    pub fn satisfies<F>(self, predicate: F) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(Some(predicate), true, SATISFIES_DEFAULT)
    }

    /// Like [`satisfies`](Self::satisfies), with a custom failure message.
    pub fn satisfies_with<F>(self, predicate: F, message: &str) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(Some(predicate), true, message)
    }

    /// Check the value does not satisfy `predicate`.
    pub fn fails<F>(self, predicate: F) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(Some(predicate), false, FAILS_DEFAULT)
    }

    /// Like [`fails`](Self::fails), with a custom failure message.
    pub fn fails_with<F>(self, predicate: F, message: &str) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(Some(predicate), false, message)
    }

    /// [`satisfies`](Self::satisfies) for a predicate that may be absent,
    /// e.g. one arriving from configuration or a dynamic boundary.
    ///
    /// # Panics
    ///
    /// Raises an [`InvalidArgumentError`](crate::signal::InvalidArgumentError)
    /// if the predicate is `None` - that is a bug in the calling test, not a
    /// failed expectation.
    pub fn satisfies_opt<F>(self, predicate: Option<F>) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(predicate, true, SATISFIES_DEFAULT)
    }

    /// [`fails`](Self::fails) for a predicate that may be absent.
    ///
    /// # Panics
    ///
    /// Raises an [`InvalidArgumentError`](crate::signal::InvalidArgumentError)
    /// if the predicate is `None`.
    pub fn fails_opt<F>(self, predicate: Option<F>) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        self.check_predicate(predicate, false, FAILS_DEFAULT)
    }

    fn check_predicate<F>(self, predicate: Option<F>, want: bool, message: &str) -> Self
    where
        T: Debug,
        F: Fn(&T) -> bool,
    {
        let Some(predicate) = predicate else {
            raise_invalid("predicate", "a predicate is required");
        };
        let satisfied = self.value.as_ref().map(&predicate).unwrap_or(false);
        if satisfied != want {
            let expected = if want {
                "Satisfied condition"
            } else {
                "Failed condition"
            };
            raise(
                self.fail(message)
                    .expected(expected)
                    .actual(display_optional(self.value.as_ref())),
            );
        }
        self
    }

    // =========================================================================
    // Range check
    // =========================================================================

    /// Check `min <= value <= max`, inclusive on both ends.
    ///
    /// An absent value is never in range. A value that cannot be ordered
    /// against the bounds (a NaN float, for instance) reports a comparison
    /// failure rather than passing silently.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// that(5).is_in_range(1, 10);
    /// ```
    pub fn is_in_range(self, min: T, max: T) -> Self
    where
        T: PartialOrd + Debug,
    {
        let low = display_value(&min);
        let high = display_value(&max);
        let Some(value) = &self.value else {
            raise(
                self.fail(format!(
                    "Expected value to be between {} and {} (inclusive), but was null.",
                    low, high
                ))
                .expected(format!("[{}, {}]", low, high))
                .actual("null"),
            );
        };
        match (value.partial_cmp(&min), value.partial_cmp(&max)) {
            (Some(to_min), Some(to_max))
                if to_min != Ordering::Less && to_max != Ordering::Greater => {}
            (Some(_), Some(_)) => {
                let found = display_value(value);
                raise(
                    self.fail(format!(
                        "Expected value to be between {} and {} (inclusive), but was {}.",
                        low, high, found
                    ))
                    .expected(format!("[{}, {}]", low, high))
                    .actual(found),
                );
            }
            _ => {
                let name = short_type_name::<T>();
                raise(self.fail(format!(
                    "Value of type {} does not implement comparison for {}.",
                    name, name
                )));
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::capture;

    #[test]
    fn test_that_preserves_value() {
        let subject = that(5);
        assert_eq!(subject.value(), Some(&5));
        assert_eq!(subject.into_value(), Some(5));
    }

    #[test]
    fn test_with_context_returns_new_subject() {
        let plain = that(5);
        let labelled = plain.clone().with_context("count");
        assert_eq!(plain.context(), None);
        assert_eq!(labelled.context(), Some("count"));
        assert_eq!(labelled.value(), Some(&5));
    }

    #[test]
    fn test_is_not_null_passes_for_present_value() {
        that(5).is_not_null();
        that_option(Some("x")).is_not_null();
    }

    #[test]
    fn test_is_not_null_raises_for_absent_value() {
        let failure = capture(|| that_option::<i32>(None).is_not_null()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected value to not be null.");
        assert_eq!(error.expected, None);
        assert_eq!(error.actual.as_deref(), Some("null"));
    }

    #[test]
    fn test_is_null_raises_for_present_value() {
        let failure = capture(|| that("Test").is_null()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected value to be null, but was 'Test'.");
        assert_eq!(error.actual.as_deref(), Some("Test"));
    }

    #[test]
    fn test_is_equal_to_passes_and_raises() {
        that(5).is_equal_to(5);

        let failure = capture(|| that(5).is_equal_to(6)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected value to be '6', but was '5'.");
        assert_eq!(error.expected.as_deref(), Some("6"));
        assert_eq!(error.actual.as_deref(), Some("5"));
    }

    #[test]
    fn test_is_equal_to_treats_absent_as_unequal() {
        let failure = capture(|| that_option::<i32>(None).is_equal_to(6)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.actual.as_deref(), Some("null"));
    }

    #[test]
    fn test_is_not_equal_to_uses_descriptive_expected() {
        that(5).is_not_equal_to(6);

        let failure = capture(|| that("same").is_not_equal_to("same")).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Expected value to not be 'same', but it was."
        );
        assert_eq!(error.expected.as_deref(), Some("Not same"));
        assert_eq!(error.actual.as_deref(), Some("same"));
    }

    #[test]
    fn test_is_of_type_matches_runtime_type() {
        that(String::from("x")).is_of_type::<String>();
        that(5i32).is_of_type::<i32>();
    }

    #[test]
    fn test_is_of_type_raises_with_short_names() {
        let failure = capture(|| that(5i32).is_of_type::<String>()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected type 'String', but found 'i32'.");
        assert_eq!(error.expected.as_deref(), Some("String"));
        assert_eq!(error.actual.as_deref(), Some("i32"));
    }

    #[test]
    fn test_is_of_type_renders_absent_as_null() {
        let failure = capture(|| that_option::<String>(None).is_of_type::<String>()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected type 'String', but found 'null'.");
        assert_eq!(error.actual.as_deref(), Some("null"));
    }

    #[test]
    fn test_is_not_of_type_passes_for_other_types_and_absent() {
        that(5i32).is_not_of_type::<String>();
        that_option::<String>(None).is_not_of_type::<String>();
    }

    #[test]
    fn test_is_not_of_type_raises_on_match() {
        let failure = capture(|| that(5i32).is_not_of_type::<i32>()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Did not expect type 'i32', but found it.");
        assert_eq!(error.expected.as_deref(), Some("Not i32"));
        assert_eq!(error.actual.as_deref(), Some("i32"));
    }

    #[test]
    fn test_satisfies_passes_and_raises() {
        that(5).satisfies(|value: &i32| *value > 0);

        let failure = capture(|| that(5).satisfies(|value: &i32| *value > 10)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Value did not satisfy the specified condition."
        );
        assert_eq!(error.expected.as_deref(), Some("Satisfied condition"));
        assert_eq!(error.actual.as_deref(), Some("5"));
    }

    #[test]
    fn test_satisfies_with_custom_message() {
        let failure = capture(|| {
            that(5).satisfies_with(|value: &i32| *value > 10, "must be big")
        })
        .unwrap_err();
        assert_eq!(failure.as_assertion().unwrap().message, "must be big");
    }

    #[test]
    fn test_fails_passes_and_raises() {
        that(5).fails(|value: &i32| *value > 10);

        let failure = capture(|| that(5).fails(|value: &i32| *value > 0)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Value unexpectedly satisfied the condition."
        );
        assert_eq!(error.expected.as_deref(), Some("Failed condition"));
    }

    #[test]
    fn test_absent_predicate_is_misuse_not_violation() {
        let failure = capture(|| {
            that(5).satisfies_opt(None::<fn(&i32) -> bool>)
        })
        .unwrap_err();
        assert!(failure.as_invalid_argument().is_some());
        assert!(failure.as_assertion().is_none());

        let failure = capture(|| that(5).fails_opt(None::<fn(&i32) -> bool>)).unwrap_err();
        assert!(failure.as_invalid_argument().is_some());
    }

    #[test]
    fn test_present_opt_predicate_behaves_like_plain() {
        that(5).satisfies_opt(Some(|value: &i32| *value > 0));
        that(5).fails_opt(Some(|value: &i32| *value > 10));
    }

    #[test]
    fn test_absent_value_never_satisfies() {
        let failure =
            capture(|| that_option::<i32>(None).satisfies(|value: &i32| *value > 0)).unwrap_err();
        assert_eq!(
            failure.as_assertion().unwrap().actual.as_deref(),
            Some("null")
        );

        // And therefore trivially fails every predicate.
        that_option::<i32>(None).fails(|value: &i32| *value > 0);
    }

    #[test]
    fn test_is_in_range_inclusive_bounds() {
        that(1).is_in_range(1, 10);
        that(10).is_in_range(1, 10);
        that(5).is_in_range(1, 10);
    }

    #[test]
    fn test_is_in_range_raises_outside() {
        for out in [0, 11] {
            let failure = capture(move || that(out).is_in_range(1, 10)).unwrap_err();
            let error = failure.as_assertion().unwrap();
            assert_eq!(
                error.message,
                format!(
                    "Expected value to be between 1 and 10 (inclusive), but was {}.",
                    out
                )
            );
            assert_eq!(error.expected.as_deref(), Some("[1, 10]"));
        }
    }

    #[test]
    fn test_is_in_range_absent_value() {
        let failure = capture(|| that_option::<i32>(None).is_in_range(1, 10)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.actual.as_deref(), Some("null"));
    }

    #[test]
    fn test_is_in_range_incomparable_value() {
        let failure = capture(|| that(f64::NAN).is_in_range(1.0, 10.0)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Value of type f64 does not implement comparison for f64."
        );
        assert_eq!(error.expected, None);
        assert_eq!(error.actual, None);
    }

    #[test]
    fn test_should_extension_trait() {
        5.should().is_in_range(1, 10);
        "admin".should().is_equal_to("admin");
    }
}
