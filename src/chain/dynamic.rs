//! Type-erased subjects for values crossing a loosely-typed boundary.
//!
//! [`Subject`](super::Subject) checks capability through trait bounds, so a
//! value that cannot be ordered or iterated is rejected at compile time.
//! Code holding a `Box<dyn Any>` (deserialized payloads, plugin values) has
//! no such bounds; `AnySubject` probes the capability at runtime instead and
//! reports a failed probe as an ordinary assertion failure.
//!
//! The wrapped type's name and a rendered form of the value are recorded at
//! construction, since neither can be recovered from `dyn Any` afterwards.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;

use crate::render::{display_value, prefixed, short_type_name};
use crate::signal::{raise, AssertionError};

/// Wrap a type-erased value to start an assertion chain.
///
/// # Example
///
/// ```rust,ignore
/// use attest::that_any;
///
/// that_any(5).is_of_type::<i32>().is_in_range(1, 10);
/// that_any(vec![1, 2, 3]).contains(2);
/// ```
pub fn that_any<V: Any + Debug>(value: V) -> AnySubject {
    AnySubject {
        rendered: display_value(&value),
        type_name: short_type_name::<V>(),
        value: Some(Box::new(value)),
        context: None,
    }
}

/// Wrap a possibly-absent type-erased value.
pub fn that_any_option<V: Any + Debug>(value: Option<V>) -> AnySubject {
    match value {
        Some(value) => that_any(value),
        None => AnySubject {
            rendered: "null".to_string(),
            type_name: short_type_name::<V>(),
            value: None,
            context: None,
        },
    }
}

/// A type-erased value under test.
///
/// Same chaining contract as [`Subject`](super::Subject): checks hand the
/// subject back on success and raise on the first violation.
pub struct AnySubject {
    value: Option<Box<dyn Any>>,
    type_name: String,
    rendered: String,
    context: Option<String>,
}

impl fmt::Debug for AnySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnySubject")
            .field("type_name", &self.type_name)
            .field("value", &self.rendered)
            .field("context", &self.context)
            .finish()
    }
}

impl AnySubject {
    /// Attach a context label; every later failure message in the chain is
    /// prefixed with `"[<label>] "`.
    pub fn with_context(self, label: impl Into<String>) -> Self {
        Self {
            context: Some(label.into()),
            ..self
        }
    }

    /// The wrapped value, or `None` when the subject is absent.
    pub fn value(&self) -> Option<&dyn Any> {
        self.value.as_deref()
    }

    /// Short name of the wrapped value's type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fail(&self, message: impl Into<String>) -> AssertionError {
        AssertionError::new(prefixed(self.context.as_deref(), &message.into()))
    }

    fn found_type_name(&self) -> String {
        match &self.value {
            Some(_) => self.type_name.clone(),
            None => "null".to_string(),
        }
    }

    /// Check the value is present.
    pub fn is_not_null(self) -> Self {
        if self.value.is_none() {
            raise(self.fail("Expected value to not be null.").actual("null"));
        }
        self
    }

    /// Check the value is absent.
    pub fn is_null(self) -> Self {
        if self.value.is_some() {
            let rendered = self.rendered.clone();
            raise(
                self.fail(format!("Expected value to be null, but was '{}'.", rendered))
                    .actual(rendered),
            );
        }
        self
    }

    /// Check the runtime type of the value is `U`.
    ///
    /// An absent subject never matches; its type renders as the literal
    /// string `null`.
    pub fn is_of_type<U: Any>(self) -> Self {
        let matched = matches!(&self.value, Some(boxed) if boxed.is::<U>());
        if !matched {
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
    pub fn is_not_of_type<U: Any>(self) -> Self {
        if matches!(&self.value, Some(boxed) if boxed.is::<U>()) {
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

    /// Check the value equals `expected`. A value of a different runtime
    /// type is unequal by definition.
    pub fn is_equal_to<V: Any + PartialEq + Debug>(self, expected: V) -> Self {
        let equal = matches!(
            &self.value,
            Some(boxed) if boxed.downcast_ref::<V>() == Some(&expected)
        );
        if !equal {
            let wanted = display_value(&expected);
            let found = self.rendered.clone();
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
    pub fn is_not_equal_to<V: Any + PartialEq + Debug>(self, unexpected: V) -> Self {
        let equal = matches!(
            &self.value,
            Some(boxed) if boxed.downcast_ref::<V>() == Some(&unexpected)
        );
        if equal {
            let rendered = display_value(&unexpected);
            raise(
                self.fail(format!(
                    "Expected value to not be '{}', but it was.",
                    rendered
                ))
                .expected(format!("Not {}", rendered))
                .actual(self.rendered.clone()),
            );
        }
        self
    }

    /// Check `min <= value <= max`, probing for `V` at runtime.
    ///
    /// A wrapped value that is not a `V` reports a comparison failure: there
    /// is no ordering between the value and the bounds.
    pub fn is_in_range<V: Any + PartialOrd + Debug>(self, min: V, max: V) -> Self {
        let low = display_value(&min);
        let high = display_value(&max);
        let Some(boxed) = &self.value else {
            raise(
                self.fail(format!(
                    "Expected value to be between {} and {} (inclusive), but was null.",
                    low, high
                ))
                .expected(format!("[{}, {}]", low, high))
                .actual("null"),
            );
        };
        let Some(value) = boxed.downcast_ref::<V>() else {
            raise(self.fail(format!(
                "Value of type {} does not implement comparison for {}.",
                self.type_name,
                short_type_name::<V>()
            )));
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
                raise(self.fail(format!(
                    "Value of type {} does not implement comparison for {}.",
                    self.type_name,
                    short_type_name::<V>()
                )));
            }
        }
        self
    }

    /// Check some element equals `item`, probing for `Vec<I>` at runtime.
    ///
    /// A subject that is not a `Vec<I>` (a wrapped integer, say) is not an
    /// enumerable of `I`.
    pub fn contains<I: Any + PartialEq + Debug>(self, item: I) -> Self {
        let Some(elements) = self.probe_elements::<I>() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        if !elements.iter().any(|element| element == &item) {
            let rendered = display_value(&item);
            raise(
                self.fail(format!("Expected collection to contain '{}'.", rendered))
                    .expected(format!("Contains {}", rendered))
                    .actual("Does not contain"),
            );
        }
        self
    }

    /// Check no element equals `item`.
    pub fn does_not_contain<I: Any + PartialEq + Debug>(self, item: I) -> Self {
        let Some(elements) = self.probe_elements::<I>() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        if elements.iter().any(|element| element == &item) {
            let rendered = display_value(&item);
            raise(
                self.fail(format!(
                    "Expected collection to not contain '{}'.",
                    rendered
                ))
                .expected(format!("Does not contain {}", rendered))
                .actual("Contains"),
            );
        }
        self
    }

    /// Check the collection has no elements.
    pub fn is_empty<I: Any>(self) -> Self {
        let Some(elements) = self.probe_elements::<I>() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        let count = elements.len();
        if count > 0 {
            raise(
                self.fail(format!(
                    "Expected collection to be empty, but it contained {} item(s).",
                    count
                ))
                .expected("Empty")
                .actual(format!("Count: {}", count)),
            );
        }
        self
    }

    /// Check the collection has at least one element.
    pub fn is_not_empty<I: Any>(self) -> Self {
        let Some(elements) = self.probe_elements::<I>() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        if elements.is_empty() {
            raise(
                self.fail("Expected collection to not be empty, but it was.")
                    .expected("Not empty")
                    .actual("Empty"),
            );
        }
        self
    }

    /// Check the collection has exactly `expected_count` elements.
    pub fn has_count<I: Any>(self, expected_count: usize) -> Self {
        let Some(elements) = self.probe_elements::<I>() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        let actual_count = elements.len();
        if actual_count != expected_count {
            raise(
                self.fail(format!(
                    "Expected collection to have {} item(s), but found {}.",
                    expected_count, actual_count
                ))
                .expected(expected_count.to_string())
                .actual(actual_count.to_string()),
            );
        }
        self
    }

    /// The capability probe: can the wrapped value be viewed as a slice of
    /// `I`? Recognizes `Vec<I>`, the one container a `dyn Any` downcast can
    /// name generically.
    fn probe_elements<I: Any>(&self) -> Option<&[I]> {
        let boxed = self.value.as_ref()?;
        boxed.downcast_ref::<Vec<I>>().map(Vec::as_slice)
    }
}
