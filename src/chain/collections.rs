//! Collection checks over iterable subjects.
//!
//! Available when the wrapped value can be iterated by reference, so a
//! passing check can hand the subject back for further chaining. Each call
//! traverses the collection once; counts are never cached, which is fine for
//! short-lived chains.

use std::fmt::Debug;

use crate::render::{display_value, short_type_name};
use crate::signal::raise;

use super::subject::Subject;

impl<T> Subject<T> {
    /// Check some element equals `item`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// that(vec![1, 2, 3]).contains(2);
    /// ```
    pub fn contains<I>(self, item: I) -> Self
    where
        for<'a> &'a T: IntoIterator<Item = &'a I>,
        I: PartialEq + Debug,
    {
        let Some(value) = self.value() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        if !value.into_iter().any(|element| element == &item) {
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
    pub fn does_not_contain<I>(self, item: I) -> Self
    where
        for<'a> &'a T: IntoIterator<Item = &'a I>,
        I: PartialEq + Debug,
    {
        let Some(value) = self.value() else {
            raise(self.fail(format!(
                "Value is not an enumerable (of {}).",
                short_type_name::<I>()
            )));
        };
        if value.into_iter().any(|element| element == &item) {
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
    pub fn is_empty(self) -> Self
    where
        for<'a> &'a T: IntoIterator,
    {
        let Some(value) = self.value() else {
            raise(self.fail("Value is not an enumerable."));
        };
        let count = value.into_iter().count();
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
    pub fn is_not_empty(self) -> Self
    where
        for<'a> &'a T: IntoIterator,
    {
        let Some(value) = self.value() else {
            raise(self.fail("Value is not an enumerable."));
        };
        if value.into_iter().count() == 0 {
            raise(
                self.fail("Expected collection to not be empty, but it was.")
                    .expected("Not empty")
                    .actual("Empty"),
            );
        }
        self
    }

    /// Check the collection has exactly `expected_count` elements.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// that(vec![1, 2, 3]).has_count(3);
    /// ```
    pub fn has_count(self, expected_count: usize) -> Self
    where
        for<'a> &'a T: IntoIterator,
    {
        let Some(value) = self.value() else {
            raise(self.fail("Value is not an enumerable."));
        };
        let actual_count = value.into_iter().count();
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
}

#[cfg(test)]
mod tests {
    use crate::chain::{that, that_option};
    use crate::signal::capture;
    use std::collections::HashSet;

    #[test]
    fn test_contains_passes() {
        that(vec![1, 2, 3]).contains(2);
        that(["a", "b"]).contains("a");
    }

    #[test]
    fn test_contains_raises_when_missing() {
        let failure = capture(|| that(vec![1, 2, 3]).contains(9)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected collection to contain '9'.");
        assert_eq!(error.expected.as_deref(), Some("Contains 9"));
        assert_eq!(error.actual.as_deref(), Some("Does not contain"));
    }

    #[test]
    fn test_contains_on_absent_subject() {
        let failure = capture(|| that_option::<Vec<i32>>(None).contains(1)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Value is not an enumerable (of i32).");
        assert_eq!(error.expected, None);
        assert_eq!(error.actual, None);
    }

    #[test]
    fn test_does_not_contain() {
        that(vec![1, 2, 3]).does_not_contain(9);

        let failure = capture(|| that(vec![1, 2, 3]).does_not_contain(2)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(error.message, "Expected collection to not contain '2'.");
        assert_eq!(error.expected.as_deref(), Some("Does not contain 2"));
        assert_eq!(error.actual.as_deref(), Some("Contains"));
    }

    #[test]
    fn test_is_empty() {
        that(Vec::<i32>::new()).is_empty();

        let failure = capture(|| that(vec![1, 2]).is_empty()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Expected collection to be empty, but it contained 2 item(s)."
        );
        assert_eq!(error.expected.as_deref(), Some("Empty"));
        assert_eq!(error.actual.as_deref(), Some("Count: 2"));
    }

    #[test]
    fn test_is_not_empty() {
        that(vec![1]).is_not_empty();

        let failure = capture(|| that(Vec::<i32>::new()).is_not_empty()).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Expected collection to not be empty, but it was."
        );
        assert_eq!(error.actual.as_deref(), Some("Empty"));
    }

    #[test]
    fn test_has_count() {
        that(vec![1, 2, 3]).has_count(3);

        let failure = capture(|| that(vec![1, 2, 3]).has_count(5)).unwrap_err();
        let error = failure.as_assertion().unwrap();
        assert_eq!(
            error.message,
            "Expected collection to have 5 item(s), but found 3."
        );
        assert_eq!(error.expected.as_deref(), Some("5"));
        assert_eq!(error.actual.as_deref(), Some("3"));
    }

    #[test]
    fn test_works_over_sets() {
        let set: HashSet<i32> = [1, 2, 3].into_iter().collect();
        that(set).contains(2).has_count(3).is_not_empty();
    }

    #[test]
    fn test_chaining_preserves_collection() {
        let subject = that(vec![1, 2, 3]).contains(1).has_count(3);
        assert_eq!(subject.into_value(), Some(vec![1, 2, 3]));
    }
}
