//! String checks.
//!
//! Available on any subject whose value can be viewed as `str`. The
//! [`like`](Subject::like) check tries glob first, then regex, then an exact
//! comparison, so path-shaped and free-form expectations both work without
//! the caller saying which kind they wrote.

use glob::Pattern;
use regex::Regex;

use crate::signal::{raise, raise_invalid};

use super::subject::Subject;

impl<T: AsRef<str>> Subject<T> {
    /// Check the string contains `needle`.
    pub fn contains_str(self, needle: &str) -> Self {
        let Some(value) = self.value() else {
            raise(
                self.fail(format!(
                    "Expected string to contain '{}', but was null.",
                    needle
                ))
                .expected(format!("Contains {}", needle))
                .actual("null"),
            );
        };
        let text = value.as_ref();
        if !text.contains(needle) {
            let found = text.to_string();
            raise(
                self.fail(format!(
                    "Expected string to contain '{}', but was '{}'.",
                    needle, found
                ))
                .expected(format!("Contains {}", needle))
                .actual(found),
            );
        }
        self
    }

    /// Check the string starts with `prefix`.
    pub fn starts_with(self, prefix: &str) -> Self {
        let Some(value) = self.value() else {
            raise(
                self.fail(format!(
                    "Expected string to start with '{}', but was null.",
                    prefix
                ))
                .expected(format!("Starts with {}", prefix))
                .actual("null"),
            );
        };
        let text = value.as_ref();
        if !text.starts_with(prefix) {
            let found = text.to_string();
            raise(
                self.fail(format!(
                    "Expected string to start with '{}', but was '{}'.",
                    prefix, found
                ))
                .expected(format!("Starts with {}", prefix))
                .actual(found),
            );
        }
        self
    }

    /// Check the string ends with `suffix`.
    pub fn ends_with(self, suffix: &str) -> Self {
        let Some(value) = self.value() else {
            raise(
                self.fail(format!(
                    "Expected string to end with '{}', but was null.",
                    suffix
                ))
                .expected(format!("Ends with {}", suffix))
                .actual("null"),
            );
        };
        let text = value.as_ref();
        if !text.ends_with(suffix) {
            let found = text.to_string();
            raise(
                self.fail(format!(
                    "Expected string to end with '{}', but was '{}'.",
                    suffix, found
                ))
                .expected(format!("Ends with {}", suffix))
                .actual(found),
            );
        }
        self
    }

    /// Check the string matches the regex `pattern`.
    ///
    /// # Panics
    ///
    /// Raises an [`InvalidArgumentError`](crate::signal::InvalidArgumentError)
    /// if `pattern` is not a valid regex - a malformed pattern is a bug in
    /// the calling test, not a failed expectation.
    pub fn matches(self, pattern: &str) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(error) => raise_invalid("pattern", format!("invalid regex: {}", error)),
        };
        let Some(value) = self.value() else {
            raise(
                self.fail(format!(
                    "Expected string to match pattern '{}', but was null.",
                    pattern
                ))
                .expected(format!("Matches {}", pattern))
                .actual("null"),
            );
        };
        let text = value.as_ref();
        if !regex.is_match(text) {
            let found = text.to_string();
            raise(
                self.fail(format!(
                    "Expected string to match pattern '{}', but was '{}'.",
                    pattern, found
                ))
                .expected(format!("Matches {}", pattern))
                .actual(found),
            );
        }
        self
    }

    /// Check the string matches `pattern` as a glob, a regex, or an exact
    /// value, tried in that order. Malformed glob or regex forms fall
    /// through to the next mode.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// that("src/config.json").like("**/*.json");
    /// that("npm install").like(r"^npm (install|i)$");
    /// ```
    pub fn like(self, pattern: &str) -> Self {
        let Some(value) = self.value() else {
            raise(
                self.fail(format!("Expected string like '{}', but was null.", pattern))
                    .expected(pattern)
                    .actual("null"),
            );
        };
        let text = value.as_ref();
        if !pattern_matches(pattern, text) {
            let found = text.to_string();
            raise(
                self.fail(format!(
                    "Expected string like '{}', but was '{}'.",
                    pattern, found
                ))
                .expected(pattern)
                .actual(found),
            );
        }
        self
    }
}

/// Glob first, regex second, exact comparison last.
fn pattern_matches(pattern: &str, text: &str) -> bool {
    if let Ok(glob) = Pattern::new(pattern) {
        if glob.matches(text) {
            return true;
        }
    }
    if let Ok(regex) = Regex::new(pattern) {
        if regex.is_match(text) {
            return true;
        }
    }
    text == pattern
}
