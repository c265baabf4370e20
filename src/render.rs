//! Message and value rendering.
//!
//! Small pure helpers shared by every check: the context prefix applied to
//! failure messages, value rendering, and unqualified type names.

use std::fmt::Debug;

/// Prefix `message` with `"[<context>] "` when a non-empty context label is set.
pub(crate) fn prefixed(context: Option<&str>, message: &str) -> String {
    match context {
        Some(label) if !label.is_empty() => format!("[{}] {}", label, message),
        _ => message.to_string(),
    }
}

/// Render a value for a failure message.
///
/// Uses the `Debug` form, with symmetric outer double-quotes stripped so
/// strings read naturally inside the single-quoted message slots.
pub(crate) fn display_value<T: Debug + ?Sized>(value: &T) -> String {
    let rendered = format!("{:?}", value);
    if rendered.len() >= 2 && rendered.starts_with('"') && rendered.ends_with('"') {
        rendered[1..rendered.len() - 1].to_string()
    } else {
        rendered
    }
}

/// Render a possibly-absent value; absence renders as the literal `null`.
pub(crate) fn display_optional<T: Debug>(value: Option<&T>) -> String {
    match value {
        Some(value) => display_value(value),
        None => "null".to_string(),
    }
}

/// The unqualified name of `T`, with module paths stripped but generic
/// arguments kept: `alloc::string::String` becomes `String`,
/// `alloc::vec::Vec<i32>` becomes `Vec<i32>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    strip_paths(std::any::type_name::<T>())
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            out.push_str(token.rsplit("::").next().unwrap_or(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(token.rsplit("::").next().unwrap_or(&token));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_with_context() {
        assert_eq!(prefixed(Some("setup"), "it broke"), "[setup] it broke");
    }

    #[test]
    fn test_prefixed_without_context() {
        assert_eq!(prefixed(None, "it broke"), "it broke");
        assert_eq!(prefixed(Some(""), "it broke"), "it broke");
    }

    #[test]
    fn test_display_value_strips_string_quotes() {
        assert_eq!(display_value("Test"), "Test");
        assert_eq!(display_value(&String::from("Test")), "Test");
    }

    #[test]
    fn test_display_value_leaves_non_strings_alone() {
        assert_eq!(display_value(&5), "5");
        assert_eq!(display_value(&vec![1, 2, 3]), "[1, 2, 3]");
        assert_eq!(display_value(&'a'), "'a'");
    }

    #[test]
    fn test_display_optional_absent() {
        assert_eq!(display_optional::<i32>(None), "null");
        assert_eq!(display_optional(Some(&7)), "7");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<i32>(), "i32");
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<&str>(), "&str");
        assert_eq!(short_type_name::<Vec<i32>>(), "Vec<i32>");
        assert_eq!(short_type_name::<Option<String>>(), "Option<String>");
    }
}
