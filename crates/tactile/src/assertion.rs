//! Assertions for scenario validation.
//!
//! Assertions produce an [`AssertionResult`]; [`AssertionResult::check`]
//! turns a failure into [`InteractionError::AssertionFailed`] so scenarios can
//! propagate it with `?` instead of panicking.

use crate::result::{InteractionError, InteractionResult};
use std::fmt::Debug;

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Convert into a result, prefixing failures with `what`
    pub fn check(self, what: &str) -> InteractionResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(InteractionError::assertion(format!("{what}: {}", self.message)))
        }
    }
}

/// Assertion helpers for scenarios
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a string contains a substring
    #[must_use]
    pub fn contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert two floats are within `epsilon` of each other
    #[must_use]
    pub fn approx_eq(expected: f64, actual: f64, epsilon: f64) -> AssertionResult {
        if (expected - actual).abs() <= epsilon {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected} ± {epsilon}, got {actual}"))
        }
    }

    /// Assert `actual` rounded to `decimals` places equals `expected`
    #[must_use]
    pub fn rounds_to(expected: f64, actual: f64, decimals: i32) -> AssertionResult {
        let scale = 10f64.powi(decimals);
        let rounded = (actual * scale).round() / scale;
        if (rounded - expected).abs() < f64::EPSILON {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected {expected}, got {actual} (rounded to {rounded})"
            ))
        }
    }

    /// Assert collection length
    #[must_use]
    pub fn has_length<T>(collection: &[T], expected: usize) -> AssertionResult {
        if collection.len() == expected {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected length {expected}, got {}",
                collection.len()
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_equals() {
        assert!(Assertion::equals(&"ABC", &"ABC").passed);
        let result = Assertion::equals("ABC", "abc");
        assert!(!result.passed);
        assert_eq!(result.message, "expected \"ABC\", got \"abc\"");
    }

    #[test]
    fn test_contains() {
        assert!(Assertion::contains("Nothing happened. DragOut", "DragOut").passed);
        assert!(!Assertion::contains("Nothing happened.", "DragOut").passed);
    }

    #[test]
    fn test_approx_eq() {
        assert!(Assertion::approx_eq(100.0, 100.9, 1.0).passed);
        assert!(Assertion::approx_eq(100.0, 99.0, 1.0).passed);
        assert!(!Assertion::approx_eq(100.0, 101.5, 1.0).passed);
    }

    #[test]
    fn test_rounds_to() {
        assert!(Assertion::rounds_to(0.36, 0.360_000_01, 2).passed);
        assert!(Assertion::rounds_to(0.5, 0.5, 2).passed);
        assert!(Assertion::rounds_to(1.0, 1.0, 0).passed);
        assert!(!Assertion::rounds_to(0.36, 0.37, 2).passed);
    }

    #[test]
    fn test_has_length() {
        assert!(Assertion::has_length(&[1, 2, 3], 3).passed);
        assert!(!Assertion::has_length(&[1], 6).passed);
    }

    #[test]
    fn test_check_converts_failure() {
        assert!(Assertion::is_true(true, "unused").check("ok").is_ok());

        let err = Assertion::is_true(false, "no pointer inputs")
            .check("builder")
            .unwrap_err();
        assert!(matches!(err, InteractionError::AssertionFailed { .. }));
        assert_eq!(err.to_string(), "Assertion failed: builder: no pointer inputs");
    }
}
