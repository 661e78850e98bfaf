//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing.
//!
//! Lexer outputs only carry byte offsets into the source, so every assertion receives the source
//! bytes the output was produced from.

use proptest::{
    prop_assert_eq,
    test_runner::{TestCaseError, TestCaseResult},
};

/// Represents an input generated for testing purposes.
pub trait Input<Output> {
    /// Verifies that the given output, produced from `source`, complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output, source: &[u8]) -> TestCaseResult;
}

impl<T, U> Input<&[T]> for &[U]
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &[T], source: &[u8]) -> TestCaseResult {
        prop_assert_eq!(self.len(), output.len());

        for (input, output) in self.iter().zip(output.iter()) {
            input.assert(output, source)?;
        }

        Ok(())
    }
}

/// Asserts that `lexeme` is exactly the `[start, end)` range of `source`.
///
/// # Errors
/// [`proptest::test_runner::TestCaseError`]: the range is out of bounds or the bytes differ.
pub fn assert_lexeme(source: &[u8], start: usize, end: usize, lexeme: &[u8]) -> TestCaseResult {
    let Some(actual) = source.get(start..end) else {
        return Err(TestCaseError::fail(format!(
            "range {start}..{end} is out of bounds for a source of {} bytes",
            source.len()
        )));
    };

    prop_assert_eq!(actual, lexeme);
    Ok(())
}
