//! Port abstraction for word manipulation utilities.

use crate::domain::Word;

/// Utilities related to word manipulation.
///
/// Reversal has no failure mode, so the operation returns the new word
/// directly rather than a result.
#[cfg_attr(test, mockall::automock)]
pub trait WordService: Send + Sync {
    /// Return the given word with its name reversed.
    fn reverse_word(&self, word: &Word) -> Word;
}
