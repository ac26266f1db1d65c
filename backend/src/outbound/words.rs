//! Word service implementation.

use crate::domain::ports::WordService;
use crate::domain::Word;

/// Implementation of the [`WordService`] port that reverses words in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseWordService;

impl WordService for ReverseWordService {
    fn reverse_word(&self, word: &Word) -> Word {
        // Reverse by Unicode scalar value, not by byte.
        Word::new(word.name.chars().rev().collect::<String>())
    }
}
