//! Word value used by the demo word service.

/// A word to manipulate. Exists to demonstrate dependency passing through a
/// service port rather than to model anything real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The word itself.
    pub name: String,
}

impl Word {
    /// Construct a word from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
