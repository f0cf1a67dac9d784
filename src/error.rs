use std::fmt::{Display, Formatter};

/// Returned by lookups when no value is stored at the requested key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NoSuchKey {
    key: String,
}

impl NoSuchKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The key that was looked up.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_key(self) -> String {
        self.key
    }
}

impl Display for NoSuchKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "No such key: \"{}\".", self.key)
    }
}

impl std::error::Error for NoSuchKey {}
