use std::fmt::Display;

use uuid::Uuid;

/// An opaque row identifier.
///
/// [`Id::new`] hands out a fresh random UUID, [`Id::from`] wraps a value
/// that already exists (for instance one read back from a file).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Id(String);

/// An Icelandic national identification number.
///
/// The store does not validate the number, it only carries it around as a
/// typed string. The default is the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Kennitala(String);

impl Id {
    pub fn new() -> Id {
        Id(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Id {
    fn default() -> Self {
        Id::new()
    }
}

impl Kennitala {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Kennitala {
    fn from(value: String) -> Self {
        Kennitala(value)
    }
}

impl From<&str> for Kennitala {
    fn from(value: &str) -> Self {
        Kennitala(value.to_string())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Kennitala {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
