use std::{borrow::Borrow, fmt};

/// Opaque, case-preserving postal address.
///
/// Addresses are compared by exact string match. No normalization happens
/// anywhere in the system, so `"Foo St. 1"` and `"foo st. 1"` are distinct
/// cache keys.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Upper bound imposed by the persistent cache schema.
    pub const MAX_LEN: usize = 256;

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Address {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Address {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<Address> for String {
    fn from(from: Address) -> Self {
        from.0
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}
