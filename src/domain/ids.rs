//! Domain identifier types
//!
//! Newtype wrappers that keep record identifiers and matching keys from being
//! mixed up with ordinary strings.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a record within its source dataset
///
/// For HMLR proprietors this is `{title_number}#{slot}`, for ROE entities the
/// incorporation number.
///
/// # Examples
///
/// ```
/// use proprietor_recon::domain::ids::SourceId;
/// use std::str::FromStr;
///
/// let id = SourceId::from_str("OE000123").unwrap();
/// assert_eq!(id.as_str(), "OE000123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new SourceId, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Source ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Identifier of one proprietor slot on a land title
    pub fn for_slot(title_number: &str, slot: usize) -> Result<Self, String> {
        Self::new(format!("{title_number}#{slot}"))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical matching key derived from an organization name
///
/// Only [`NameNormalizer`](crate::core::normalize::NameNormalizer) can build
/// one, so every key in circulation is the output of normalization and never a
/// hand-edited string. Ordering is ordinal byte order of the underlying UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub(crate) fn from_normalized(key: String) -> Self {
        Self(key)
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when normalization left nothing to match on
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for CanonicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_valid() {
        let id = SourceId::new("NGL123456").unwrap();
        assert_eq!(id.as_str(), "NGL123456");
        assert_eq!(id.to_string(), "NGL123456");
    }

    #[test]
    fn test_source_id_empty() {
        assert!(SourceId::new("").is_err());
        assert!(SourceId::new("   ").is_err());
    }

    #[test]
    fn test_source_id_for_slot() {
        let id = SourceId::for_slot("NGL123456", 2).unwrap();
        assert_eq!(id.as_str(), "NGL123456#2");
    }

    #[test]
    fn test_canonical_key_ordering_is_ordinal() {
        let upper = CanonicalKey::from_normalized("Z".to_string());
        let lower = CanonicalKey::from_normalized("a".to_string());
        assert!(upper < lower);
    }

    #[test]
    fn test_canonical_key_serializes_as_string() {
        let key = CanonicalKey::from_normalized("acmetrading".to_string());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"acmetrading\"");
        assert_eq!(key, "acmetrading");
    }
}
