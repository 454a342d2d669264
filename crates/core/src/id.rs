//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a registered product.
///
/// Assigned by the server on creation and never changed afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Only the canonical rendering (lowercase, hyphenated) names a stored
/// product; any other string, including other UUID spellings, is not found.
impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|_| DomainError::not_found())?;
        let id = Self(uuid);
        if id.to_string() != s {
            return Err(DomainError::not_found());
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_roundtrip_through_display() {
        let a = ProductId::new();
        let b = ProductId::new();
        assert_ne!(a, b);

        let parsed: ProductId = a.to_string().parse().unwrap();
        assert_eq!(parsed, a);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = "not-a-uuid".parse::<ProductId>().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn non_canonical_spellings_are_not_found() {
        let canonical = "0190a0b2-abcd-7def-8000-00000000000f";
        assert!(canonical.parse::<ProductId>().is_ok());
        let spellings = [
            canonical.to_uppercase(),
            canonical.replace('-', ""),
            format!("{{{canonical}}}"),
            format!("urn:uuid:{canonical}"),
        ];
        for s in spellings {
            let err = s.parse::<ProductId>().unwrap_err();
            assert!(err.is_not_found(), "{s} should not parse");
        }
    }
}
