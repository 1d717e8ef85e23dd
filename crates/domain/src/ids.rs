//! Canonical identifiers
//!
//! Faction identifiers arrive from several places (route parameters, data
//! files, persisted history) and not all of them spell the same faction the
//! same way: some carry an edition prefix (`kt24-`), some use underscores or
//! mixed case. `FactionId` is the single canonical form; everything past the
//! boundary compares `FactionId`s with plain equality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Separators accepted between an edition prefix and the faction slug.
const PREFIX_SEPARATORS: [char; 2] = ['-', ':'];

/// A canonical faction identifier (lowercase, dash-separated, no edition prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FactionId(String);

impl FactionId {
    /// Canonicalize a raw faction identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` if nothing is left after
    /// canonicalization.
    ///
    /// # Examples
    /// ```
    /// use tacref_domain::FactionId;
    ///
    /// let a = FactionId::parse("KT24-Legionary").unwrap();
    /// let b = FactionId::parse("legionary").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let slug = slugify(raw);
        let canonical = strip_variant_prefix(&slug);
        if canonical.is_empty() {
            return Err(DomainError::invalid_id(format!(
                "faction id '{}' is empty after canonicalization",
                raw
            )));
        }
        Ok(Self(canonical.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FactionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FactionId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FactionId> for String {
    fn from(id: FactionId) -> String {
        id.0
    }
}

impl AsRef<str> for FactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase, turn `_` and whitespace into `-`, collapse runs of `-` and trim them.
fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let c = if c == '_' || c.is_whitespace() {
            '-'
        } else {
            c.to_ascii_lowercase()
        };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Strip one leading edition prefix: 2-3 letters, 2 digits, then a separator.
fn strip_variant_prefix(slug: &str) -> &str {
    let Some(sep) = slug.find(PREFIX_SEPARATORS) else {
        return slug;
    };
    let (prefix, rest) = (&slug[..sep], &slug[sep + 1..]);
    let letters = prefix
        .chars()
        .take_while(|c| c.is_ascii_lowercase())
        .count();
    let digits = &prefix[letters..];
    let is_edition = (2..=3).contains(&letters)
        && digits.len() == 2
        && digits.chars().all(|c| c.is_ascii_digit());

    let rest = rest.trim_start_matches(PREFIX_SEPARATORS);
    if is_edition && !rest.is_empty() {
        rest
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_id_is_unchanged() {
        let id = FactionId::parse("angels-of-death").unwrap();
        assert_eq!(id.as_str(), "angels-of-death");
    }

    #[test]
    fn test_prefixed_and_bare_spellings_are_equal() {
        let spellings = [
            "legionary",
            "kt24-legionary",
            "KT24-Legionary",
            "kt24_legionary",
            "kt24:legionary",
            "  Legionary ",
        ];
        for raw in spellings {
            assert_eq!(FactionId::parse(raw).unwrap().as_str(), "legionary", "{raw}");
        }
    }

    #[test]
    fn test_whitespace_and_underscores_become_dashes() {
        let id = FactionId::parse("Hunter  Clade__Skitarii").unwrap();
        assert_eq!(id.as_str(), "hunter-clade-skitarii");
    }

    #[test]
    fn test_non_edition_prefix_is_kept() {
        // Not letters followed by exactly two digits
        assert_eq!(FactionId::parse("k24-x").unwrap().as_str(), "k24-x");
        assert_eq!(FactionId::parse("kt2024-x").unwrap().as_str(), "kt2024-x");
        assert_eq!(FactionId::parse("void-dancer").unwrap().as_str(), "void-dancer");
    }

    #[test]
    fn test_prefix_alone_is_not_stripped() {
        assert_eq!(FactionId::parse("kt24").unwrap().as_str(), "kt24");
        assert_eq!(FactionId::parse("kt24-").unwrap().as_str(), "kt24");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        assert!(matches!(
            FactionId::parse("   "),
            Err(DomainError::InvalidId(_))
        ));
        assert!(FactionId::parse("__").is_err());
    }

    #[test]
    fn test_serde_canonicalizes_on_deserialize() {
        let id: FactionId = serde_json::from_str("\"KT24-Kommandos\"").unwrap();
        assert_eq!(id.as_str(), "kommandos");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"kommandos\"");
    }
}
