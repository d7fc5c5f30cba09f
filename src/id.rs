//! Entity keys - the store's native identity for every document
//!
//! Callers pass identifiers as 24-character hex strings; the store keys
//! documents by `ObjectId`. Join rows carry the hex form as plain strings.
//!
//! Examples:
//! - `65a1f0c2e4b0a1b2c3d4e5f6` parses
//! - `65a1f0c2` (wrong length) and `zz...` (not hex) do not

use crate::{Error, Result};
use bson::oid::ObjectId;
use std::collections::HashSet;

/// Native key of a document in any collection.
pub type EntityKey = ObjectId;

/// Parse a caller-supplied identifier.
///
/// Fails with [`Error::InvalidId`] when the string is not a valid key.
pub fn parse(id: &str) -> Result<EntityKey> {
    ObjectId::parse_str(id).map_err(|e| Error::InvalidId(format!("{:?}: {}", id, e)))
}

/// Parse an identifier read from stored data, discarding it when malformed.
pub fn parse_lenient(id: &str) -> Option<EntityKey> {
    ObjectId::parse_str(id).ok()
}

/// Parse every caller-supplied identifier, collapsing duplicates.
///
/// The first malformed identifier aborts the whole batch.
pub fn parse_all<S: AsRef<str>>(ids: &[S]) -> Result<Vec<EntityKey>> {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(ids.len());
    for id in ids {
        let key = parse(id.as_ref())?;
        if seen.insert(key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Collapse duplicate string identifiers, keeping first-seen order.
pub fn dedup<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.as_ref())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    #[test]
    fn test_parse_valid() {
        let key = parse(VALID).unwrap();
        assert_eq!(key.to_hex(), VALID);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse("65a1f0c2"), Err(Error::InvalidId(_))));
        assert!(matches!(parse("zza1f0c2e4b0a1b2c3d4e5f6"), Err(Error::InvalidId(_))));
        assert!(matches!(parse(""), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_parse_lenient() {
        assert!(parse_lenient(VALID).is_some());
        assert!(parse_lenient("not-a-key").is_none());
    }

    #[test]
    fn test_parse_all_dedups_and_fails_fast() {
        let keys = parse_all(&[VALID, VALID]).unwrap();
        assert_eq!(keys.len(), 1);

        assert!(parse_all(&[VALID, "bad"]).is_err());
        assert!(parse_all::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_dedup_keeps_order() {
        let ids = dedup(&["b", "a", "b", "c", "a"]);
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
