//! # Slot Identity
//!
//! `SlotId` names one slot. Ids are unique within a pool, not globally;
//! the pool builder enforces the uniqueness.

use serde::{Deserialize, Serialize};

/// Identifier of a slot within its pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Wrap an explicit identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generated identifier `"{prefix}{n}"`.
    ///
    /// With an empty prefix this yields `"0"`, `"1"`, ...
    pub fn auto(prefix: &str, n: usize) -> Self {
        Self(format!("{prefix}{n}"))
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SlotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_without_prefix() {
        assert_eq!(SlotId::auto("", 0).as_str(), "0");
        assert_eq!(SlotId::auto("", 17).as_str(), "17");
    }

    #[test]
    fn test_auto_with_prefix() {
        assert_eq!(SlotId::auto("E20-", 3).to_string(), "E20-3");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SlotId::new("A1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"A1\"");
    }
}
