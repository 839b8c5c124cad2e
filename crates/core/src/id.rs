//! Unique identifiers for journal entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a coffee bean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeanId(Ulid);

impl BeanId {
    /// Generate a new BeanId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for BeanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BeanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for BeanId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a brew method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(Ulid);

impl MethodId {
    /// Generate a new MethodId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MethodId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for MethodId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of a mined pattern. Fresh for every analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId(Ulid);

impl PatternId {
    /// Generate a new PatternId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PatternId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bean_id_roundtrips_through_string() {
        let id = BeanId::new();
        let parsed: BeanId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_method_id_rejects_garbage() {
        assert!("not-a-ulid".parse::<MethodId>().is_err());
    }

    #[test]
    fn test_pattern_ids_are_fresh() {
        assert_ne!(PatternId::new(), PatternId::new());
    }
}
