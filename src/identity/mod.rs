/// Identity Resolution System
///
/// Translates player names to UUIDs and back, caching every mapping that was
/// learned from a live session, the remote identity service, or offline
/// derivation.

pub mod map;
pub mod offline;
pub mod resolver;

pub use map::IdentityMap;
pub use offline::offline_uuid;
pub use resolver::IdentityResolver;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Sentinel returned for reverse lookups when no authority exists
pub const UNKNOWN_NAME: &str = "unknown";

/// Case-insensitive player name
///
/// Equality and hashing use the lowercase form; the original spelling is
/// kept for display and offline derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlayerName {
    value: String,
    key: String,
}

impl PlayerName {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let key = value.to_lowercase();
        Self { value, key }
    }

    /// Name as originally spelled
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Normalized (lowercase) lookup key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for PlayerName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PlayerName {}

impl Hash for PlayerName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for PlayerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.value
    }
}

/// Outcome of a UUID -> name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    /// Name known from the cache, a session, or the remote service
    Found(String),
    /// Online mode lookup failed or the service had no record
    NotFound,
    /// Offline mode: nothing can reverse a derived UUID
    Unknown,
}

impl NameLookup {
    /// Render the lookup the way callers display it
    ///
    /// `Unknown` becomes `"unknown"` and `NotFound` the empty string.
    pub fn as_str(&self) -> &str {
        match self {
            NameLookup::Found(name) => name,
            NameLookup::NotFound => "",
            NameLookup::Unknown => UNKNOWN_NAME,
        }
    }

    pub fn found(&self) -> Option<&str> {
        match self {
            NameLookup::Found(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, NameLookup::Found(_))
    }
}

impl fmt::Display for NameLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single name <-> UUID pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMapping {
    pub name: String,
    pub id: Uuid,
}

/// Point-in-time copy of every cached mapping, handed to a mapping store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSnapshot {
    pub taken_at: DateTime<Utc>,
    pub mappings: Vec<IdentityMapping>,
}

impl MappingSnapshot {
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get_id(&self, name: &str) -> Option<Uuid> {
        let key = name.to_lowercase();
        self.mappings
            .iter()
            .find(|m| m.name.to_lowercase() == key)
            .map(|m| m.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_player_name_case_insensitive() {
        let a = PlayerName::new("Notch");
        let b = PlayerName::new("nOTCH");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Notch");
        assert_eq!(b.key(), "notch");

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_name_lookup_rendering() {
        assert_eq!(NameLookup::Found("Steve".into()).as_str(), "Steve");
        assert_eq!(NameLookup::Unknown.to_string(), "unknown");
        assert_eq!(NameLookup::NotFound.as_str(), "");
        assert_eq!(NameLookup::Unknown.found(), None);
    }

    #[test]
    fn test_player_name_serializes_as_string() {
        let json = serde_json::to_string(&PlayerName::new("Alex")).unwrap();
        assert_eq!(json, "\"Alex\"");
        let back: PlayerName = serde_json::from_str("\"ALEX\"").unwrap();
        assert_eq!(back, PlayerName::new("alex"));
    }
}
