//! Node and connection payload documents.
//!
//! Payloads are stored as JSON alongside the graph. Decoding is lossy on
//! purpose: a payload whose shape does not match simply decodes to its
//! default, which is permissive for guards and a no-op for effects. Explicit
//! `has`/`missing` checks, once present, fail closed.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::encounter::EncounterTags;

/// A world-flag value. Untagged so stored JSON scalars map directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// The hero's persistent world-flag map.
pub type WorldFlags = BTreeMap<String, FlagValue>;

/// A predicate over world flags.
///
/// `has` entries must all match exactly; `missing` entries must all be
/// absent. An empty guard allows everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagGuard {
    pub has: BTreeMap<String, FlagValue>,
    pub missing: Vec<String>,
}

impl FlagGuard {
    pub fn allows(&self, flags: &WorldFlags) -> bool {
        let has_ok = self
            .has
            .iter()
            .all(|(key, expected)| flags.get(key) == Some(expected));
        let missing_ok = self.missing.iter().all(|key| !flags.contains_key(key));
        has_ok && missing_ok
    }

    /// Keys that block this guard against the given flags, for locked-reason
    /// reporting.
    pub fn violations(&self, flags: &WorldFlags) -> Vec<GuardViolation> {
        let mut violations = Vec::new();
        for (key, expected) in &self.has {
            if flags.get(key) != Some(expected) {
                violations.push(GuardViolation::Missing { flag: key.clone() });
            }
        }
        for key in &self.missing {
            if flags.contains_key(key) {
                violations.push(GuardViolation::Forbidden { flag: key.clone() });
            }
        }
        violations
    }
}

/// One way a guard failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GuardViolation {
    /// A `has` entry is absent or holds a different value.
    Missing { flag: String },
    /// A `missing` entry is present.
    Forbidden { flag: String },
}

/// World-flag mutations carried by nodes and connections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldFlagEffects {
    pub set: BTreeMap<String, FlagValue>,
    pub clear: Vec<String>,
}

impl WorldFlagEffects {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.clear.is_empty()
    }

    /// Sets first, then clears, so a key in both ends up absent.
    pub fn apply(&self, flags: &mut WorldFlags) {
        for (key, value) in &self.set {
            flags.insert(key.clone(), value.clone());
        }
        for key in &self.clear {
            flags.remove(key);
        }
    }
}

/// Payload attached to a quest node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePayload {
    #[serde(deserialize_with = "lossy", skip_serializing_if = "Option::is_none")]
    pub encounter_tags: Option<EncounterTags>,
    #[serde(deserialize_with = "lossy")]
    pub world_flags: WorldFlagEffects,
    pub repeatable: bool,
}

/// Guard conditions attached to a connection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConditions {
    #[serde(deserialize_with = "lossy")]
    pub world_flags: FlagGuard,
}

/// Flag mutations attached to a connection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionEffects {
    #[serde(deserialize_with = "lossy")]
    pub world_flags: WorldFlagEffects,
}

/// Payload attached to a quest connection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPayload {
    #[serde(deserialize_with = "lossy")]
    pub conditions: ConnectionConditions,
    #[serde(deserialize_with = "lossy")]
    pub effects: ConnectionEffects,
}

impl ConnectionPayload {
    pub fn allows(&self, flags: &WorldFlags) -> bool {
        self.conditions.world_flags.allows(flags)
    }
}

/// Deserialize a value, falling back to `T::default()` when the stored shape
/// does not match. Used for every payload and sub-state field so corrupt
/// stored data degrades instead of failing hard.
pub(crate) fn lossy<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
