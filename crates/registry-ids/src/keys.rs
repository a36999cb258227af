use std::{fmt::Display, str::FromStr};

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ADDRESS_HEX_LEN, ADDRESS_PREFIX, SEPARATOR, canonical_address, list_key, membership_key,
    project_key, registry_key,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("Missing '-' separator in key: {0}")]
    MissingSeparator(String),
    #[error("Invalid canonical address: {0}")]
    InvalidAddress(String),
    #[error("Invalid decimal project id: {0}")]
    InvalidProjectId(String),
}

/// Parses a canonical address fragment. Only the exact form produced by
/// [`canonical_address`] is accepted, so every key has one textual form.
fn parse_address(s: &str) -> Result<Address, KeyParseError> {
    let invalid = || KeyParseError::InvalidAddress(s.to_string());

    let hex = s.strip_prefix(ADDRESS_PREFIX).ok_or_else(invalid)?;
    if hex.len() != ADDRESS_HEX_LEN
        || !hex
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(invalid());
    }

    s.parse::<Address>().map_err(|_| invalid())
}

fn parse_project_id(s: &str) -> Result<U256, KeyParseError> {
    let invalid = || KeyParseError::InvalidProjectId(s.to_string());

    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if s.len() > 1 && s.starts_with('0') {
        return Err(invalid());
    }

    U256::from_str_radix(s, 10).map_err(|_| invalid())
}

// ---------- RegistryKey ----------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RegistryKey(pub Address);

impl Display for RegistryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&registry_key(self.0))
    }
}

impl FromStr for RegistryKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s).map(Self)
    }
}

// ---------- ProjectKey ----------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey {
    pub registry: Address,
    pub project_id: U256,
}

impl ProjectKey {
    pub fn new(registry: Address, project_id: U256) -> Self {
        Self {
            registry,
            project_id,
        }
    }

    pub fn registry_key(&self) -> RegistryKey {
        RegistryKey(self.registry)
    }
}

impl Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&project_key(self.registry, self.project_id))
    }
}

impl FromStr for ProjectKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Format: "0x...-42"
        let (registry, project_id) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| KeyParseError::MissingSeparator(s.to_string()))?;

        Ok(Self {
            registry: parse_address(registry)?,
            project_id: parse_project_id(project_id)?,
        })
    }
}

// ---------- ListKey ----------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListKey(pub Address);

impl Display for ListKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&list_key(self.0))
    }
}

impl FromStr for ListKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s).map(Self)
    }
}

// ---------- MembershipKey ----------

/// Key of the join row between a project and a list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MembershipKey {
    pub project: ProjectKey,
    pub list: Address,
}

impl MembershipKey {
    pub fn new(registry: Address, project_id: U256, list: Address) -> Self {
        Self {
            project: ProjectKey::new(registry, project_id),
            list,
        }
    }

    pub fn list_key(&self) -> ListKey {
        ListKey(self.list)
    }
}

impl Display for MembershipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&membership_key(
            self.project.registry,
            self.project.project_id,
            self.list,
        ))
    }
}

impl FromStr for MembershipKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Format: "0x...-42-0x..."; the project part contains a separator too.
        let (project, list) = s
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| KeyParseError::MissingSeparator(s.to_string()))?;

        Ok(Self {
            project: project.parse()?,
            list: parse_address(list)?,
        })
    }
}

macro_rules! string_serde {
    ($($key:ty),*) => {
        $(
            impl Serialize for $key {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(&self.to_string())
                }
            }

            impl<'de> Deserialize<'de> for $key {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

string_serde!(RegistryKey, ProjectKey, ListKey, MembershipKey);

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const REGISTRY: Address = address!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    const LIST: Address = address!("0x00000000000000000000000000000000000000aa");

    #[test]
    fn test_project_key_parse() {
        let key = ProjectKey::new(REGISTRY, U256::from(42));
        let parsed: ProjectKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
        assert_eq!(parsed.registry_key().to_string(), canonical_address(REGISTRY));
    }

    #[test]
    fn test_membership_key_parse() {
        let key = MembershipKey::new(REGISTRY, U256::from(7), LIST);
        let s = key.to_string();
        assert_eq!(
            s,
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed-7-0x00000000000000000000000000000000000000aa"
        );

        let parsed: MembershipKey = s.parse().unwrap();
        assert_eq!(parsed, key);
        assert_eq!(parsed.list_key(), ListKey(LIST));
    }

    #[test]
    fn test_key_serde() {
        let key = MembershipKey::new(REGISTRY, U256::ZERO, LIST);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key));

        let parsed: MembershipKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_rejects_non_canonical_address() {
        // Checksummed casing denotes the same bytes but is not the canonical form.
        let err = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
            .parse::<RegistryKey>()
            .unwrap_err();
        assert!(matches!(err, KeyParseError::InvalidAddress(_)));

        assert!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse::<ListKey>().is_err());
        assert!("0x5aaeb6".parse::<ListKey>().is_err());
    }

    #[test]
    fn test_rejects_bad_project_id() {
        let registry = canonical_address(REGISTRY);

        for id in ["", "007", "-1", "+1", "1e3", "0x10"] {
            let err = format!("{registry}-{id}").parse::<ProjectKey>().unwrap_err();
            assert!(
                matches!(
                    err,
                    KeyParseError::InvalidProjectId(_) | KeyParseError::InvalidAddress(_)
                ),
                "accepted project id {id:?}"
            );
        }

        let overflow = format!("{}0", U256::MAX);
        assert!(format!("{registry}-{overflow}").parse::<ProjectKey>().is_err());
    }

    #[test]
    fn test_missing_separator() {
        let err = canonical_address(REGISTRY).parse::<ProjectKey>().unwrap_err();
        assert_eq!(err, KeyParseError::MissingSeparator(canonical_address(REGISTRY)));
    }
}
