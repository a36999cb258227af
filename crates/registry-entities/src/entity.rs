use alloy::primitives::Address;
use registry_ids::ZERO_ADDRESS;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A record kind persisted by an [`EntityStore`](crate::store::EntityStore).
///
/// Stores key records by `(NAME, id)`: registries and lists share the same id
/// shape, so the kind name keeps them apart.
pub trait Entity: Serialize + DeserializeOwned {
    /// Schema name of the entity kind.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

// ---------- ProjectRegistry ----------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRegistry {
    pub id: String,
    pub version: i32,
    pub owner: Address,
}

impl ProjectRegistry {
    /// Version of a registry whose initialization has not been observed.
    pub const UNKNOWN_VERSION: i32 = -1;

    pub fn with_defaults(id: String) -> Self {
        Self {
            id,
            version: Self::UNKNOWN_VERSION,
            owner: ZERO_ADDRESS,
        }
    }
}

impl Entity for ProjectRegistry {
    const NAME: &'static str = "ProjectRegistry";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------- Project ----------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub admin: Address,
    pub beneficiary: Address,
    pub content_hash: Address,
    /// Key of the owning [`ProjectRegistry`].
    pub project_registry: String,
}

impl Project {
    pub fn with_defaults(id: String, project_registry: String) -> Self {
        Self {
            id,
            admin: ZERO_ADDRESS,
            beneficiary: ZERO_ADDRESS,
            content_hash: ZERO_ADDRESS,
            project_registry,
        }
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------- ProjectList ----------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectList {
    pub id: String,
    pub owner: Address,
    pub name: String,
}

impl ProjectList {
    pub fn with_defaults(id: String) -> Self {
        Self {
            id,
            owner: ZERO_ADDRESS,
            name: String::new(),
        }
    }
}

impl Entity for ProjectList {
    const NAME: &'static str = "ProjectList";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------- ProjectProjectList ----------

/// Membership of a project in a list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProjectList {
    pub id: String,
    pub project: String,
    pub project_list: String,
}

impl ProjectProjectList {
    pub fn with_defaults(id: String, project: String, project_list: String) -> Self {
        Self {
            id,
            project,
            project_list,
        }
    }
}

impl Entity for ProjectProjectList {
    const NAME: &'static str = "ProjectProjectList";

    fn id(&self) -> &str {
        &self.id
    }
}
