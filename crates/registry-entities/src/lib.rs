//! Registry Entities
//!
//! Load-or-create accessors for the project registry entities. Each accessor
//! derives the entity's key with [`registry_ids`], returns the stored record if
//! there is one, and otherwise builds a record with default values. Created
//! records are never saved here; the indexing host commits them after its
//! handler has filled them in.

pub mod accessor;
pub mod entity;
pub mod resolver;
pub mod store;

pub use accessor::{
    AccessError, load_or_create_project, load_or_create_project_list,
    load_or_create_project_project_list, load_or_create_project_registry,
};
pub use entity::{Entity, Project, ProjectList, ProjectProjectList, ProjectRegistry};
pub use registry_ids;
pub use resolver::{ContractRegistryResolver, LedgerError, LedgerReader, RegistryResolver};
pub use store::{EntityStore, MemoryStore, MemoryStoreError};
