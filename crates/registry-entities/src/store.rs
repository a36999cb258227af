use std::{cell::RefCell, collections::HashMap, fmt::Debug};

use thiserror::Error;
use tracing::error;

use crate::entity::Entity;

/// Point-lookup access to persisted entities.
///
/// The accessors in this crate only ever call [`EntityStore::load`]; `save` is
/// how the embedding host commits a record once its handler has mutated it.
pub trait EntityStore {
    type Error: Debug;

    fn load<E: Entity>(&self, id: &str) -> Result<Option<E>, Self::Error>;

    fn save<E: Entity>(&self, entity: &E) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("Corrupt record {entity} '{id}': {source}")]
    Corrupt {
        entity: &'static str,
        id: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize {entity} '{id}': {source}")]
    Serialize {
        entity: &'static str,
        id: String,
        source: serde_json::Error,
    },
}

/// In-memory [`EntityStore`] holding each record as JSON bytes.
///
/// Not thread-safe; the indexing host drives one event at a time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<(&'static str, String), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Stores raw bytes under a record key, bypassing serialization.
    pub fn insert_raw(&self, entity: &'static str, id: impl Into<String>, bytes: Vec<u8>) {
        self.records.borrow_mut().insert((entity, id.into()), bytes);
    }
}

impl EntityStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load<E: Entity>(&self, id: &str) -> Result<Option<E>, Self::Error> {
        let records = self.records.borrow();
        let Some(bytes) = records.get(&(E::NAME, id.to_string())) else {
            return Ok(None);
        };

        let entity = serde_json::from_slice(bytes).map_err(|e| {
            error!("Failed to deserialize {} '{}': {}", E::NAME, id, e);
            MemoryStoreError::Corrupt {
                entity: E::NAME,
                id: id.to_string(),
                source: e,
            }
        })?;

        Ok(Some(entity))
    }

    fn save<E: Entity>(&self, entity: &E) -> Result<(), Self::Error> {
        let bytes = serde_json::to_vec(entity).map_err(|e| MemoryStoreError::Serialize {
            entity: E::NAME,
            id: entity.id().to_string(),
            source: e,
        })?;

        self.records
            .borrow_mut()
            .insert((E::NAME, entity.id().to_string()), bytes);
        Ok(())
    }
}
