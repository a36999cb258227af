use alloy::primitives::{Address, U256};
use registry_ids::{list_key, membership_key, project_key, registry_key};
use thiserror::Error;
use tracing::{debug, error, trace};

use crate::{
    entity::{Entity, Project, ProjectList, ProjectProjectList, ProjectRegistry},
    resolver::RegistryResolver,
    store::EntityStore,
};

#[derive(Debug, Error)]
pub enum AccessError<S, R> {
    #[error("Store error: {0:?}")]
    Store(S),
    #[error("Failed to resolve project registry: {0:?}")]
    Resolve(R),
}

/// Returns the stored entity for `id`, or `create(id)` if there is none.
///
/// The created entity is not saved.
fn load_or_else<S, E, F>(store: &S, id: String, create: F) -> Result<E, S::Error>
where
    S: EntityStore,
    E: Entity,
    F: FnOnce(String) -> E,
{
    if let Some(entity) = store.load::<E>(&id)? {
        return Ok(entity);
    }

    trace!("Creating {} '{}' with defaults", E::NAME, id);
    Ok(create(id))
}

pub fn load_or_create_project_registry<S: EntityStore>(
    store: &S,
    registry: Address,
) -> Result<ProjectRegistry, S::Error> {
    load_or_else(store, registry_key(registry), ProjectRegistry::with_defaults)
}

pub fn load_or_create_project<S: EntityStore>(
    store: &S,
    registry: Address,
    project_id: U256,
) -> Result<Project, S::Error> {
    load_or_else(store, project_key(registry, project_id), |id| {
        Project::with_defaults(id, registry_key(registry))
    })
}

pub fn load_or_create_project_list<S: EntityStore>(
    store: &S,
    list: Address,
) -> Result<ProjectList, S::Error> {
    load_or_else(store, list_key(list), ProjectList::with_defaults)
}

/// Loads or creates the membership row for `project_id` in `list`.
///
/// The project key depends on the registry that owns the list, which is read
/// from the list's on-chain state on every call. If that read fails no record
/// is produced.
pub fn load_or_create_project_project_list<S, R>(
    store: &S,
    resolver: &R,
    list: Address,
    project_id: U256,
) -> Result<ProjectProjectList, AccessError<S::Error, R::Error>>
where
    S: EntityStore,
    R: RegistryResolver,
{
    let registry = resolver.project_registry(list).map_err(|e| {
        error!("Failed to resolve registry for list {}: {:?}", list, e);
        AccessError::Resolve(e)
    })?;
    debug!("List {} belongs to registry {}", list, registry);

    load_or_else(
        store,
        membership_key(registry, project_id, list),
        |id| ProjectProjectList::with_defaults(id, project_key(registry, project_id), list_key(list)),
    )
    .map_err(AccessError::Store)
}
