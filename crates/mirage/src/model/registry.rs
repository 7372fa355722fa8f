use crate::{
    access::Permissions,
    model::meta::{FieldKind, ModelMeta},
};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use thiserror::Error as ThisError;
use tracing::warn;

///
/// RegistryError
///
/// Lookup against an unregistered type is a programmer error; callers
/// fail fast and never retry.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("model type '{type_name}' is not registered")]
    NotRegistered { type_name: String },

    #[error("enum field '{field}' on '{type_name}' declares no allowed values")]
    EmptyEnum {
        type_name: &'static str,
        field: &'static str,
    },
}

///
/// REGISTRY
/// the process-wide metadata table
///

static REGISTRY: LazyLock<RwLock<BTreeMap<&'static str, ModelMeta>>> =
    LazyLock::new(|| RwLock::new(BTreeMap::new()));

fn registry_write() -> RwLockWriteGuard<'static, BTreeMap<&'static str, ModelMeta>> {
    REGISTRY
        .write()
        .expect("model registry RwLock poisoned while acquiring write lock")
}

fn registry_read() -> RwLockReadGuard<'static, BTreeMap<&'static str, ModelMeta>> {
    REGISTRY
        .read()
        .expect("model registry RwLock poisoned while acquiring read lock")
}

/// Store metadata for a model type. First writer wins: a second
/// registration under the same key is ignored, so init-time registration is
/// idempotent under concurrent startup.
pub fn register(meta: ModelMeta) -> Result<(), RegistryError> {
    for field in meta.fields {
        if let FieldKind::Enum { allowed } = field.kind
            && allowed.is_empty()
        {
            return Err(RegistryError::EmptyEnum {
                type_name: meta.type_name,
                field: field.name,
            });
        }
    }

    let mut registry = registry_write();
    if registry.contains_key(meta.type_name) {
        warn!(type_name = meta.type_name, "duplicate model registration ignored");
        return Ok(());
    }
    registry.insert(meta.type_name, meta);

    Ok(())
}

/// Fetch the stored metadata for a type key.
pub fn lookup(type_name: &str) -> Result<ModelMeta, RegistryError> {
    registry_read()
        .get(type_name)
        .cloned()
        .ok_or_else(|| RegistryError::NotRegistered {
            type_name: type_name.to_string(),
        })
}

/// Resolved table name for a type key.
pub fn table_name(type_name: &str) -> Result<String, RegistryError> {
    lookup(type_name).map(|meta| meta.table_name())
}

/// Edge flag, falling back to `false` for unregistered types.
#[must_use]
pub fn edge(type_name: &str) -> bool {
    registry_read().get(type_name).is_some_and(|meta| meta.edge)
}

/// Permission set, falling back to default-deny for unregistered types.
#[must_use]
pub fn permissions(type_name: &str) -> Permissions {
    registry_read()
        .get(type_name)
        .map(|meta| meta.permissions.clone())
        .unwrap_or_default()
}
