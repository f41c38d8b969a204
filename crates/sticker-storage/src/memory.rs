use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use sticker_core::registry::{Result, UNASSIGNED_BOOK};
use sticker_core::{Code, IssuedCode, Registry, RegistryError};

/// In-memory stand-in for a registry server: named namespaces holding
/// named collections.
///
/// Collections must be created before they can be opened, the same way the
/// durable backend refuses to open a missing database or table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    namespaces: Arc<DashMap<String, DashMap<String, InMemoryRegistry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `namespace.collection` if needed and returns a handle to it.
    pub fn create_collection(&self, namespace: &str, collection: &str) -> InMemoryRegistry {
        self.namespaces
            .entry(namespace.to_owned())
            .or_default()
            .entry(collection.to_owned())
            .or_default()
            .clone()
    }

    /// Opens an existing collection.
    pub fn open(&self, namespace: &str, collection: &str) -> Result<InMemoryRegistry> {
        let Some(collections) = self.namespaces.get(namespace) else {
            return Err(RegistryError::Unavailable(format!(
                "namespace '{namespace}' does not exist"
            )));
        };

        collections
            .get(collection)
            .map(|registry| registry.clone())
            .ok_or_else(|| {
                RegistryError::Unavailable(format!(
                    "collection '{namespace}.{collection}' does not exist"
                ))
            })
    }
}

/// In-memory implementation of the Registry trait using DashMap.
///
/// Clones share the same records. Reservation goes through the DashMap
/// entry API, which holds the shard lock across the check and the insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    records: Arc<DashMap<Code, i64>>,
}

impl InMemoryRegistry {
    /// Creates a standalone registry not attached to any store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that already holds `codes`.
    pub fn with_codes(codes: impl IntoIterator<Item = Code>) -> Self {
        let registry = Self::new();
        for code in codes {
            registry.records.insert(code, UNASSIGNED_BOOK);
        }
        registry
    }

    pub fn get(&self, code: &Code) -> Option<IssuedCode> {
        self.records.get(code).map(|entry| IssuedCode {
            code: entry.key().clone(),
            book_id: *entry.value(),
        })
    }

    /// Snapshot of every record, ordered by code.
    pub fn records(&self) -> Vec<IssuedCode> {
        let mut records: Vec<IssuedCode> = self
            .records
            .iter()
            .map(|entry| IssuedCode {
                code: entry.key().clone(),
                book_id: *entry.value(),
            })
            .collect();
        records.sort_by(|a, b| a.code.cmp(&b.code));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn exists(&self, code: &Code) -> Result<bool> {
        Ok(self.records.contains_key(code))
    }

    async fn reserve(&self, code: &Code) -> Result<bool> {
        match self.records.entry(code.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(UNASSIGNED_BOOK);
                Ok(true)
            }
        }
    }
}
