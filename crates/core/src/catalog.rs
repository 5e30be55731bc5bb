//! In-memory implementation of [`Catalog`].
//!
//! Workspaces keep insertion order; inside a workspace layers come first,
//! then tables, which is the ordering positional ids are counted against.

use crate::error::Result;
use async_trait::async_trait;
use geoformat_api::error::CatalogResult;
use geoformat_api::{Catalog, CatalogError, ResourceKind, ResourceRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntries {
    #[serde(default)]
    pub layers: Vec<EntryDocument>,
    #[serde(default)]
    pub tables: Vec<EntryDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// On-disk shape: `{"workspaces": {"ws": {"layers": [..], "tables": [..]}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub workspaces: IndexMap<String, WorkspaceEntries>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    workspaces: IndexMap<String, Vec<ResourceRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the workspace's entries. Layers are moved ahead of tables;
    /// relative order inside each kind is kept.
    pub fn set_workspace(
        &mut self,
        namespace: impl Into<String>,
        records: impl IntoIterator<Item = ResourceRecord>,
    ) {
        let (mut layers, tables): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|r| r.kind == ResourceKind::Layer);
        layers.extend(tables);
        self.workspaces.insert(namespace.into(), layers);
    }

    pub fn with_workspace(
        mut self,
        namespace: impl Into<String>,
        records: impl IntoIterator<Item = ResourceRecord>,
    ) -> Self {
        self.set_workspace(namespace, records);
        self
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.workspaces.keys().map(String::as_str)
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        let mut catalog = Self::new();
        for (namespace, entries) in document.workspaces {
            let layers = entries.layers.into_iter().map(|e| ResourceRecord {
                name: e.name,
                kind: ResourceKind::Layer,
                title: e.title,
            });
            let tables = entries.tables.into_iter().map(|e| ResourceRecord {
                name: e.name,
                kind: ResourceKind::Table,
                title: e.title,
            });
            catalog.set_workspace(namespace, layers.chain(tables));
        }
        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded catalog with {} workspaces from {}",
            catalog.workspaces.len(),
            path.display()
        );
        Ok(catalog)
    }

    fn workspace(&self, namespace: &str) -> CatalogResult<&Vec<ResourceRecord>> {
        self.workspaces
            .get(namespace)
            .ok_or_else(|| CatalogError::NamespaceNotFound(namespace.to_string()))
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn entry_at(
        &self,
        namespace: &str,
        index: usize,
    ) -> CatalogResult<Option<ResourceRecord>> {
        Ok(self.workspace(namespace)?.get(index).cloned())
    }

    async fn entries(&self, namespace: &str) -> CatalogResult<Vec<ResourceRecord>> {
        Ok(self.workspace(namespace)?.clone())
    }
}
