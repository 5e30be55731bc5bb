use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a namespace and a resource name in a qualified name.
pub const QUALIFIED_NAME_SEPARATOR: char = ':';

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Layer,
    Table,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Layer => f.write_str("layer"),
            ResourceKind::Table => f.write_str("table"),
        }
    }
}

/// A resource as the catalog knows it. The position inside its namespace is
/// not part of the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct ResourceRecord {
    pub name: String,
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ResourceRecord {
    pub fn layer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Layer,
            title: None,
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Table,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One entry of a directory listing, carrying its current legacy positional id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct LayerOrTable {
    pub id: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Directory listing of one namespace. Layers are numbered first, tables
/// continue the numbering, so ids are only meaningful for the current ordering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct LayersAndTables {
    pub layers: Vec<LayerOrTable>,
    pub tables: Vec<LayerOrTable>,
}

impl LayersAndTables {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ResourceRecord>) -> Self {
        let mut listing = LayersAndTables::default();
        for (id, record) in records.into_iter().enumerate() {
            let entry = LayerOrTable {
                id,
                name: record.name.clone(),
                title: record.title.clone(),
            };
            match record.kind {
                ResourceKind::Layer => listing.layers.push(entry),
                ResourceKind::Table => listing.tables.push(entry),
            }
        }
        listing
    }

    pub fn len(&self) -> usize {
        self.layers.len() + self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.tables.is_empty()
    }
}

impl fmt::Display for LayersAndTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |entries: &[LayerOrTable]| {
            entries
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "[{}];[{}]", names(&self.layers), names(&self.tables))
    }
}

/// Joins a namespace and a resource name into `namespace:name`.
pub fn qualified_name(namespace: &str, name: &str) -> String {
    let mut qualified = String::with_capacity(namespace.len() + name.len() + 1);
    qualified.push_str(namespace);
    qualified.push(QUALIFIED_NAME_SEPARATOR);
    qualified.push_str(name);
    qualified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_numbers_layers_then_tables() {
        // Catalog order is layers first, as the directory hands them out.
        let records = vec![
            ResourceRecord::layer("roads"),
            ResourceRecord::layer("rivers"),
            ResourceRecord::table("owners"),
        ];
        let listing = LayersAndTables::from_records(&records);
        assert_eq!(listing.layers.len(), 2);
        assert_eq!(listing.tables[0].id, 2);
        assert_eq!(listing.tables[0].name, "owners");
        assert_eq!(listing.to_string(), "[roads, rivers];[owners]");
        assert_eq!(listing.len(), 3);
        assert!(LayersAndTables::from_records(&Vec::<ResourceRecord>::new()).is_empty());
    }

    #[test]
    fn test_listing_omits_missing_titles() {
        let records = vec![ResourceRecord::layer("roads")];
        let json = serde_json::to_string(&LayersAndTables::from_records(&records)).unwrap();
        assert_eq!(json, r#"{"layers":[{"id":0,"name":"roads"}],"tables":[]}"#);
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("ws", "roads"), "ws:roads");
    }
}
