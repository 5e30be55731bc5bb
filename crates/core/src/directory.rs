//! Resolution of user-supplied resource references within a namespace.
//!
//! A reference is either a resource name or a legacy positional id. The
//! positional form is a compatibility shim for clients that address layers
//! by integer: it indexes the namespace's *current* ordering and changes
//! meaning whenever the catalog is reordered. Never treat it as stable.

use geoformat_api::{Catalog, LayersAndTables, ResolveError, qualified_name};
use std::sync::Arc;

/// Parses a legacy positional reference. Only plain ASCII digits count; a sign
/// makes the reference a name. Digit strings beyond `usize` parse to `Err`,
/// which still means "positional, and out of range".
fn parse_position(reference: &str) -> Option<Result<usize, ()>> {
    if reference.is_empty() || !reference.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(reference.parse::<usize>().map_err(|_| ()))
}

#[derive(Clone)]
pub struct ResourceDirectory {
    catalog: Arc<dyn Catalog>,
}

impl ResourceDirectory {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Resolves `reference` to `namespace:name`.
    ///
    /// Names are used verbatim without consulting the catalog. Positional ids
    /// are looked up; a position past the end is `ResourceNotFound`. Catalog
    /// failures surface as-is, without retry.
    pub async fn resolve(&self, namespace: &str, reference: &str) -> Result<String, ResolveError> {
        let Some(position) = parse_position(reference) else {
            return Ok(qualified_name(namespace, reference));
        };

        let not_found = || ResolveError::ResourceNotFound {
            namespace: namespace.to_string(),
            reference: reference.to_string(),
        };

        let index = position.map_err(|_| not_found())?;
        let record = self
            .catalog
            .entry_at(namespace, index)
            .await?
            .ok_or_else(not_found)?;

        tracing::debug!(
            "Resolved legacy id {} in {} to {}",
            index,
            namespace,
            record.name
        );
        Ok(qualified_name(namespace, &record.name))
    }

    /// Lists the namespace with the positional ids currently in effect.
    pub async fn list(&self, namespace: &str) -> Result<LayersAndTables, ResolveError> {
        let records = self.catalog.entries(namespace).await?;
        Ok(LayersAndTables::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("0"), Some(Ok(0)));
        assert_eq!(parse_position("007"), Some(Ok(7)));
        assert_eq!(parse_position("99999999999999999999999999"), Some(Err(())));
        assert_eq!(parse_position("-1"), None);
        assert_eq!(parse_position("+3"), None);
        assert_eq!(parse_position(""), None);
        assert_eq!(parse_position("3a"), None);
        assert_eq!(parse_position(" 3"), None);
    }
}
