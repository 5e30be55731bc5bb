//! Registry of output format encoders.
//!
//! Assembled once during startup through [`EncoderRegistryBuilder`], then
//! shared read-only (usually as `Arc<EncoderRegistry>`). Nothing mutates a
//! built registry, so concurrent negotiation needs no locking.

use geoformat_api::{ConfigError, Diagnostic, Diagnostics};
use geoformat_plugin::{EncoderDescriptor, PublishMode, derive_identifier, is_valid_identifier};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// A descriptor together with the identifier it is published under.
#[derive(Debug, Clone)]
pub struct RegisteredEncoder {
    descriptor: Arc<EncoderDescriptor>,
    identifier: String,
}

impl RegisteredEncoder {
    pub fn descriptor(&self) -> &Arc<EncoderDescriptor> {
        &self.descriptor
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Names this encoder contributes to a capabilities document, sorted.
    pub fn capabilities_element_names(&self) -> Vec<String> {
        match self.descriptor.publish_mode() {
            PublishMode::Primary => vec![self.identifier.clone()],
            PublishMode::AllAliases => {
                let names = self.descriptor.publishable_aliases();
                if names.is_empty() {
                    vec![self.identifier.clone()]
                } else {
                    names
                }
            }
        }
    }
}

pub struct EncoderRegistry {
    encoders: Vec<RegisteredEncoder>,
    by_alias: HashMap<String, usize>,
}

impl EncoderRegistry {
    pub fn builder(diagnostics: Arc<dyn Diagnostics>) -> EncoderRegistryBuilder {
        EncoderRegistryBuilder {
            descriptors: Vec::new(),
            by_alias: HashMap::new(),
            diagnostics,
        }
    }

    /// Encoders in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEncoder> {
        self.encoders.iter()
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// The encoder declaring `alias`, if any.
    pub fn get(&self, alias: &str) -> Option<&RegisteredEncoder> {
        self.by_alias.get(alias).map(|&idx| &self.encoders[idx])
    }

    /// Every alias of every encoder that is a valid element name, deduplicated
    /// and sorted, so generated documents do not depend on registration order.
    pub fn list_publishable_identifiers(&self) -> Vec<String> {
        self.encoders
            .iter()
            .flat_map(|e| e.descriptor.aliases())
            .filter(|alias| is_valid_identifier(alias))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Union of each encoder's capabilities element names, deduplicated and sorted.
    pub fn capabilities_element_names(&self) -> Vec<String> {
        self.encoders
            .iter()
            .flat_map(RegisteredEncoder::capabilities_element_names)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl std::fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.encoders.iter().map(|e| e.identifier()))
            .finish()
    }
}

pub struct EncoderRegistryBuilder {
    descriptors: Vec<Arc<EncoderDescriptor>>,
    by_alias: HashMap<String, usize>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl EncoderRegistryBuilder {
    /// Appends a descriptor. Fails without registering anything if one of its
    /// aliases is already taken.
    pub fn register(&mut self, descriptor: EncoderDescriptor) -> Result<(), ConfigError> {
        if let Some((alias, &owner)) = descriptor
            .aliases()
            .iter()
            .find_map(|alias| self.by_alias.get(alias).map(|owner| (alias, owner)))
        {
            return Err(ConfigError::DuplicateAlias {
                alias: alias.clone(),
                first: self.descriptors[owner].display_name(),
                second: descriptor.display_name(),
            });
        }

        let idx = self.descriptors.len();
        for alias in descriptor.aliases() {
            self.by_alias.insert(alias.clone(), idx);
        }
        self.descriptors.push(Arc::new(descriptor));
        Ok(())
    }

    pub fn with(mut self, descriptor: EncoderDescriptor) -> Result<Self, ConfigError> {
        self.register(descriptor)?;
        Ok(self)
    }

    /// Derives every identifier. Any descriptor without a publishable
    /// identifier aborts the build. Two encoders sharing an identifier is
    /// reported but not fatal.
    pub fn build(self) -> Result<EncoderRegistry, ConfigError> {
        let mut encoders: Vec<RegisteredEncoder> = Vec::with_capacity(self.descriptors.len());
        let mut published: HashMap<String, usize> = HashMap::new();

        for (idx, descriptor) in self.descriptors.into_iter().enumerate() {
            let identifier = derive_identifier(&descriptor, self.diagnostics.as_ref())?;

            for alias in descriptor.aliases() {
                if !is_valid_identifier(alias) {
                    self.diagnostics.report(Diagnostic::AliasNotPublishable {
                        alias: alias.clone(),
                    });
                }
            }

            if let Some(&other) = published.get(&identifier) {
                let first = &encoders[other];
                self.diagnostics.report(Diagnostic::IdentifierCollision {
                    identifier: identifier.clone(),
                    first: first.descriptor.display_name(),
                    second: descriptor.display_name(),
                });
            } else {
                published.insert(identifier.clone(), idx);
            }

            encoders.push(RegisteredEncoder {
                descriptor,
                identifier,
            });
        }

        tracing::info!("Encoder registry built with {} encoders", encoders.len());

        Ok(EncoderRegistry {
            encoders,
            by_alias: self.by_alias,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use geoformat_api::NoopDiagnostics;

    fn builder() -> EncoderRegistryBuilder {
        EncoderRegistry::builder(Arc::new(NoopDiagnostics))
    }

    fn descriptor(aliases: &[&str]) -> EncoderDescriptor {
        EncoderDescriptor::builder(aliases.iter().copied())
            .type_name("tests::Encoder")
            .build()
            .unwrap()
    }

    #[test]
    fn test_duplicate_alias_rejected_at_registration() {
        let mut builder = builder();
        builder.register(descriptor(&["GML2", "gml2"])).unwrap();

        let err = builder.register(descriptor(&["csv", "GML2"])).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAlias { ref alias, .. } if alias == "GML2"));

        // The rejected descriptor left nothing behind.
        let registry = builder.build().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("csv").is_none());
    }

    #[test]
    fn test_lookup_by_alias() {
        let registry = builder()
            .with(descriptor(&["GML2"]))
            .unwrap()
            .with(descriptor(&["json", "application/json"]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(registry.get("application/json").unwrap().identifier(), "json");
        assert!(registry.get("JSON").is_none());
    }

    #[test]
    fn test_listing_sorted_deduplicated_and_filtered() {
        let registry = builder()
            .with(descriptor(&["json", "application/json", "geojson"]))
            .unwrap()
            .with(descriptor(&["text/xml; subtype=gml/3.1.1", "GML3", "gml3"]))
            .unwrap()
            .with(descriptor(&["csv", "CSV"]))
            .unwrap()
            .build()
            .unwrap();

        let listed = registry.list_publishable_identifiers();
        assert_eq!(listed, ["CSV", "GML3", "csv", "geojson", "gml3", "json"]);
        assert_eq!(listed, registry.list_publishable_identifiers());
    }

    #[test]
    fn test_listing_independent_of_registration_order() {
        let forward = builder()
            .with(descriptor(&["b", "a"]))
            .unwrap()
            .with(descriptor(&["c"]))
            .unwrap()
            .build()
            .unwrap();
        let backward = builder()
            .with(descriptor(&["c"]))
            .unwrap()
            .with(descriptor(&["a", "b"]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            forward.list_publishable_identifiers(),
            backward.list_publishable_identifiers()
        );
    }

    #[test]
    fn test_capabilities_names_follow_publish_mode() {
        let all = EncoderDescriptor::builder(["SHAPE-ZIP", "application/zip", "shapezip"])
            .publish_mode(PublishMode::AllAliases)
            .build()
            .unwrap();
        let primary = EncoderDescriptor::builder(["text/xml; subtype=gml/2.1.2", "GML2"])
            .identifier("GML2")
            .build()
            .unwrap();
        let registry = builder().with(all).unwrap().with(primary).unwrap().build().unwrap();

        assert_eq!(
            registry.capabilities_element_names(),
            ["GML2", "SHAPE-ZIP", "shapezip"]
        );
    }

    #[test]
    fn test_build_fails_on_unpublishable_descriptor() {
        let unnamed = EncoderDescriptor::builder(["application/json"]).build().unwrap();
        let err = builder().with(unnamed).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_build_reports_unpublishable_aliases() {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let registry = EncoderRegistry::builder(diagnostics.clone())
            .with(descriptor(&["GML2", "text/xml; subtype=gml/2.1.2"]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            diagnostics.events(),
            vec![Diagnostic::AliasNotPublishable {
                alias: "text/xml; subtype=gml/2.1.2".to_string()
            }]
        );
    }

    #[test]
    fn test_identifier_collision_reported() {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let registry = EncoderRegistry::builder(diagnostics.clone())
            .with(EncoderDescriptor::builder(["gml-a"]).identifier("GML").build().unwrap())
            .unwrap()
            .with(EncoderDescriptor::builder(["gml-b"]).identifier("GML").build().unwrap())
            .unwrap()
            .build()
            .unwrap();

        let ids: Vec<_> = registry.iter().map(RegisteredEncoder::identifier).collect();
        assert_eq!(ids, ["GML", "GML"]);
        assert_eq!(registry.capabilities_element_names(), ["GML"]);

        let events = diagnostics.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Diagnostic::IdentifierCollision { identifier, .. } if identifier == "GML"
        ));
    }
}
