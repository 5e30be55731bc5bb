use crate::capability::{AcceptAll, CapabilityPredicate};
use crate::identifier::is_valid_identifier;
use geoformat_api::{ConfigError, OperationDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const DEFAULT_MIME_TYPE: &str = "text/xml";

/// Which names an encoder contributes to a capabilities document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Only the derived identifier.
    #[default]
    Primary,
    /// Every alias that is a valid element name.
    AllAliases,
}

/// Static description of one encoder: the labels it answers to, the extra
/// check it applies to operations, and how it is published.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EncoderDescriptor {
    aliases: Vec<String>,
    predicate: Arc<dyn CapabilityPredicate>,
    identifier_override: Option<String>,
    type_name: Option<String>,
    mime_type: String,
    publish_mode: PublishMode,
}

impl EncoderDescriptor {
    pub fn builder<I, S>(aliases: I) -> EncoderDescriptorBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EncoderDescriptorBuilder {
            aliases: aliases.into_iter().map(Into::into).collect(),
            predicate: Arc::new(AcceptAll),
            identifier_override: None,
            type_name: None,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            publish_mode: PublishMode::default(),
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The first declared alias. Never empty.
    pub fn primary_alias(&self) -> &str {
        &self.aliases[0]
    }

    pub fn declares(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    pub fn accepts(&self, operation: &OperationDescriptor) -> bool {
        self.predicate.accepts(operation)
    }

    pub fn identifier_override(&self) -> Option<&str> {
        self.identifier_override.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn publish_mode(&self) -> PublishMode {
        self.publish_mode
    }

    /// The aliases that are valid element names, sorted and deduplicated.
    pub fn publishable_aliases(&self) -> Vec<String> {
        self.aliases
            .iter()
            .filter(|alias| is_valid_identifier(alias))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Human-readable name for error messages.
    pub fn display_name(&self) -> String {
        match &self.type_name {
            Some(type_name) => format!("{} ({})", self.primary_alias(), type_name),
            None => self.primary_alias().to_string(),
        }
    }
}

pub struct EncoderDescriptorBuilder {
    aliases: Vec<String>,
    predicate: Arc<dyn CapabilityPredicate>,
    identifier_override: Option<String>,
    type_name: Option<String>,
    mime_type: String,
    publish_mode: PublishMode,
}

impl EncoderDescriptorBuilder {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier_override = Some(identifier.into());
        self
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Records `T` as the implementation type, used when no declared name is publishable.
    pub fn implemented_by<T: ?Sized>(self) -> Self {
        self.type_name(std::any::type_name::<T>())
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn predicate(self, predicate: impl CapabilityPredicate + 'static) -> Self {
        self.shared_predicate(Arc::new(predicate))
    }

    pub fn shared_predicate(mut self, predicate: Arc<dyn CapabilityPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn publish_mode(mut self, publish_mode: PublishMode) -> Self {
        self.publish_mode = publish_mode;
        self
    }

    /// Drops empty and repeated aliases (first occurrence wins) and rejects
    /// a descriptor left with none.
    pub fn build(self) -> Result<EncoderDescriptor, ConfigError> {
        let mut seen = BTreeSet::new();
        let aliases: Vec<String> = self
            .aliases
            .into_iter()
            .filter(|alias| !alias.is_empty() && seen.insert(alias.clone()))
            .collect();

        if aliases.is_empty() {
            return Err(ConfigError::EmptyAliases {
                type_name: self.type_name.unwrap_or_else(|| "<unnamed>".to_string()),
            });
        }

        Ok(EncoderDescriptor {
            aliases,
            predicate: self.predicate,
            identifier_override: self.identifier_override,
            type_name: self.type_name,
            mime_type: self.mime_type,
            publish_mode: self.publish_mode,
        })
    }
}
