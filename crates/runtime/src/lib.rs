pub mod formats;

use geoformat_api::{ConfigError, Diagnostics};
use geoformat_core::{
    CapabilityNegotiator, EncoderRegistry, InMemoryCatalog, ResourceDirectory, ServiceConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Assembles the registry: built-in formats first, then those declared in
/// configuration. Any configuration problem aborts startup.
pub fn build_default_registry(
    config: &ServiceConfig,
    diagnostics: Arc<dyn Diagnostics>,
) -> Result<Arc<EncoderRegistry>, ConfigError> {
    let mut builder = EncoderRegistry::builder(diagnostics);

    let builtin = formats::builtin_descriptors()?;
    let configured = config.format_descriptors()?;
    info!(
        "Registering {} built-in and {} configured output formats",
        builtin.len(),
        configured.len()
    );

    for descriptor in builtin.into_iter().chain(configured) {
        builder.register(descriptor)?;
    }

    Ok(Arc::new(builder.build()?))
}

/// Registry plus negotiator wired from the same configuration.
pub fn build_default_negotiator(
    config: &ServiceConfig,
    diagnostics: Arc<dyn Diagnostics>,
) -> Result<CapabilityNegotiator, ConfigError> {
    let registry = build_default_registry(config, diagnostics)?;
    Ok(CapabilityNegotiator::new(registry, &config.negotiation))
}

/// Directory backed by a JSON catalog file.
pub fn open_directory(catalog_path: &Path) -> geoformat_core::Result<ResourceDirectory> {
    let catalog = InMemoryCatalog::from_json_file(catalog_path)?;
    Ok(ResourceDirectory::new(Arc::new(catalog)))
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(geoformat_core::logging::init_logging(component, to_stderr))
}
