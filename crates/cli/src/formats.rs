use geoformat_core::{CollectingDiagnostics, ServiceConfig, TracingDiagnostics};
use geoformat_runtime::build_default_registry;
use std::sync::Arc;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FormatRow {
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
    #[tabled(rename = "MIME type")]
    mime_type: String,
}

pub fn list(config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = build_default_registry(config, Arc::new(TracingDiagnostics))?;

    let rows: Vec<FormatRow> = registry
        .iter()
        .map(|encoder| FormatRow {
            identifier: encoder.identifier().to_string(),
            aliases: encoder.descriptor().aliases().join(", "),
            mime_type: encoder.descriptor().mime_type().to_string(),
        })
        .collect();

    if rows.is_empty() {
        println!("No output formats registered.");
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}

pub fn identifiers(config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = build_default_registry(config, Arc::new(TracingDiagnostics))?;
    for identifier in registry.list_publishable_identifiers() {
        println!("{}", identifier);
    }
    Ok(())
}

pub fn capabilities(config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = build_default_registry(config, Arc::new(TracingDiagnostics))?;
    println!("<ResultFormat>");
    for name in registry.capabilities_element_names() {
        println!("  <{}/>", name);
    }
    println!("</ResultFormat>");
    Ok(())
}

pub fn check(config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let registry = build_default_registry(config, diagnostics.clone())?;

    println!("{} output formats registered.", registry.len());
    let events = diagnostics.events();
    if events.is_empty() {
        println!("No configuration problems found.");
    } else {
        println!("\nDiagnostics:");
        for event in events {
            println!("  - {}", event);
        }
    }
    Ok(())
}
