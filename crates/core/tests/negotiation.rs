//! Negotiation over a shared, built registry.

use geoformat_api::{NoopDiagnostics, OperationDescriptor, ResultType};
use geoformat_core::config::{FormatConfig, NegotiationConfig, ServiceConfig};
use geoformat_core::{CapabilityNegotiator, CollectingDiagnostics, EncoderRegistry};
use geoformat_plugin::{EncoderDescriptor, SingleFeatureType};
use std::sync::Arc;

fn shared_registry() -> Arc<EncoderRegistry> {
    let registry = EncoderRegistry::builder(Arc::new(NoopDiagnostics))
        .with(
            EncoderDescriptor::builder(["SHAPE-ZIP", "application/zip"])
                .predicate(SingleFeatureType)
                .mime_type("application/zip")
                .build()
                .unwrap(),
        )
        .unwrap()
        .with(
            EncoderDescriptor::builder(["text/xml; subtype=gml/3.1.1", "GML3", "gml3"])
                .identifier("GML3")
                .build()
                .unwrap(),
        )
        .unwrap()
        .with(EncoderDescriptor::builder(["GML2"]).build().unwrap())
        .unwrap()
        .build()
        .unwrap();
    Arc::new(registry)
}

#[test]
fn test_concurrent_negotiation_is_deterministic() {
    let negotiator = CapabilityNegotiator::new(shared_registry(), &NegotiationConfig::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let negotiator = negotiator.clone();
            std::thread::spawn(move || {
                let type_name = if i % 2 == 0 { "topp:states" } else { "topp:states,topp:roads" };
                let op = OperationDescriptor::new("GetFeature", ResultType::Results)
                    .with_parameter("typeName", type_name);
                (i, negotiator.negotiate(&op).unwrap().identifier().to_string())
            })
        })
        .collect();

    for handle in handles {
        let (i, identifier) = handle.join().unwrap();
        // Single type goes to the first registered encoder; multi-type falls through.
        let expected = if i % 2 == 0 { "SHAPE-ZIP" } else { "GML3" };
        assert_eq!(identifier, expected);
    }
}

#[test]
fn test_requested_format_selects_encoder() {
    let negotiator = CapabilityNegotiator::new(shared_registry(), &NegotiationConfig::default());
    let op = OperationDescriptor::new("GetFeature", ResultType::Results)
        .with_parameter("outputFormat", "text/xml; subtype=gml/3.1.1");

    let encoder = negotiator.negotiate(&op).unwrap();
    assert_eq!(encoder.identifier(), "GML3");
    assert_eq!(encoder.descriptor().mime_type(), "text/xml");
}

#[test]
fn test_hits_request_never_matches() {
    let negotiator = CapabilityNegotiator::new(shared_registry(), &NegotiationConfig::default());
    let op = OperationDescriptor::new("GetFeature", ResultType::Hits)
        .with_parameter("outputFormat", "GML2");
    assert!(negotiator.negotiate(&op).is_err());
}

#[test]
fn test_configured_formats_join_the_registry() {
    let config = ServiceConfig {
        formats: vec![FormatConfig {
            aliases: vec!["application/vnd.ogc.csv".to_string()],
            identifier: None,
            mime_type: Some("text/csv".to_string()),
            publish_all_aliases: false,
            type_name: Some("plugins.csv.CSVOutputFormat".to_string()),
            requires_parameter: None,
        }],
        ..ServiceConfig::default()
    };

    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let mut builder = EncoderRegistry::builder(diagnostics.clone());
    for descriptor in config.format_descriptors().unwrap() {
        builder.register(descriptor).unwrap();
    }
    let registry = Arc::new(builder.build().unwrap());

    assert_eq!(registry.iter().next().unwrap().identifier(), "CSVOutputFormat");
    assert!(!diagnostics.is_empty());
    // The alias is not a valid element name, so nothing is listed.
    assert!(registry.list_publishable_identifiers().is_empty());
    assert_eq!(registry.capabilities_element_names(), ["CSVOutputFormat"]);
}
