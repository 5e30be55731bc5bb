//! Output formats shipped with the service.
//!
//! Each type stands for the encoder that writes the bytes; here only its
//! descriptor is assembled.

use geoformat_api::ConfigError;
use geoformat_plugin::{EncoderDescriptor, PublishMode, SingleFeatureType};

pub struct Gml2OutputFormat;

impl Gml2OutputFormat {
    pub const MIME_TYPE: &'static str = "text/xml; subtype=gml/2.1.2";

    pub fn descriptor() -> Result<EncoderDescriptor, ConfigError> {
        EncoderDescriptor::builder(["GML2", Self::MIME_TYPE])
            .mime_type(Self::MIME_TYPE)
            .implemented_by::<Self>()
            .build()
    }
}

pub struct Gml3OutputFormat;

impl Gml3OutputFormat {
    pub const MIME_TYPE: &'static str = "text/xml; subtype=gml/3.1.1";

    pub fn descriptor() -> Result<EncoderDescriptor, ConfigError> {
        EncoderDescriptor::builder([Self::MIME_TYPE, "gml3", "GML3"])
            .identifier("GML3")
            .mime_type(Self::MIME_TYPE)
            .implemented_by::<Self>()
            .build()
    }
}

pub struct GeoJsonOutputFormat;

impl GeoJsonOutputFormat {
    pub fn descriptor() -> Result<EncoderDescriptor, ConfigError> {
        EncoderDescriptor::builder(["application/json", "json"])
            .mime_type("application/json")
            .implemented_by::<Self>()
            .publish_mode(PublishMode::AllAliases)
            .build()
    }
}

/// CSV is a single table, so only one feature type per request.
pub struct CsvOutputFormat;

impl CsvOutputFormat {
    pub fn descriptor() -> Result<EncoderDescriptor, ConfigError> {
        EncoderDescriptor::builder(["csv", "text/csv"])
            .mime_type("text/csv")
            .predicate(SingleFeatureType)
            .implemented_by::<Self>()
            .build()
    }
}

pub struct ShapeZipOutputFormat;

impl ShapeZipOutputFormat {
    pub fn descriptor() -> Result<EncoderDescriptor, ConfigError> {
        EncoderDescriptor::builder(["SHAPE-ZIP", "application/zip"])
            .mime_type("application/zip")
            .implemented_by::<Self>()
            .build()
    }
}

/// Built-in descriptors in registration order. GML2 first: it answers
/// requests that do not name a format.
pub fn builtin_descriptors() -> Result<Vec<EncoderDescriptor>, ConfigError> {
    Ok(vec![
        Gml2OutputFormat::descriptor()?,
        Gml3OutputFormat::descriptor()?,
        GeoJsonOutputFormat::descriptor()?,
        CsvOutputFormat::descriptor()?,
        ShapeZipOutputFormat::descriptor()?,
    ])
}
