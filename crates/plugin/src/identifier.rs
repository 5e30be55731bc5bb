//! Publishable identifiers for encoders.
//!
//! A publishable identifier ends up as an element name in a capabilities
//! document, so it has to satisfy the XML `Name` production. Colons are left
//! out: a colon would be read as a namespace prefix.

use crate::descriptor::EncoderDescriptor;
use geoformat_api::{ConfigError, Diagnostic, Diagnostics};
use once_cell::sync::Lazy;
use regex::Regex;

const NAME_START_CHARS: &str = r"A-Z_a-z\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{2FF}\x{370}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}";

const NAME_EXTRA_CHARS: &str = r"\-.0-9\x{B7}\x{300}-\x{36F}\x{203F}-\x{2040}";

static BARE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!("^[{NAME_START_CHARS}][{NAME_START_CHARS}{NAME_EXTRA_CHARS}]*$");
    Regex::new(&pattern).expect("bare identifier pattern must compile")
});

/// Whether `candidate` can be embedded as an element or attribute name.
pub fn is_valid_identifier(candidate: &str) -> bool {
    BARE_IDENTIFIER.is_match(candidate)
}

/// Reduces a qualified implementation-type name to its last segment.
///
/// Generic arguments are dropped first, so `a::b::Csv<x::Y>` yields `Csv`.
/// Both Rust (`::`) and dotted qualifiers are stripped.
pub fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.rsplit("::").next().unwrap_or(base);
    base.rsplit('.').next().unwrap_or(base).trim()
}

/// Derives the identifier an encoder is published under.
///
/// Order: a valid override, then a valid primary alias, then the short type
/// name. A rejected override or a type-name fallback is reported to
/// `diagnostics`. If nothing valid remains the registry must not start.
pub fn derive_identifier(
    descriptor: &EncoderDescriptor,
    diagnostics: &dyn Diagnostics,
) -> Result<String, ConfigError> {
    let primary = descriptor.primary_alias();

    if let Some(identifier) = descriptor.identifier_override() {
        if is_valid_identifier(identifier) {
            return Ok(identifier.to_string());
        }
        diagnostics.report(Diagnostic::OverrideRejected {
            primary_alias: primary.to_string(),
            identifier: identifier.to_string(),
        });
    }

    if is_valid_identifier(primary) {
        return Ok(primary.to_string());
    }

    let Some(type_name) = descriptor.type_name() else {
        return Err(ConfigError::InvalidIdentifier {
            primary_alias: primary.to_string(),
            reason: "no valid override or alias and no implementation type name to fall back on"
                .to_string(),
        });
    };

    let short = short_type_name(type_name);
    if !is_valid_identifier(short) {
        return Err(ConfigError::InvalidIdentifier {
            primary_alias: primary.to_string(),
            reason: format!("type name fallback '{short}' is not a valid element name"),
        });
    }

    diagnostics.report(Diagnostic::TypeNameFallback {
        primary_alias: primary.to_string(),
        identifier: short.to_string(),
    });
    Ok(short.to_string())
}
