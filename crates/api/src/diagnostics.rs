use std::fmt;

/// A configuration problem noticed while assembling the encoder registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An explicit identifier override is not a valid bare identifier.
    OverrideRejected {
        primary_alias: String,
        identifier: String,
    },
    /// Neither override nor primary alias was usable; the type name was used instead.
    TypeNameFallback {
        primary_alias: String,
        identifier: String,
    },
    /// An alias is usable for negotiation but cannot appear in capabilities documents.
    AliasNotPublishable { alias: String },
    /// Two encoders ended up published under the same identifier.
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OverrideRejected {
                primary_alias,
                identifier,
            } => write!(
                f,
                "encoder '{primary_alias}': identifier override '{identifier}' is not a valid element name"
            ),
            Diagnostic::TypeNameFallback {
                primary_alias,
                identifier,
            } => write!(
                f,
                "encoder '{primary_alias}': no valid identifier declared, publishing type name '{identifier}'"
            ),
            Diagnostic::AliasNotPublishable { alias } => {
                write!(f, "alias '{alias}' is not a valid element name and is not published")
            }
            Diagnostic::IdentifierCollision {
                identifier,
                first,
                second,
            } => write!(
                f,
                "encoders '{first}' and '{second}' are both published as '{identifier}'"
            ),
        }
    }
}

/// Sink for configuration diagnostics, handed explicitly to whoever needs to report.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}
