use std::fmt;

/// Why negotiation found no encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// The operation is not one of the recognized query operations.
    UnrecognizedOperation,
    /// Hit-count and validation requests are routed elsewhere.
    NonResultRequest,
    /// Every candidate encoder declined, or none declares the requested format.
    NoAcceptingEncoder,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MismatchReason::UnrecognizedOperation => "operation is not a feature query",
            MismatchReason::NonResultRequest => "request does not ask for results",
            MismatchReason::NoAcceptingEncoder => "no registered encoder accepts it",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NegotiationError {
    #[error("No compatible encoder for {kind} (format: {}): {reason}", output_format.as_deref().unwrap_or("<any>"))]
    NoCompatibleEncoder {
        kind: String,
        output_format: Option<String>,
        reason: MismatchReason,
    },
}

/// Startup-time configuration errors. None of these may surface at request time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Encoder {type_name} declares no output format aliases")]
    EmptyAliases { type_name: String },
    #[error("Output format alias '{alias}' is registered by both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
    #[error("Encoder with primary alias '{primary_alias}' has no publishable identifier: {reason}")]
    InvalidIdentifier {
        primary_alias: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No resource '{reference}' in namespace {namespace}")]
    ResourceNotFound { namespace: String, reference: String },
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),
    #[error("Directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

impl From<CatalogError> for ResolveError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NamespaceNotFound(ns) => ResolveError::NamespaceNotFound(ns),
            CatalogError::Unavailable(msg) => ResolveError::DirectoryUnavailable(msg),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
