pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use catalog::Catalog;
pub use diagnostics::{Diagnostic, Diagnostics, NoopDiagnostics};
pub use error::{CatalogError, ConfigError, MismatchReason, NegotiationError, ResolveError};
pub use models::*;
