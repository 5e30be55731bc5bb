pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod directory;
pub mod error;
pub mod logging;
pub mod negotiator;
pub mod registry;

pub use catalog::InMemoryCatalog;
pub use config::ServiceConfig;
pub use diagnostics::{CollectingDiagnostics, TracingDiagnostics};
pub use directory::ResourceDirectory;
pub use error::Result;
pub use negotiator::CapabilityNegotiator;
pub use registry::{EncoderRegistry, EncoderRegistryBuilder, RegisteredEncoder};
