pub mod capability;
pub mod descriptor;
pub mod identifier;

pub use capability::{AcceptAll, CapabilityPredicate, PredicateFn, RequiresParameter, SingleFeatureType};
pub use descriptor::{DEFAULT_MIME_TYPE, EncoderDescriptor, EncoderDescriptorBuilder, PublishMode};
pub use identifier::{derive_identifier, is_valid_identifier, short_type_name};
