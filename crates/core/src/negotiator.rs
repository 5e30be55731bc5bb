use crate::config::NegotiationConfig;
use crate::registry::{EncoderRegistry, RegisteredEncoder};
use geoformat_api::{MismatchReason, NegotiationError, OperationDescriptor, OperationKind, ResultType};
use std::sync::Arc;

/// Picks the encoder that serializes the result of a feature query.
#[derive(Debug, Clone)]
pub struct CapabilityNegotiator {
    registry: Arc<EncoderRegistry>,
    recognized: Vec<OperationKind>,
}

impl CapabilityNegotiator {
    pub fn new(registry: Arc<EncoderRegistry>, config: &NegotiationConfig) -> Self {
        Self {
            registry,
            recognized: config
                .recognized_operations
                .iter()
                .map(|kind| OperationKind::from(kind.as_str()))
                .collect(),
        }
    }

    pub fn registry(&self) -> &Arc<EncoderRegistry> {
        &self.registry
    }

    pub fn recognizes(&self, kind: &OperationKind) -> bool {
        self.recognized.iter().any(|k| k.matches(kind.as_str()))
    }

    /// Returns the first encoder, in registration order, able to serve `operation`.
    ///
    /// Only recognized query operations asking for actual results are
    /// eligible. When the operation names an output format, only encoders
    /// declaring that alias are considered; a non-string format value is
    /// matched by its textual form.
    pub fn negotiate(
        &self,
        operation: &OperationDescriptor,
    ) -> Result<&RegisteredEncoder, NegotiationError> {
        let output_format = operation.output_format();
        let output_format = output_format.as_deref();
        let reject = |reason: MismatchReason| {
            tracing::debug!(
                "No encoder for {} (format {:?}): {}",
                operation.kind,
                output_format,
                reason
            );
            NegotiationError::NoCompatibleEncoder {
                kind: operation.kind.to_string(),
                output_format: output_format.map(str::to_string),
                reason,
            }
        };

        if !self.recognizes(&operation.kind) {
            return Err(reject(MismatchReason::UnrecognizedOperation));
        }
        if operation.result_type != ResultType::Results {
            return Err(reject(MismatchReason::NonResultRequest));
        }

        let found = self
            .registry
            .iter()
            .filter(|encoder| output_format.is_none_or(|f| encoder.descriptor().declares(f)))
            .find(|encoder| encoder.descriptor().accepts(operation));

        match found {
            Some(encoder) => {
                tracing::debug!(
                    "Negotiated encoder '{}' for {}",
                    encoder.identifier(),
                    operation.kind
                );
                Ok(encoder)
            }
            None => Err(reject(MismatchReason::NoAcceptingEncoder)),
        }
    }
}
