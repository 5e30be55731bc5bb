use geoformat_api::OperationDescriptor;
use std::fmt::Debug;

/// Decides whether an encoder can serve an operation beyond format-label matching.
///
/// Implementations must be pure with respect to the operation: they may read
/// immutable configuration but never mutate shared state.
pub trait CapabilityPredicate: Send + Sync + Debug {
    fn accepts(&self, operation: &OperationDescriptor) -> bool;
}

/// The default predicate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl CapabilityPredicate for AcceptAll {
    fn accepts(&self, _operation: &OperationDescriptor) -> bool {
        true
    }
}

/// Accepts only operations that carry a non-null value for `parameter`.
#[derive(Debug, Clone)]
pub struct RequiresParameter {
    pub parameter: String,
}

impl RequiresParameter {
    pub fn new(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
        }
    }
}

impl CapabilityPredicate for RequiresParameter {
    fn accepts(&self, operation: &OperationDescriptor) -> bool {
        operation
            .parameter(&self.parameter)
            .is_some_and(|value| !value.is_null())
    }
}

/// Accepts operations that query exactly one feature type.
///
/// Reads `typeName`, which is either a comma separated string or an array.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleFeatureType;

impl CapabilityPredicate for SingleFeatureType {
    fn accepts(&self, operation: &OperationDescriptor) -> bool {
        match operation.parameter("typeName") {
            Some(serde_json::Value::String(s)) => !s.is_empty() && !s.contains(','),
            Some(serde_json::Value::Array(items)) => items.len() == 1,
            _ => false,
        }
    }
}

/// Wraps a closure as a predicate.
pub struct PredicateFn<F>(pub &'static str, pub F);

impl<F> Debug for PredicateFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PredicateFn").field(&self.0).finish()
    }
}

impl<F> CapabilityPredicate for PredicateFn<F>
where
    F: Fn(&OperationDescriptor) -> bool + Send + Sync,
{
    fn accepts(&self, operation: &OperationDescriptor) -> bool {
        (self.1)(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoformat_api::ResultType;

    fn get_feature() -> OperationDescriptor {
        OperationDescriptor::new("GetFeature", ResultType::Results)
    }

    #[test]
    fn test_requires_parameter() {
        let predicate = RequiresParameter::new("propertyName");
        assert!(!predicate.accepts(&get_feature()));
        assert!(!predicate.accepts(&get_feature().with_parameter("propertyName", serde_json::Value::Null)));
        assert!(predicate.accepts(&get_feature().with_parameter("PROPERTYNAME", "geom")));
    }

    #[test]
    fn test_single_feature_type() {
        let predicate = SingleFeatureType;
        assert!(predicate.accepts(&get_feature().with_parameter("typeName", "topp:states")));
        assert!(!predicate.accepts(&get_feature().with_parameter("typeName", "topp:states,topp:roads")));
        assert!(predicate.accepts(&get_feature().with_parameter("typeName", serde_json::json!(["a"]))));
        assert!(!predicate.accepts(&get_feature()));
    }

    #[test]
    fn test_closure_predicate() {
        let predicate = PredicateFn("lock-only", |op: &OperationDescriptor| {
            op.kind.matches("GetFeatureWithLock")
        });
        assert!(!predicate.accepts(&get_feature()));
        assert!(predicate.accepts(&OperationDescriptor::new("GetFeatureWithLock", ResultType::Results)));
        assert_eq!(format!("{predicate:?}"), "PredicateFn(\"lock-only\")");
    }
}
