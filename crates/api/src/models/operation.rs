use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Parameter carrying the client-requested output format label.
pub const OUTPUT_FORMAT_PARAM: &str = "outputFormat";

/// Request type identifier of a service operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct OperationKind(#[schemars(with = "String")] Cow<'static, str>);

impl OperationKind {
    pub const GET_FEATURE: OperationKind = OperationKind(Cow::Borrowed("GetFeature"));
    pub const GET_FEATURE_WITH_LOCK: OperationKind =
        OperationKind(Cow::Borrowed("GetFeatureWithLock"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Operation ids are matched the way OWS dispatchers match them: ignoring ASCII case.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OperationKind {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for OperationKind {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for OperationKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// What the caller wants back from a query operation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// The actual features.
    #[default]
    Results,
    /// Only the number of matching features.
    Hits,
    /// Validate the request without producing output.
    Validate,
}

impl std::str::FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "results" => Ok(ResultType::Results),
            "hits" => Ok(ResultType::Hits),
            "validate" => Ok(ResultType::Validate),
            other => Err(format!("unknown result type: {other}")),
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultType::Results => "results",
            ResultType::Hits => "hits",
            ResultType::Validate => "validate",
        };
        f.write_str(s)
    }
}

/// Read-only view of an incoming operation, as handed over by the dispatcher.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct OperationDescriptor {
    pub kind: OperationKind,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub result_type: ResultType,
}

impl OperationDescriptor {
    pub fn new(kind: impl Into<OperationKind>, result_type: ResultType) -> Self {
        Self {
            kind: kind.into(),
            parameters: BTreeMap::new(),
            result_type,
        }
    }

    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Looks a parameter up by name. KVP keys are case-insensitive, so an exact
    /// hit is tried first and then an ASCII-case-insensitive scan.
    pub fn parameter(&self, key: &str) -> Option<&serde_json::Value> {
        self.parameters.get(key).or_else(|| {
            self.parameters
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// The requested output format label. Non-string values are rendered as
    /// text, so a number still names a format and a composite value names one
    /// no encoder declares. Only an absent or null parameter means "any".
    pub fn output_format(&self) -> Option<Cow<'_, str>> {
        match self.parameter(OUTPUT_FORMAT_PARAM)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matching_ignores_case() {
        assert!(OperationKind::GET_FEATURE.matches("getfeature"));
        assert!(OperationKind::GET_FEATURE.matches("GETFEATURE"));
        assert!(!OperationKind::GET_FEATURE.matches("GetFeatureWithLock"));
    }

    #[test]
    fn test_output_format_lookup() {
        let op = OperationDescriptor::new(OperationKind::GET_FEATURE, ResultType::Results)
            .with_parameter("OUTPUTFORMAT", "GML2");
        assert_eq!(op.output_format().as_deref(), Some("GML2"));

        let op = OperationDescriptor::new("GetFeature", ResultType::Results)
            .with_parameter(OUTPUT_FORMAT_PARAM, 3);
        assert_eq!(op.output_format().as_deref(), Some("3"));

        let op = OperationDescriptor::new("GetFeature", ResultType::Results)
            .with_parameter(OUTPUT_FORMAT_PARAM, serde_json::json!(["csv"]));
        assert_eq!(op.output_format().as_deref(), Some(r#"["csv"]"#));

        let op = OperationDescriptor::new("GetFeature", ResultType::Results)
            .with_parameter(OUTPUT_FORMAT_PARAM, serde_json::Value::Null);
        assert_eq!(op.output_format(), None);
    }

    #[test]
    fn test_result_type_parse() {
        assert_eq!("HITS".parse::<ResultType>().unwrap(), ResultType::Hits);
        assert!("everything".parse::<ResultType>().is_err());
    }

    #[test]
    fn test_descriptor_deserializes_with_defaults() {
        let op: OperationDescriptor =
            serde_json::from_str(r#"{"kind": "GetFeature"}"#).unwrap();
        assert_eq!(op.kind, OperationKind::GET_FEATURE);
        assert_eq!(op.result_type, ResultType::Results);
        assert!(op.parameters.is_empty());
    }
}
