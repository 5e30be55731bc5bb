use geoformat_api::{OUTPUT_FORMAT_PARAM, OperationDescriptor, ResultType};
use geoformat_core::{ServiceConfig, TracingDiagnostics};
use geoformat_runtime::build_default_negotiator;
use std::sync::Arc;

fn parse_param(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn run(
    config: &ServiceConfig,
    operation: String,
    result_type: ResultType,
    format: Option<String>,
    params: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let negotiator = build_default_negotiator(config, Arc::new(TracingDiagnostics))?;

    let mut op = OperationDescriptor::new(operation, result_type);
    for raw in &params {
        let (key, value) = parse_param(raw)?;
        op = op.with_parameter(key, value);
    }
    if let Some(format) = format {
        op = op.with_parameter(OUTPUT_FORMAT_PARAM, format);
    }

    let encoder = negotiator.negotiate(&op)?;
    println!("Identifier: {}", encoder.identifier());
    println!("Aliases:    {}", encoder.descriptor().aliases().join(", "));
    println!("MIME type:  {}", encoder.descriptor().mime_type());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("maxFeatures=10").unwrap(),
            ("maxFeatures".to_string(), serde_json::json!(10))
        );
        assert_eq!(
            parse_param("typeName=topp:states").unwrap(),
            ("typeName".to_string(), serde_json::json!("topp:states"))
        );
        assert_eq!(
            parse_param("typeName=[\"a\",\"b\"]").unwrap().1,
            serde_json::json!(["a", "b"])
        );
        assert!(parse_param("novalue").is_err());
    }
}
