use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Print `data` as pretty JSON, or run `text` to render it for humans
pub fn output_data(
    output_format: &OutputFormat,
    data: Value,
    text: impl FnOnce(&Value),
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "success": true, "data": data }))?);
        }
        OutputFormat::Text => text(&data),
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Split `key=value` arguments into pairs, keeping their order
pub fn parse_pairs(args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", arg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let args = vec!["status=active".to_string(), "createdAt_gt=2024-01-01T00:00:00Z".to_string(), "q=a=b".to_string()];
        let pairs = parse_pairs(&args).unwrap();
        assert_eq!(pairs[0], ("status".to_string(), "active".to_string()));
        assert_eq!(pairs[1].0, "createdAt_gt");
        assert_eq!(pairs[2], ("q".to_string(), "a=b".to_string()));
    }

    #[test]
    fn rejects_missing_equals() {
        assert!(parse_pairs(&["status".to_string()]).is_err());
    }
}
