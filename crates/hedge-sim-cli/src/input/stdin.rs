use serde_json::Value;
use std::io::{self, Read};

/// Read params piped on stdin. YAML is a superset of JSON, so both parse.
/// Returns None when stdin is interactive or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON or YAML: {}", e))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_none() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }

    #[test]
    fn test_json_and_yaml_both_parse() {
        let json = parse_piped(r#"{"test_cost": 300}"#).unwrap().unwrap();
        let yaml = parse_piped("test_cost: 300\n").unwrap().unwrap();
        assert_eq!(json, yaml);
    }
}
