use serde_json::Value;

pub fn parse_json(json_str: &str) -> Result<Value, String> {
    serde_json::from_str(json_str).map_err(|e| e.to_string())
}
