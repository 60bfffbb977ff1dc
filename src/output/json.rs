//! JSON output formatting.

use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;

/// Pretty-print any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}").into())
}

/// Render `key,value` pairs as one JSON object.
pub fn pairs_json(pairs: &[(&str, String)]) -> Result<String, Box<dyn Error>> {
    let object: Map<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.clone())))
        .collect();
    to_json(&object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    #[test]
    fn test_to_json() {
        let networks = vec![Network::parse("10.0.0.0/8").unwrap()];
        let json = to_json(&networks).unwrap();
        let back: Vec<Network> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, networks);
    }

    #[test]
    fn test_pairs_json() {
        let json = pairs_json(&[("count", "256".to_string())]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], "256");
    }
}
