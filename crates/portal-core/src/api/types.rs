use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool entry as the backend returns it. `id` is assigned server-side
/// and never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_path: String,
}

/// Payload for creating a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTool {
    pub name: String,
    pub description: String,
    pub target_path: String,
}

// The backend may issue numeric or string ids; treat both as opaque text.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("unexpected id value: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_both_decode() {
        let t: Tool = serde_json::from_str(
            r#"{"id": 7, "name": "Wiki", "description": "Internal wiki", "target_path": "/wiki"}"#,
        )
        .unwrap();
        assert_eq!(t.id, "7");

        let t: Tool = serde_json::from_str(
            r#"{"id": "abc", "name": "Wiki", "description": "Internal wiki", "target_path": "/wiki"}"#,
        )
        .unwrap();
        assert_eq!(t.id, "abc");
    }
}
