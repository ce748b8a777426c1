//! Scan request models

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    pub urls: Vec<Value>,
}

impl BulkRequest {
    /// Batch entries as text. Strings pass through; other values render as
    /// `None`, `True`, `False`, a number, or a bracketed repr such as
    /// `['a', 1]`, and are classified like any other entry.
    pub fn url_strings(&self) -> Vec<String> {
        self.urls
            .iter()
            .map(|entry| match entry {
                Value::String(s) => s.clone(),
                other => display_value(other),
            })
            .collect()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", k, display_value(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let predict: PredictRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(predict.url, "");

        let bulk: BulkRequest = serde_json::from_str("{}").unwrap();
        assert!(bulk.urls.is_empty());
    }

    #[test]
    fn test_bulk_entries_coerced_to_text() {
        let bulk: BulkRequest = serde_json::from_str(
            r#"{"urls": ["http://a.com", null, 42, true, false, 1.5, ["x", 2], {"k": null}]}"#,
        )
        .unwrap();
        assert_eq!(
            bulk.url_strings(),
            vec!["http://a.com", "None", "42", "True", "False", "1.5", "['x', 2]", "{'k': None}"]
        );
    }

    #[test]
    fn test_blank_strings_stay_blank() {
        let bulk: BulkRequest = serde_json::from_str(r#"{"urls": ["", "  "]}"#).unwrap();
        assert_eq!(bulk.url_strings(), vec!["", "  "]);
    }
}
