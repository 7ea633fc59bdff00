//! Deep normalization of model output.
//!
//! Models often return nested structures as JSON-encoded strings. Every
//! string leaf that parses as JSON is replaced by its parsed value, and
//! the parsed value is normalized in turn. Strings that do not parse are
//! left untouched. Numeric-looking strings such as `"5"` become numbers.

use serde_json::{Map, Value};

/// Normalize an owned tree. Never fails.
pub fn normalize(value: Value) -> Value
{   match value
    {   Value::String(s) => normalize_str(s)
      , Value::Array(items) => Value::Array(
          items.into_iter().map(normalize).collect()
        )
      , Value::Object(map) => Value::Object(
          map.into_iter()
            .map(|(k, v)| (k, normalize(v)))
            .collect::<Map<String, Value>>()
        )
      , other => other
    }
}

/// Normalize a borrowed tree into a new one, leaving the input intact
pub fn normalize_ref(value: &Value) -> Value
{   normalize(value.clone())
}

fn normalize_str(s: String) -> Value
{   match serde_json::from_str::<Value>(&s)
    {   Ok(parsed) => normalize(parsed)
      , Err(_) => Value::String(s)
    }
}

/// Text form of a value for display: empty for null, strings as is,
/// everything else as compact JSON.
pub fn render_value(value: &Value) -> String
{   match value
    {   Value::Null => String::new()
      , Value::String(s) => s.clone()
      , other => other.to_string()
    }
}
