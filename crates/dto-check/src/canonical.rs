//! Canonical serialized form.
//!
//! Pretty-printed JSON with object keys sorted and null-valued properties
//! omitted. Two canonical strings are compared byte for byte, so key order
//! must not depend on insertion order or on serde_json's `preserve_order`
//! feature being enabled somewhere in the dependency graph.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Formatting options for the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalFormat {
    indent: usize,
}

impl Default for CanonicalFormat {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl CanonicalFormat {
    #[must_use]
    pub const fn new(indent: usize) -> Self {
        Self { indent }
    }

    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Encode `value` in canonical form.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be written.
    pub fn encode(&self, value: &Value) -> Result<String, serde_json::Error> {
        let normalized = normalize(value);
        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        normalized.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Drop null-valued properties and sort object keys, recursively.
///
/// Nulls inside arrays are kept: they are elements, not absent properties.
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> =
                map.iter().filter(|(_, v)| !v.is_null()).collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, inner) in entries {
                out.insert(key.clone(), normalize(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        other => other.clone(),
    }
}

/// Describe where two encodings first diverge, by line.
#[must_use]
pub fn first_difference(expected: &str, actual: &str) -> String {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (Some(e), Some(a)) => {
                return format!("line {line}: expected `{}`, found `{}`", e.trim(), a.trim());
            }
            (Some(e), None) => return format!("line {line}: expected `{}`, found end", e.trim()),
            (None, Some(a)) => return format!("line {line}: expected end, found `{}`", a.trim()),
            (None, None) => return "identical".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn null_properties_are_omitted() {
        let encoded = CanonicalFormat::default()
            .encode(&json!({"id": "ord-1", "notes": null}))
            .unwrap();
        assert_eq!(encoded, "{\n  \"id\": \"ord-1\"\n}");
    }

    #[test]
    fn keys_are_sorted_at_every_level() {
        let encoded = CanonicalFormat::default()
            .encode(&json!({"b": {"z": 1, "a": 2}, "a": [ {"y": 1, "x": null} ]}))
            .unwrap();
        let expected = r#"{
  "a": [
    {
      "y": 1
    }
  ],
  "b": {
    "a": 2,
    "z": 1
  }
}"#;
        assert_eq!(encoded, expected);
    }

    #[test]
    fn array_nulls_are_kept() {
        let value = normalize(&json!({"slots": [1, null, 3]}));
        assert_eq!(value, json!({"slots": [1, null, 3]}));
    }

    #[rstest]
    #[case(0, "{\n\"a\": 1\n}")]
    #[case(2, "{\n  \"a\": 1\n}")]
    #[case(4, "{\n    \"a\": 1\n}")]
    fn indent_is_configurable(#[case] indent: usize, #[case] expected: &str) {
        let encoded = CanonicalFormat::new(indent).encode(&json!({"a": 1})).unwrap();
        assert_eq!(encoded, expected);
    }

    #[rstest]
    #[case("a\nb", "a\nb", "identical")]
    #[case("a\nb", "a\nc", "line 2: expected `b`, found `c`")]
    #[case("a\nb", "a", "line 2: expected `b`, found end")]
    #[case("a", "a\n  c", "line 2: expected end, found `c`")]
    fn first_difference_reports_line(
        #[case] expected: &str,
        #[case] actual: &str,
        #[case] report: &str,
    ) {
        assert_eq!(first_difference(expected, actual), report);
    }
}
