//! Declarative schemas for model input and output records.
//!
//! A [`Schema`] describes the JSON shape a flow expects back from the model.
//! The same value is rendered into the `responseSchema` sent with the request
//! and used to check the answer, so the two can never drift apart. Checking
//! walks the whole document and reports every violated field instead of
//! stopping at the first one.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::color::is_hex_color;
use crate::error::{BrandError, Result};
use crate::media::DataUri;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path of the field, e.g. `brandInfo.colorPalette[2]`.
    pub field: String,
    /// Why the field was rejected.
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Structural checks for typed input records.
pub trait Validate {
    /// Returns every violated field; empty when the record is well-formed.
    fn violations(&self) -> Vec<Violation>;
}

/// Fails with `INVALID_INPUT` when `input` has any violations.
pub fn validate_input<T: Validate>(flow: &str, input: &T) -> Result<()> {
    let violations = input.violations();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(BrandError::invalid_input(flow, violations))
    }
}

/// Records a violation when `value` is blank.
pub fn require_text(field: &str, value: &str, out: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        out.push(Violation::new(field, "must not be empty"));
    }
}

/// Records a violation when `value` is not a `#RRGGBB` color.
pub fn require_hex_color(field: &str, value: &str, out: &mut Vec<Violation>) {
    if !is_hex_color(value) {
        out.push(Violation::new(
            field,
            format!("{:?} is not a #RRGGBB hex color", value),
        ));
    }
}

/// Records a violation when `value` is not a base64 data URI.
pub fn require_data_uri(field: &str, value: &str, out: &mut Vec<Violation>) {
    if let Err(e) = DataUri::parse(value) {
        out.push(Violation::new(field, e.message));
    }
}

/// JSON shape of a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Any string, possibly empty.
    String,
    /// A string with at least one non-whitespace character.
    Text,
    /// A `#RRGGBB` color string.
    HexColor,
    /// One of a fixed set of strings.
    Enum(&'static [&'static str]),
    /// A list of items with inclusive length bounds.
    Array {
        items: Box<Schema>,
        min_items: usize,
        max_items: Option<usize>,
    },
    /// An object whose listed fields are all required and no others allowed.
    Object(Vec<(&'static str, Schema)>),
}

impl Schema {
    /// Shorthand for an array schema.
    pub fn array(items: Schema, min_items: usize, max_items: Option<usize>) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items,
            max_items,
        }
    }

    /// Renders the schema in the OpenAPI subset accepted as `responseSchema`.
    pub fn to_json(&self) -> Value {
        match self {
            Schema::String | Schema::Text => json!({ "type": "STRING" }),
            Schema::HexColor => json!({
                "type": "STRING",
                "description": "6-digit hex color code such as #RRGGBB",
            }),
            Schema::Enum(values) => json!({
                "type": "STRING",
                "format": "enum",
                "enum": values,
            }),
            Schema::Array {
                items,
                min_items,
                max_items,
            } => {
                let mut out = Map::new();
                out.insert("type".into(), json!("ARRAY"));
                out.insert("items".into(), items.to_json());
                if *min_items > 0 {
                    out.insert("minItems".into(), json!(min_items));
                }
                if let Some(max) = max_items {
                    out.insert("maxItems".into(), json!(max));
                }
                Value::Object(out)
            }
            Schema::Object(fields) => {
                let properties: Map<String, Value> = fields
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_json()))
                    .collect();
                let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
                json!({
                    "type": "OBJECT",
                    "properties": properties,
                    "required": required,
                })
            }
        }
    }

    /// Checks `value` and returns every violation found.
    pub fn check(&self, value: &Value) -> Vec<Violation> {
        let mut out = Vec::new();
        self.check_at("$", value, &mut out);
        out
    }

    fn check_at(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        match self {
            Schema::String => {
                if !value.is_string() {
                    out.push(type_violation(path, "string", value));
                }
            }
            Schema::Text => match value.as_str() {
                Some(s) if s.trim().is_empty() => {
                    out.push(Violation::new(path, "must not be empty"))
                }
                Some(_) => {}
                None => out.push(type_violation(path, "string", value)),
            },
            Schema::HexColor => match value.as_str() {
                Some(s) => require_hex_color(path, s, out),
                None => out.push(type_violation(path, "string", value)),
            },
            Schema::Enum(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|a| *a == s) => {}
                Some(s) => out.push(Violation::new(
                    path,
                    format!("{:?} is not one of: {}", s, allowed.join(", ")),
                )),
                None => out.push(type_violation(path, "string", value)),
            },
            Schema::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(list) = value.as_array() else {
                    out.push(type_violation(path, "array", value));
                    return;
                };
                if list.len() < *min_items {
                    out.push(Violation::new(
                        path,
                        format!("expected at least {} items, got {}", min_items, list.len()),
                    ));
                }
                if let Some(max) = max_items {
                    if list.len() > *max {
                        out.push(Violation::new(
                            path,
                            format!("expected at most {} items, got {}", max, list.len()),
                        ));
                    }
                }
                for (i, item) in list.iter().enumerate() {
                    items.check_at(&format!("{}[{}]", path, i), item, out);
                }
            }
            Schema::Object(fields) => {
                let Some(map) = value.as_object() else {
                    out.push(type_violation(path, "object", value));
                    return;
                };
                for (name, schema) in fields {
                    let child = child_path(path, name);
                    match map.get(*name) {
                        Some(v) => schema.check_at(&child, v, out),
                        None => out.push(Violation::new(child, "missing required field")),
                    }
                }
                for key in map.keys() {
                    if !fields.iter().any(|(name, _)| name == key) {
                        out.push(Violation::new(child_path(path, key), "unexpected field"));
                    }
                }
            }
        }
    }

    /// Parses model text, validates it and deserializes the typed record.
    ///
    /// Nothing is returned unless the whole document passes, so callers never
    /// see a partially populated record.
    pub fn decode<T: DeserializeOwned>(&self, flow: &str, text: &str) -> Result<T> {
        let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
            BrandError::schema_mismatch(
                flow,
                vec![Violation::new("$", format!("response is not JSON: {}", e))],
            )
        })?;

        let violations = self.check(&value);
        if !violations.is_empty() {
            return Err(BrandError::schema_mismatch(flow, violations));
        }

        serde_json::from_value(value).map_err(|e| {
            BrandError::schema_mismatch(flow, vec![Violation::new("$", e.to_string())])
        })
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "$" {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn type_violation(path: &str, expected: &str, got: &Value) -> Violation {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Violation::new(path, format!("expected {}, got {}", expected, kind))
}

/// Models occasionally wrap JSON answers in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
