//! Static field schema tables and generic parameter collection.
//!
//! The per-resource field catalogs are pure configuration: each entry names
//! a JSON key and the kind of value it accepts. Operation handlers feed
//! caller-supplied parameter maps through [`collect_fields`] (for request
//! bodies) or [`collect_query`] (for list filters) instead of hand-copying
//! individual fields.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::resources::OperationError;

/// The kind of value a declared field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Bool,
    /// One of a fixed set of string values.
    Choice(&'static [&'static str]),
}

impl FieldKind {
    /// Returns `true` if `value` is acceptable for this kind.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Choice(options) => value
                .as_str()
                .is_some_and(|s| options.contains(&s)),
        }
    }

    /// Human-readable description used in validation errors.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Number => "a number",
            Self::Bool => "a boolean",
            Self::Choice(_) => "one of the listed values",
        }
    }
}

/// A declared field: its JSON key and the kind of value it accepts.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// The JSON key as sent to (or accepted from) the vendor.
    pub name: &'static str,
    /// The kind of value this field accepts.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Creates a new field spec.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Returns `true` if a supplied value should be treated as unset.
///
/// Empty strings come from cleared form fields and are skipped rather than
/// sent to the vendor.
fn is_unset(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty()) || value.is_null()
}

/// Collects declared fields from `params` into a JSON object.
///
/// Only keys present in `table` are considered; unset values (empty string
/// or null) are skipped; present values failing the field's kind predicate
/// are rejected.
///
/// # Errors
///
/// Returns [`OperationError::InvalidParameter`] for a present, non-empty
/// value the field kind does not accept.
pub fn collect_fields(
    table: &[FieldSpec],
    params: &Map<String, Value>,
) -> Result<Map<String, Value>, OperationError> {
    let mut out = Map::new();

    for spec in table {
        let Some(value) = params.get(spec.name) else {
            continue;
        };
        if is_unset(value) {
            continue;
        }
        if !spec.kind.accepts(value) {
            return Err(OperationError::InvalidParameter {
                name: spec.name,
                expected: spec.kind.expected(),
            });
        }
        out.insert(spec.name.to_string(), value.clone());
    }

    Ok(out)
}

/// Collects declared filter fields from `params` into a query-string map.
///
/// Scalar values are flattened to their string form the way they appear in
/// a URL; the same unset-skipping and kind validation as
/// [`collect_fields`] applies.
///
/// # Errors
///
/// Returns [`OperationError::InvalidParameter`] for a present, non-empty
/// value the field kind does not accept.
pub fn collect_query(
    table: &[FieldSpec],
    params: &Map<String, Value>,
) -> Result<BTreeMap<String, String>, OperationError> {
    let fields = collect_fields(table, params)?;
    let mut out = BTreeMap::new();

    for (key, value) in fields {
        let flat = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        out.insert(key, flat);
    }

    Ok(out)
}

/// Fetches a required string parameter.
///
/// # Errors
///
/// Returns [`OperationError::MissingParameter`] when absent or empty, and
/// [`OperationError::InvalidParameter`] when present but not a string.
pub fn require_str<'a>(
    params: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, OperationError> {
    match params.get(name) {
        None | Some(Value::Null) => Err(OperationError::MissingParameter { name }),
        Some(Value::String(s)) if s.is_empty() => Err(OperationError::MissingParameter { name }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(OperationError::InvalidParameter {
            name,
            expected: "a string",
        }),
    }
}

/// Fetches an optional boolean parameter, defaulting to `false`.
#[must_use]
pub fn optional_bool(params: &Map<String, Value>, name: &str) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Fetches the `getMany` page limit, validating the vendor's 1..=500 range.
///
/// # Errors
///
/// Returns [`OperationError::InvalidParameter`] when the supplied limit is
/// not a number in range.
pub fn page_limit(params: &Map<String, Value>) -> Result<u32, OperationError> {
    const DEFAULT_LIMIT: u32 = 50;

    match params.get("limit") {
        None | Some(Value::Null) => Ok(DEFAULT_LIMIT),
        Some(value) => {
            let limit = value.as_u64().and_then(|n| u32::try_from(n).ok());
            match limit {
                Some(limit) if (1..=500).contains(&limit) => Ok(limit),
                _ => Err(OperationError::InvalidParameter {
                    name: "limit",
                    expected: "a number between 1 and 500",
                }),
            }
        }
    }
}

/// Returns the object stored under `name`, or an empty map when absent.
#[must_use]
pub fn object_param(params: &Map<String, Value>, name: &str) -> Map<String, Value> {
    params
        .get(name)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
