//! Parameter schemas and schema-driven coercion.
//!
//! Decision-makers tend to send `"10"` where `10` is meant. Coercion walks
//! the JSON schema of an action and converts such scalars before the
//! parameters are deserialized, while still rejecting input whose shape does
//! not fit the schema.

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde_json::{Map, Number, Value};

use pagepilot_protocols::{ActionError, RegistryError};

/// JSON schema (draft-07, subschemas inlined) of an action's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    schema: Value,
}

impl ParamSchema {
    /// Derive the schema of a parameter type.
    pub fn for_type<T: JsonSchema>() -> Self {
        let root = SchemaSettings::draft07()
            .with(|s| {
                s.inline_subschemas = true;
                s.option_add_null_type = false;
            })
            .into_generator()
            .into_root_schema_for::<T>();

        let mut schema = serde_json::to_value(&root)
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}));
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
        }
        Self { schema }
    }

    /// Wrap a hand-written schema. The root must describe an object.
    pub fn from_value(action: &str, schema: Value) -> Result<Self, RegistryError> {
        let invalid = |message: &str| RegistryError::InvalidSchema {
            name: action.to_string(),
            message: message.to_string(),
        };

        let obj = schema
            .as_object()
            .ok_or_else(|| invalid("schema must be a JSON object"))?;
        match obj.get("type") {
            None => {}
            Some(Value::String(ty)) if ty == "object" => {}
            Some(_) => return Err(invalid("root type must be \"object\"")),
        }
        if obj.get("properties").is_some_and(|p| !p.is_object()) {
            return Err(invalid("\"properties\" must be an object"));
        }

        Ok(Self { schema })
    }

    /// Schema with no parameters.
    pub fn empty() -> Self {
        Self {
            schema: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.schema
    }

    pub fn into_value(self) -> Value {
        self.schema
    }

    /// Whether the schema declares any parameter.
    pub fn has_properties(&self) -> bool {
        self.schema
            .get("properties")
            .and_then(Value::as_object)
            .is_some_and(|p| !p.is_empty())
    }

    /// Coerce raw parameters to the schema.
    ///
    /// Null becomes `{}`. Actions without parameters accept and discard any
    /// input. Numeric and boolean fields accept their string spelling;
    /// anything else that does not match the declared type is an
    /// [`ActionError::InvalidParameters`].
    pub fn coerce(&self, raw: &Value) -> Result<Value, ActionError> {
        match raw {
            Value::Null => Ok(Value::Object(Map::new())),
            Value::Object(map) => coerce_object(&self.schema, map, ""),
            _ if !self.has_properties() => Ok(Value::Object(Map::new())),
            other => Err(ActionError::InvalidParameters(format!(
                "expected an object, got {}",
                type_name(other)
            ))),
        }
    }
}

fn coerce_object(schema: &Value, map: &Map<String, Value>, path: &str) -> Result<Value, ActionError> {
    let properties = schema.get("properties").and_then(Value::as_object);
    let mut out = Map::with_capacity(map.len());

    for (key, value) in map {
        let coerced = match properties.and_then(|p| p.get(key)) {
            Some(prop) if !value.is_null() => coerce_value(prop, value, &join(path, key))?,
            // Unknown keys are left for the deserializer to ignore.
            _ => value.clone(),
        };
        out.insert(key.clone(), coerced);
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if out.get(name).is_none_or(Value::is_null) {
                return Err(ActionError::InvalidParameters(format!(
                    "missing field `{}`",
                    join(path, name)
                )));
            }
        }
    }

    Ok(Value::Object(out))
}

fn coerce_value(schema: &Value, value: &Value, path: &str) -> Result<Value, ActionError> {
    let types = schema_types(schema);
    if types.is_empty() {
        return Ok(value.clone());
    }

    for ty in &types {
        if let Some(converted) = convert(ty, schema, value, path)? {
            return Ok(converted);
        }
    }

    Err(ActionError::InvalidParameters(format!(
        "field `{}`: expected {}, got {}",
        path,
        types.join(" or "),
        type_name(value)
    )))
}

fn convert(ty: &str, schema: &Value, value: &Value, path: &str) -> Result<Option<Value>, ActionError> {
    let converted = match (ty, value) {
        ("string", Value::String(_)) | ("boolean", Value::Bool(_)) | ("number", Value::Number(_)) => {
            Some(value.clone())
        }
        ("null", Value::Null) => Some(Value::Null),
        ("boolean", Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        ("integer", Value::Number(n)) => integer_from_number(n),
        ("integer", Value::String(s)) => parse_integer(s.trim()),
        ("number", Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ("object", Value::Object(map)) => Some(coerce_object(schema, map, path)?),
        ("array", Value::Array(items)) => Some(coerce_array(schema, items, path)?),
        _ => None,
    };
    Ok(converted)
}

fn coerce_array(schema: &Value, items: &[Value], path: &str) -> Result<Value, ActionError> {
    let Some(item_schema) = schema.get("items").filter(|s| s.is_object()) else {
        return Ok(Value::Array(items.to_vec()));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| coerce_value(item_schema, item, &format!("{}[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn integer_from_number(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then(|| Value::from(f as i64))
}

fn parse_integer(s: &str) -> Option<Value> {
    s.parse::<i64>()
        .map(Value::from)
        .or_else(|_| s.parse::<u64>().map(Value::from))
        .ok()
}

fn schema_types(schema: &Value) -> Vec<&str> {
    match schema.get("type") {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
