//! Conversion from `serde_json` values into configuration trees.

use serde_json::{Map, Value};

use super::{ConfigValue, Tree};
use crate::{UnicastError, UnicastResult};

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

/// Text of a scalar JSON value; `null` renders as the empty string.
fn scalar_text(value: Value) -> Result<String, Value> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.to_string()),
        Value::String(text) => Ok(text),
        other @ (Value::Array(_) | Value::Object(_)) => Err(other),
    }
}

fn convert_object(map: Map<String, Value>, path: &str) -> Result<Tree, UnicastError> {
    let mut tree = Tree::new();
    for (key, child) in map {
        let converted = convert(child, &child_path(path, &key))?;
        tree.insert(key, converted);
    }
    Ok(tree)
}

fn convert(value: Value, path: &str) -> Result<ConfigValue, UnicastError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                scalar_text(item).map_err(|rejected| UnicastError::UnsupportedValue {
                    path: format!("{path}[{index}]"),
                    expected: "scalar list item",
                    found: json_kind(&rejected),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::List),
        Value::Object(map) => convert_object(map, path).map(ConfigValue::Tree),
        scalar => scalar_text(scalar)
            .map(ConfigValue::Scalar)
            .map_err(|rejected| UnicastError::UnsupportedValue {
                path: path.to_owned(),
                expected: "scalar",
                found: json_kind(&rejected),
            }),
    }
}

impl TryFrom<Value> for ConfigValue {
    type Error = UnicastError;

    /// Strings pass through, numbers and booleans are stringified, `null`
    /// becomes the empty scalar, arrays must hold only scalars and objects
    /// become nested trees.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        convert(value, "")
    }
}

impl Tree {
    /// Convert a JSON object into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`UnicastError::UnsupportedValue`] when `value` is not an
    /// object or contains a list with nested arrays or objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicast_config::{ConfigValue, Tree};
    /// use serde_json::json;
    ///
    /// let tree = Tree::try_from_json(json!({"node.master": true, "hosts": ["a", 1]}))?;
    /// assert_eq!(tree.get("node.master"), Some(&ConfigValue::scalar("true")));
    /// assert_eq!(tree.get("hosts"), Some(&ConfigValue::list(["a", "1"])));
    /// # Ok::<_, std::sync::Arc<unicast_config::UnicastError>>(())
    /// ```
    pub fn try_from_json(value: Value) -> UnicastResult<Self> {
        match value {
            Value::Object(map) => Ok(convert_object(map, "")?),
            other => Err(UnicastError::UnsupportedValue {
                path: String::from("<root>"),
                expected: "object",
                found: json_kind(&other),
            }
            .into()),
        }
    }
}
