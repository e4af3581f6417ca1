//! Scalar type coercion
//!
//! The boolean-string rule is deliberately permissive: any string not in the
//! explicit falsy set resolves to `true`, typos included. Callers depend on
//! that default, so it must not be tightened.

use serde_yaml::Value;

use crate::error::ConfigError;

/// The closed set of primitive types a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Int,
    Str,
    Bool,
}

/// Convert a string to a boolean.
///
/// Lower-cases the input; `"false"`, `"no"`, `"n"`, `"off"` and `"0"` are
/// `false`, everything else is `true`. Total over strings, never fails.
pub fn string_to_bool(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "no" | "n" | "off" | "0")
}

/// Coerce a YAML scalar to a boolean.
///
/// An actual boolean passes through untouched; strings go through
/// [`string_to_bool`]; anything else is rejected.
pub(crate) fn value_to_bool(parameter: &str, value: &Value) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => Ok(string_to_bool(s)),
        other => Err(ConfigError::value(
            parameter,
            format!("expected a boolean or string, got {}", describe(other)),
        )),
    }
}

/// Coerce a YAML scalar to an integer.
pub(crate) fn value_to_int(parameter: &str, value: &Value) -> Result<i64, ConfigError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            ConfigError::value(parameter, format!("'{n}' is not an integer"))
        }),
        Value::String(s) => s.parse::<i64>().map_err(|_| {
            ConfigError::value(parameter, format!("'{s}' is not a valid integer"))
        }),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(ConfigError::value(
            parameter,
            format!("expected an integer, got {}", describe(other)),
        )),
    }
}

/// Render a YAML scalar as a string.
pub(crate) fn value_to_string(parameter: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigError::value(
            parameter,
            format!("expected a scalar, got {}", describe(other)),
        )),
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_strings_are_false() {
        for s in ["false", "False", "FALSE", "no", "N", "n", "off", "OFF", "0"] {
            assert!(!string_to_bool(s), "'{s}' should be false");
        }
    }

    #[test]
    fn everything_else_is_true() {
        for s in ["true", "yes", "1", "banana", "", "nope?"] {
            assert!(string_to_bool(s), "'{s}' should be true");
        }
    }

    #[test]
    fn bool_coercion_passes_booleans_through() {
        assert!(value_to_bool("p", &Value::Bool(true)).expect("bool"));
        assert!(!value_to_bool("p", &Value::Bool(false)).expect("bool"));
    }

    #[test]
    fn bool_coercion_rejects_numbers() {
        assert!(value_to_bool("p", &Value::Number(5.into())).is_err());
    }

    #[test]
    fn int_coercion_parses_strings() {
        assert_eq!(value_to_int("p", &Value::String("42".into())).expect("int"), 42);
        assert!(value_to_int("p", &Value::String("banana".into())).is_err());
    }

    #[test]
    fn string_coercion_renders_scalars() {
        assert_eq!(value_to_string("p", &Value::Number(7.into())).expect("str"), "7");
        assert_eq!(value_to_string("p", &Value::Bool(true)).expect("str"), "true");
        assert!(value_to_string("p", &Value::Sequence(vec![])).is_err());
    }
}
