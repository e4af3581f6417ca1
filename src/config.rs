//! The resolved settings object
//!
//! One typed field per registered parameter, resolved with fixed precedence
//! (environment > file > default), plus a side-table for unregistered keys
//! arriving from the file or from caller overrides. Immutable once built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::coerce::{value_to_bool, value_to_int, value_to_string};
use crate::error::{ConfigError, Result};
use crate::loader::load_file;
use crate::lookup::Lookup;
use crate::registry::{is_registered, spec, ParameterSpec};

/// Resolved Brigade configuration.
///
/// Construct once at startup with [`Config::load`]; callers read fields
/// directly. Unregistered keys from the file and caller overrides live in
/// the `extras` side-table, reachable through [`Config::extra`] and
/// [`Config::get`].
///
/// Serializes to the same flat mapping the file format uses, so a dumped
/// configuration loads back unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Number of worker processes run at the same time.
    pub num_workers: usize,
    /// Raise an error when at least one host failed.
    pub raise_on_error: bool,
    /// Path to the user's ssh config file.
    pub ssh_config_file: String,
    /// Unregistered keys from the file and caller overrides, verbatim.
    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,
}

fn default_num_workers() -> usize {
    20
}

fn default_raise_on_error() -> bool {
    true
}

fn default_ssh_config_file() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".ssh")
        .join("config")
        .to_string_lossy()
        .into_owned()
}

impl Config {
    /// Load configuration from an optional YAML file, the environment, and
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(path, BTreeMap::new())
    }

    /// Like [`Config::load`], with explicit overrides applied last.
    ///
    /// Overrides win over every other source. One naming a registered
    /// parameter must carry a value of that parameter's declared type; any
    /// other key lands in `extras` verbatim.
    pub fn load_with_overrides(
        path: Option<&Path>,
        overrides: BTreeMap<String, Value>,
    ) -> Result<Self> {
        let data = load_file(path)?;

        let mut config = Config {
            num_workers: resolve(spec("num_workers"), &data)?.unwrap_or_else(default_num_workers),
            raise_on_error: resolve(spec("raise_on_error"), &data)?
                .unwrap_or_else(default_raise_on_error),
            ssh_config_file: resolve(spec("ssh_config_file"), &data)?
                .unwrap_or_else(default_ssh_config_file),
            extras: BTreeMap::new(),
        };

        for (key, value) in &data {
            let Value::String(key) = key else {
                return Err(ConfigError::value(
                    "config file",
                    "mapping keys must be strings",
                ));
            };
            if !is_registered(key) {
                config.extras.insert(key.clone(), value.clone());
            }
        }

        for (key, value) in overrides {
            config.apply_override(&key, value)?;
        }

        Ok(config)
    }

    /// Start an ad-hoc lookup for a key outside the registry.
    ///
    /// See [`Lookup`] for the resolution and coercion rules.
    pub fn get<'a>(&'a self, parameter: &'a str) -> Lookup<'a> {
        Lookup::new(self, parameter)
    }

    /// An unregistered key from the file or from overrides, if present.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Any attribute-style value by name: registered fields first, then the
    /// side-table.
    pub(crate) fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "num_workers" => Some(Value::Number((self.num_workers as u64).into())),
            "raise_on_error" => Some(Value::Bool(self.raise_on_error)),
            "ssh_config_file" => Some(Value::String(self.ssh_config_file.clone())),
            _ => self.extras.get(name).cloned(),
        }
    }

    fn apply_override(&mut self, key: &str, value: Value) -> Result<()> {
        debug!(key, "applying explicit override");
        match key {
            "num_workers" => {
                self.num_workers =
                    usize::try_from(value_to_int(key, &value)?).map_err(|_| {
                        ConfigError::value(key, "worker count must be non-negative")
                    })?;
            }
            "raise_on_error" => self.raise_on_error = value_to_bool(key, &value)?,
            "ssh_config_file" => self.ssh_config_file = value_to_string(key, &value)?,
            _ => {
                self.extras.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}

/// Resolve one registered parameter from the environment or the file.
///
/// `Ok(None)` means neither source supplied a value and the default applies.
/// Environment values arrive as strings and run through the same scalar
/// coercions as file values, so `BRIGADE_RAISE_ON_ERROR=no` and a file
/// `raise_on_error: "no"` behave identically.
fn resolve<T: TryFromValue>(spec: &ParameterSpec, data: &Mapping) -> Result<Option<T>> {
    let var = spec.env_var();
    if let Ok(raw) = std::env::var(&var) {
        debug!(parameter = spec.name, env = %var, "environment override");
        return T::try_from_value(spec.name, &Value::String(raw)).map(Some);
    }
    match data.get(spec.name) {
        Some(value) => T::try_from_value(spec.name, value).map(Some),
        None => Ok(None),
    }
}

/// File-sourced scalar to typed field conversion.
pub(crate) trait TryFromValue: Sized {
    fn try_from_value(parameter: &str, value: &Value) -> Result<Self>;
}

impl TryFromValue for usize {
    fn try_from_value(parameter: &str, value: &Value) -> Result<Self> {
        let n = value_to_int(parameter, value)?;
        usize::try_from(n)
            .map_err(|_| ConfigError::value(parameter, format!("'{n}' must be non-negative")))
    }
}

impl TryFromValue for bool {
    fn try_from_value(parameter: &str, value: &Value) -> Result<Self> {
        value_to_bool(parameter, value)
    }
}

impl TryFromValue for String {
    fn try_from_value(parameter: &str, value: &Value) -> Result<Self> {
        value_to_string(parameter, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        // Env-dependent paths are covered in the integration tests, which
        // serialize access to the process environment.
        let config = Config::load(None).expect("load");
        assert_eq!(config.num_workers, 20);
        assert!(config.raise_on_error);
        assert!(config.ssh_config_file.ends_with("config"));
        assert!(config.extras.is_empty());
    }

    #[test]
    fn ssh_config_default_is_home_relative() {
        let default = default_ssh_config_file();
        assert!(default.contains(".ssh"));
        assert!(!default.starts_with("~/") || dirs::home_dir().is_none());
    }

    #[test]
    fn attribute_reaches_registered_fields_and_extras() {
        let mut config = Config::load(None).expect("load");
        config.extras.insert("custom".into(), Value::String("x".into()));
        assert_eq!(config.attribute("num_workers"), Some(Value::Number(20.into())));
        assert_eq!(config.attribute("custom"), Some(Value::String("x".into())));
        assert_eq!(config.attribute("missing"), None);
    }

    #[test]
    fn override_of_registered_parameter_is_typed() {
        let mut overrides = BTreeMap::new();
        overrides.insert("num_workers".to_string(), Value::Number(50.into()));
        let config = Config::load_with_overrides(None, overrides).expect("load");
        assert_eq!(config.num_workers, 50);
    }

    #[test]
    fn override_with_wrong_type_fails() {
        let mut overrides = BTreeMap::new();
        overrides.insert("num_workers".to_string(), Value::Sequence(vec![]));
        assert!(Config::load_with_overrides(None, overrides).is_err());
    }

    #[test]
    fn override_of_unregistered_key_is_verbatim() {
        let mut overrides = BTreeMap::new();
        overrides.insert("foo".to_string(), Value::Number(2.into()));
        let config = Config::load_with_overrides(None, overrides).expect("load");
        assert_eq!(config.extra("foo"), Some(&Value::Number(2.into())));
    }
}
