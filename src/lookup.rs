//! Ad-hoc typed lookups
//!
//! [`Lookup`] retrieves keys the registry does not model: an optional
//! environment variable first, then an attribute on the settings object
//! (optionally scoped under a `root` mapping), then a caller default.

use std::fmt::Display;

use serde_yaml::Value;

use crate::coerce::{describe, value_to_bool, value_to_int, value_to_string};
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// A pending retrieval of one parameter.
///
/// Built by [`Config::get`]; consumed by one of the typed accessors, which
/// correspond to the closed [`ParameterType`](crate::ParameterType) set, or
/// by [`Lookup::parse_with`] for caller-supplied constructors.
///
/// ```no_run
/// # let config = brigade_config::Config::load(None)?;
/// let port = config.get("port").env("MY_PORT").default(8080).as_int()?;
/// let name = config.get("key").root("section").default("fallback").as_str()?;
/// # Ok::<(), brigade_config::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Lookup<'a> {
    config: &'a Config,
    parameter: &'a str,
    env: Option<&'a str>,
    root: Option<&'a str>,
    default: Option<Value>,
}

impl<'a> Lookup<'a> {
    pub(crate) fn new(config: &'a Config, parameter: &'a str) -> Self {
        Lookup {
            config,
            parameter,
            env: None,
            root: None,
            default: None,
        }
    }

    /// Consult this environment variable first; when set, its raw string
    /// value wins over attributes and the default.
    pub fn env(mut self, name: &'a str) -> Self {
        self.env = Some(name);
        self
    }

    /// Look the parameter up inside the attribute named `root`, treated as a
    /// mapping. An absent root behaves like an empty mapping.
    pub fn root(mut self, name: &'a str) -> Self {
        self.root = Some(name);
        self
    }

    /// Fallback when neither the environment nor an attribute supplies a
    /// value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Resolve and coerce to an integer.
    pub fn as_int(self) -> Result<i64> {
        let parameter = self.parameter;
        let value = self.resolve()?;
        value_to_int(parameter, &value)
    }

    /// Resolve and coerce to a string.
    pub fn as_str(self) -> Result<String> {
        let parameter = self.parameter;
        let value = self.resolve()?;
        value_to_string(parameter, &value)
    }

    /// Resolve and coerce to a boolean.
    ///
    /// An actual boolean is returned as-is; strings go through the
    /// permissive [`string_to_bool`](crate::string_to_bool) rule, so
    /// unrecognized values come back `true` rather than failing.
    pub fn as_bool(self) -> Result<bool> {
        let parameter = self.parameter;
        let value = self.resolve()?;
        value_to_bool(parameter, &value)
    }

    /// Resolve and run a caller-supplied constructor over the value rendered
    /// as a string.
    pub fn parse_with<T, E: Display>(
        self,
        parse: impl FnOnce(&str) -> std::result::Result<T, E>,
    ) -> Result<T> {
        let parameter = self.parameter;
        let value = self.resolve()?;
        let raw = value_to_string(parameter, &value)?;
        parse(&raw).map_err(|e| ConfigError::value(parameter, e.to_string()))
    }

    /// Resolution order: environment variable, then root-scoped or direct
    /// attribute, then the default. Never touches resolver state.
    fn resolve(self) -> Result<Value> {
        if let Some(var) = self.env {
            if let Ok(raw) = std::env::var(var) {
                return Ok(Value::String(raw));
            }
        }

        let found = match self.root {
            Some(root) => match self.config.attribute(root) {
                Some(Value::Mapping(section)) => section.get(self.parameter).cloned(),
                Some(other) => {
                    return Err(ConfigError::value(
                        root,
                        format!("expected a mapping, got {}", describe(&other)),
                    ));
                }
                None => None,
            },
            None => self.config.attribute(self.parameter),
        };

        found
            .or(self.default)
            .ok_or_else(|| ConfigError::NotFound(self.parameter.to_string()))
    }
}
