//! The registry of known configuration parameters
//!
//! Each entry carries the metadata needed to resolve one setting: its
//! declared type, the environment variable that may override it, and a
//! doc-friendly rendering of the default where the real default is computed
//! at runtime.

use once_cell::sync::Lazy;

use crate::coerce::ParameterType;

/// Static metadata for one registered configuration parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameter_type: ParameterType,
    /// Explicit environment variable name; `None` means the conventional
    /// `BRIGADE_<NAME>` is used.
    pub env: Option<&'static str>,
    /// Documentation-only rendering of the default, for defaults computed at
    /// runtime (e.g. home-relative paths).
    pub default_doc: Option<&'static str>,
}

impl ParameterSpec {
    /// The environment variable consulted for this parameter.
    pub fn env_var(&self) -> String {
        match self.env {
            Some(name) => name.to_string(),
            None => format!("BRIGADE_{}", self.name.to_uppercase()),
        }
    }
}

/// Every parameter the resolver knows about, in declaration order.
pub static PARAMETERS: Lazy<Vec<ParameterSpec>> = Lazy::new(|| {
    vec![
        ParameterSpec {
            name: "num_workers",
            description: "Number of Brigade worker processes run at the same time; \
                          can be overridden on individual tasks",
            parameter_type: ParameterType::Int,
            env: None,
            default_doc: None,
        },
        ParameterSpec {
            name: "raise_on_error",
            description: "If true, a run raises an error when at least one host failed",
            parameter_type: ParameterType::Bool,
            env: None,
            default_doc: None,
        },
        ParameterSpec {
            name: "ssh_config_file",
            description: "User ssh_config_file",
            parameter_type: ParameterType::Str,
            env: None,
            default_doc: Some("~/.ssh/config"),
        },
    ]
});

/// Whether `name` is a registered parameter.
pub(crate) fn is_registered(name: &str) -> bool {
    PARAMETERS.iter().any(|spec| spec.name == name)
}

/// The spec for a name known at compile time.
pub(crate) fn spec(name: &str) -> &'static ParameterSpec {
    PARAMETERS
        .iter()
        .find(|spec| spec.name == name)
        .expect("registered parameter")
}
