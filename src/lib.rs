//! brigade-config: Layered configuration for the Brigade framework
//!
//! Resolves settings from three sources with fixed precedence
//! (environment variables > YAML file > built-in defaults), with explicit
//! caller overrides winning over everything. Unregistered keys found in the
//! file are kept verbatim in a side-table, and [`Config::get`] offers typed
//! ad-hoc lookups for keys outside the registry.
//!
//! ```no_run
//! use brigade_config::Config;
//!
//! let config = Config::load(None)?;
//! assert_eq!(config.num_workers, 20);
//!
//! let port = config.get("port").env("MY_PORT").default(8080).as_int()?;
//! # Ok::<(), brigade_config::ConfigError>(())
//! ```

mod coerce;
mod config;
mod error;
mod loader;
mod lookup;
mod registry;

pub use coerce::{string_to_bool, ParameterType};
pub use config::Config;
pub use error::{ConfigError, Result};
pub use lookup::Lookup;
pub use registry::{ParameterSpec, PARAMETERS};
