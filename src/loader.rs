//! Config file loading

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Read and parse the optional YAML configuration file.
///
/// No path means no file-sourced values; an empty or `null` document is
/// treated the same way. The document must otherwise be a mapping.
pub(crate) fn load_file(path: Option<&Path>) -> Result<Mapping, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("no config file given, using built-in defaults");
        return Ok(Mapping::new());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Value = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match raw {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        // serde_yaml happily parses bare scalars; only mappings make sense
        // as a configuration document.
        other => serde_yaml::from_value::<Mapping>(other).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_path_yields_empty_mapping() {
        let map = load_file(None).expect("load");
        assert!(map.is_empty());
    }

    #[test]
    fn empty_document_yields_empty_mapping() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "").expect("write");
        let map = load_file(Some(&path)).expect("load");
        assert!(map.is_empty());
    }

    #[test]
    fn null_document_yields_empty_mapping() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "~\n").expect("write");
        let map = load_file(Some(&path)).expect("load");
        assert!(map.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_file(Some(&tmp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "num_workers: [unclosed\n").expect("write");
        let err = load_file(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn scalar_document_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "just a string\n").expect("write");
        assert!(load_file(Some(&path)).is_err());
    }
}
