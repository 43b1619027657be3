//! Settings for the `write` command.
//!
//! Layered lowest to highest: defaults, an optional JSON file, the
//! environment, then command-line flags.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tryscope_core::{Error, Result, ResultExt};

/// Default name of the file `write` appends to
pub const DEFAULT_FILE_NAME: &str = "tryScope.txt";

/// Default timestamp prefix, day first with a 12-hour clock
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M:%S";

/// Environment variable overriding `output_dir`
pub const OUTPUT_DIR_VAR: &str = "TRYSCOPE_OUTPUT_DIR";

/// Environment variable overriding `file_name`
pub const FILE_NAME_VAR: &str = "TRYSCOPE_FILE_NAME";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Directory the output file lives in
    pub output_dir: PathBuf,
    /// Name of the output file
    pub file_name: String,
    /// chrono format string for the line prefix
    pub timestamp_format: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl DemoConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read config", e))?;
        Self::from_json(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(Error::from)
    }

    /// Apply overrides from `lookup`, normally [`std::env::var`].
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(dir) = lookup(OUTPUT_DIR_VAR) {
            tracing::debug!(var = OUTPUT_DIR_VAR, value = %dir, "config_env_override");
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(FILE_NAME_VAR) {
            tracing::debug!(var = FILE_NAME_VAR, value = %name, "config_env_override");
            self.file_name = name;
        }
    }

    /// Apply command-line flags, which win over everything else.
    #[must_use]
    pub fn with_overrides(mut self, output_dir: Option<PathBuf>, file_name: Option<String>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(name) = file_name {
            self.file_name = name;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(Error::configuration("file_name must not be empty"));
        }
        if self.file_name.contains(['/', '\\']) {
            return Err(Error::configuration(format!(
                "file_name '{}' must not contain a path separator",
                self.file_name
            )));
        }
        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::configuration(format!(
                "invalid timestamp_format '{}'",
                self.timestamp_format
            )));
        }
        Ok(())
    }

    /// Full path of the file `write` appends to
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

fn default_output_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.file_name, "tryScope.txt");
        assert_eq!(config.timestamp_format, "%d/%m/%Y %I:%M:%S");
        assert!(config.output_path().ends_with("tryScope.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DemoConfig::from_json(r#"{ "file_name": "notes.txt" }"#).unwrap();
        assert_eq!(config.file_name, "notes.txt");
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_unknown_key_is_json_error_with_source() {
        let err = DemoConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().contains("colour"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_env_overrides_file_and_flags_override_env() {
        let vars: HashMap<&str, &str> = [(OUTPUT_DIR_VAR, "/srv/out"), (FILE_NAME_VAR, "")]
            .into_iter()
            .collect();

        let mut config = DemoConfig::from_json(r#"{ "file_name": "from-file.txt" }"#).unwrap();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.file_name, "from-file.txt");

        let config = config.with_overrides(None, Some("flag.txt".to_string()));
        assert_eq!(config.output_path(), PathBuf::from("/srv/out/flag.txt"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DemoConfig::default();
        config.file_name = "nested/file.txt".to_string();
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.timestamp_format = "%Q".to_string();
        assert!(config.validate().is_err());
    }
}
