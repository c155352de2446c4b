use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "ICALLGEN_CONFIG";

/// Pointer file stored next to the default config; its contents name another config path
pub const POINTER_FILE_NAME: &str = ".icallgen_config_path";

pub const CONFIG_FILE_NAME: &str = "icallgen.toml";

/// Subdirectory of the output directory that receives binding files
pub const DEFAULT_OUTPUT_SUBDIR: &str = "pps";

pub const DEFAULT_FILE_EXTENSION: &str = "cs";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "output-subdir",
    "file-extension",
    "override-existing",
    "strict",
    "dedupe-delegates",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: {keys}", keys = CONFIG_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Persistent user configuration
///
/// Every field is optional; accessors fall back to built-in defaults and
/// command-line flags take precedence over both.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_subdir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_existing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedupe_delegates: Option<bool>,
}

impl Config {
    /// Resolved config file path
    ///
    /// Order: `ICALLGEN_CONFIG`, then the pointer file next to the default
    /// location, then the default location itself.
    pub fn path() -> PathBuf {
        resolve_path(std::env::var(CONFIG_ENV_VAR).ok(), &Self::default_path())
    }

    /// Platform default config path
    pub fn default_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir().map_or_else(
                || PathBuf::from(".config/icallgen").join(CONFIG_FILE_NAME),
                |h| h.join(".config").join("icallgen").join(CONFIG_FILE_NAME),
            )
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map_or_else(
                || PathBuf::from("icallgen").join(CONFIG_FILE_NAME),
                |c| c.join("icallgen").join(CONFIG_FILE_NAME),
            )
        }
    }

    /// Location of the pointer file used by `config path <new>`
    pub fn pointer_path() -> PathBuf {
        pointer_path_for(&Self::default_path())
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from a specific path; a missing file yields the default config
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "output-subdir" => self.output_subdir.clone(),
            "file-extension" => self.file_extension.clone(),
            "override-existing" => self.override_existing.map(|v| v.to_string()),
            "strict" => self.strict.map(|v| v.to_string()),
            "dedupe-delegates" => self.dedupe_delegates.map(|v| v.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "output-subdir" => self.output_subdir = Some(value.to_string()),
            "file-extension" => {
                self.file_extension = Some(value.trim_start_matches('.').to_string());
            }
            "override-existing" => self.override_existing = Some(parse_bool(key, value)?),
            "strict" => self.strict = Some(parse_bool(key, value)?),
            "dedupe-delegates" => self.dedupe_delegates = Some(parse_bool(key, value)?),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.output_subdir.is_none()
            && self.file_extension.is_none()
            && self.override_existing.is_none()
            && self.strict.is_none()
            && self.dedupe_delegates.is_none()
    }

    /// Explicitly set values, in key order
    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| match self.get(key) {
                Ok(Some(value)) => Some((*key, value)),
                _ => None,
            })
            .collect()
    }

    pub fn output_subdir(&self) -> &str {
        self.output_subdir.as_deref().unwrap_or(DEFAULT_OUTPUT_SUBDIR)
    }

    pub fn file_extension(&self) -> &str {
        self.file_extension.as_deref().unwrap_or(DEFAULT_FILE_EXTENSION)
    }

    pub fn override_existing(&self) -> bool {
        self.override_existing.unwrap_or(false)
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn dedupe_delegates(&self) -> bool {
        self.dedupe_delegates.unwrap_or(true)
    }
}

/// Write the pointer file so later runs resolve `new_path` as the config path
pub fn set_pointer(new_path: &str) -> Result<PathBuf, ConfigError> {
    let pointer = Config::pointer_path();
    if let Some(parent) = pointer.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&pointer, new_path.as_bytes())?;
    Ok(pointer)
}

/// Path named by the pointer file, if one is present and non-empty
pub fn read_pointer(default_path: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(pointer_path_for(default_path)).ok()?;
    let trimmed = contents.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn resolve_path(env_value: Option<String>, default_path: &Path) -> PathBuf {
    if let Some(env_path) = env_value {
        let trimmed = env_path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    read_pointer(default_path).unwrap_or_else(|| default_path.to_path_buf())
}

fn pointer_path_for(default_path: &Path) -> PathBuf {
    default_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(POINTER_FILE_NAME)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_empty());
        assert_eq!(config.output_subdir(), "pps");
        assert_eq!(config.file_extension(), "cs");
        assert!(!config.override_existing());
        assert!(!config.strict());
        assert!(config.dedupe_delegates());
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        assert!(config.set("output-subdir", "bindings").is_ok());
        assert!(config.set("file-extension", ".g.cs").is_ok());
        assert!(config.set("strict", "yes").is_ok());
        assert!(config.set("dedupe-delegates", "false").is_ok());

        assert_eq!(config.output_subdir(), "bindings");
        assert_eq!(config.file_extension(), "g.cs");
        assert!(config.strict());
        assert!(!config.dedupe_delegates());
        assert!(config.get("strict").is_ok_and(|v| v.as_deref() == Some("true")));
        assert!(config.get("override-existing").is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("cache-path", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(config.get("nope"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_invalid_bool() {
        let mut config = Config::default();
        let err = config.set("strict", "maybe");
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));
        assert!(config.strict.is_none());
    }

    #[test]
    fn test_values_iter_in_key_order() {
        let mut config = Config::default();
        assert!(config.set("strict", "true").is_ok());
        assert!(config.set("output-subdir", "gen").is_ok());
        assert_eq!(
            config.values_iter(),
            vec![
                ("output-subdir", "gen".to_string()),
                ("strict", "true".to_string())
            ]
        );
    }

    #[test]
    fn test_save_and_load() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("nested").join("icallgen.toml");

        let mut config = Config::default();
        assert!(config.set("override-existing", "true").is_ok());
        assert!(config.save_to(&path).is_ok());

        let loaded = Config::load_from(&path);
        assert!(loaded.is_ok_and(|c| c == config));
    }

    #[test]
    fn test_load_missing_is_default() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"));
        assert!(loaded.is_ok_and(|c| c.is_empty()));
    }

    #[test]
    fn test_resolve_path_order() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let default_path = temp_dir.path().join("icallgen.toml");

        assert_eq!(resolve_path(None, &default_path), default_path);
        assert_eq!(
            resolve_path(Some("  ".to_string()), &default_path),
            default_path
        );

        let pointed = temp_dir.path().join("elsewhere.toml");
        let pointer = pointer_path_for(&default_path);
        assert!(fs::write(&pointer, pointed.to_string_lossy().as_bytes()).is_ok());
        assert_eq!(resolve_path(None, &default_path), pointed);

        assert_eq!(
            resolve_path(Some("/tmp/env.toml".to_string()), &default_path),
            PathBuf::from("/tmp/env.toml")
        );
    }
}
