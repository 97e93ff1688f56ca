//! Settings file parsing and discovery

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a settings file
pub const CONFIG_ENV_VAR: &str = "KMAK_CONFIG";

/// Settings file name inside the platform config directory
const CONFIG_FILE_NAME: &str = "config.yml";

/// Default maximum nesting of `include` directives
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 10;

/// Default maximum nesting of `call` directives
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Interpreter settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Shell used to run `cmd` lines (e.g., ["bash", "-c"])
    pub shell: Vec<String>,

    /// How deep `include` may nest before loading fails
    pub max_include_depth: usize,

    /// How deep `call` may nest before execution fails
    pub max_call_depth: usize,

    /// Echo each command before running it
    pub echo_commands: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            shell: default_shell(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            echo_commands: true,
        }
    }
}

#[cfg(windows)]
fn default_shell() -> Vec<String> {
    vec!["cmd".to_string(), "/C".to_string()]
}

#[cfg(not(windows))]
fn default_shell() -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string()]
}

impl Settings {
    /// Check that the settings are usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.shell.is_empty() || self.shell[0].trim().is_empty() {
            return Err(ConfigError::Invalid(
                "shell must name at least a program".to_string(),
            ));
        }
        if self.max_include_depth == 0 {
            return Err(ConfigError::Invalid(
                "max-include-depth must be at least 1".to_string(),
            ));
        }
        if self.max_call_depth == 0 {
            return Err(ConfigError::Invalid(
                "max-call-depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse settings from a YAML string
pub fn parse_settings(yaml: &str) -> ConfigResult<Settings> {
    // An empty document means "all defaults"
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(yaml)?;
    settings.validate()?;
    Ok(settings)
}

/// Parse a settings file from a path
pub fn parse_settings_file(path: &Path) -> ConfigResult<Settings> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_settings(&contents)
}

/// The default settings file location for this platform, if one exists
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kmak")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Find the settings file to use
///
/// An explicit path wins, then `KMAK_CONFIG`, then the platform config
/// directory. An explicit path or `KMAK_CONFIG` must point at a file.
pub fn find_settings_file(explicit: Option<&Path>) -> ConfigResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        return require_file(path.to_path_buf()).map(Some);
    }

    if let Ok(value) = env::var(CONFIG_ENV_VAR) {
        if !value.is_empty() {
            return require_file(PathBuf::from(value)).map(Some);
        }
    }

    Ok(default_settings_path())
}

fn require_file(path: PathBuf) -> ConfigResult<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::Read {
            error: "no such file".to_string(),
            path,
        })
    }
}

/// Load settings with automatic discovery, falling back to defaults
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    match find_settings_file(explicit)? {
        Some(path) => parse_settings_file(&path),
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_include_depth, 10);
        assert_eq!(settings.max_call_depth, 64);
        assert!(settings.echo_commands);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_settings() {
        let yaml = r#"
shell:
  - bash
  - -c
echo-commands: false
"#;
        let settings = parse_settings(yaml).unwrap();
        assert_eq!(settings.shell, vec!["bash", "-c"]);
        assert!(!settings.echo_commands);
        assert_eq!(settings.max_include_depth, DEFAULT_MAX_INCLUDE_DEPTH);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_settings("max-depth: 3\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let result = parse_settings("max-call-depth: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_shell_rejected() {
        let result = parse_settings("shell: []\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_explicit_file_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kmak.yml");
        fs::write(&path, "max-include-depth: 2\n").unwrap();

        let settings = load_settings(Some(path.as_path())).unwrap();
        assert_eq!(settings.max_include_depth, 2);
    }

    #[test]
    fn test_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yml");

        let result = find_settings_file(Some(path.as_path()));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
