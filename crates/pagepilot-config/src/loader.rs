//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load an explicit file, or the default file when present.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => Ok(Config::default()),
        }
    }

    /// `~/.pagepilot/config.toml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pagepilot").join("config.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.pagepilot`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [agent]
            max_failures = 5
            max_actions_per_step = 4
            max_steps = 20
            use_vision = false

            [actions]
            excluded = ["search_google", "open_tab"]

            [logging]
            level = "debug"
            format = "json"
            directory = "/var/log/pagepilot"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.agent.max_failures, 5);
        assert_eq!(config.agent.max_actions_per_step, 4);
        assert_eq!(config.agent.max_steps, 20);
        assert!(!config.agent.use_vision);
        assert_eq!(config.actions.excluded, vec!["search_google", "open_tab"]);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
        assert_eq!(
            config.logging.directory_path(),
            Some(PathBuf::from("/var/log/pagepilot"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[agent]").unwrap();
        writeln!(file, "max_steps = 7").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.agent.max_steps, 7);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = ConfigLoader::load(Path::new("/nonexistent/path/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let result = ConfigLoader::load_or_default(Some(Path::new("/nonexistent/pagepilot.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"trace\"").unwrap();

        let config = ConfigLoader::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_default_path_location() {
        if let Some(path) = ConfigLoader::default_path() {
            assert!(path.ends_with(".pagepilot/config.toml"));
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let err = ConfigLoader::load_str("invalid = [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let result = ConfigLoader::load_str("[agent]\nmax_failures = \"three\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: unique test-only variable
        unsafe {
            std::env::set_var("PAGEPILOT_TEST_LOG_LEVEL", "warn");
        }
        let config = ConfigLoader::load_str("[logging]\nlevel = \"${PAGEPILOT_TEST_LOG_LEVEL}\"\n")
            .unwrap();
        assert_eq!(config.logging.level, "warn");
        unsafe {
            std::env::remove_var("PAGEPILOT_TEST_LOG_LEVEL");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${PAGEPILOT_NONEXISTENT_VAR_12345}\"";
        let err = ConfigLoader::expand_env_vars(content).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotSet(name) if name == "PAGEPILOT_NONEXISTENT_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        assert_eq!(ConfigLoader::expand_env_vars(content).unwrap(), content);
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.pagepilot");
        assert!(!expanded.starts_with('~'));
    }
}
