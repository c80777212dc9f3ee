use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "~/.config/interview-shell";
const LOG_FILE: &str = "interview-shell.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched for pattern bundles.
    pub patterns_path: PathBuf,
    /// Default output directory for `--export`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
}

impl Config {
    pub fn new(patterns_path: PathBuf) -> Self {
        Self {
            patterns_path,
            export_path: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.patterns_path =
            Self::expand_path(&config.patterns_path).unwrap_or(config.patterns_path);
        config.export_path = config
            .export_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// `~/.config/interview-shell`, tilde expanded.
    pub fn config_dir() -> PathBuf {
        PathBuf::from(shellexpand::tilde(APP_DIR).as_ref())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Where the terminal UI writes its log while it owns the screen.
    pub fn log_path() -> PathBuf {
        Self::config_dir().join(LOG_FILE)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_paths() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/interview-shell/config.toml"));
        assert!(
            Config::log_path()
                .to_string_lossy()
                .ends_with(".config/interview-shell/interview-shell.log")
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            patterns_path: PathBuf::from("/tmp/patterns"),
            export_path: Some(PathBuf::from("/tmp/site")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_export_path_is_optional() {
        let config: Config = toml::from_str("patterns_path = \"/p\"\n").unwrap();
        assert_eq!(config, Config::new(PathBuf::from("/p")));

        let written = toml::to_string(&config).unwrap();
        assert!(!written.contains("export_path"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/interviews")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("interviews"));
    }

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        for raw in ["/absolute/path", "relative/path"] {
            let path = PathBuf::from(raw);
            assert_eq!(Config::expand_path(&path).unwrap(), path);
        }
    }

    #[test]
    fn test_expand_path_with_undefined_var_fails() {
        let path = PathBuf::from("$INTERVIEW_SHELL_SURELY_UNSET_VAR/x");
        assert!(Config::expand_path(&path).is_none());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "patterns_path = ").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config::new(PathBuf::from("/tmp/patterns"));

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_vars_in_toml() {
        unsafe {
            env::set_var("INTERVIEW_ROOT", "/custom/interviews");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "patterns_path = \"$INTERVIEW_ROOT/patterns\"\nexport_path = \"$INTERVIEW_ROOT/site\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.patterns_path,
            PathBuf::from("/custom/interviews/patterns")
        );
        assert_eq!(
            config.export_path,
            Some(PathBuf::from("/custom/interviews/site"))
        );

        unsafe {
            env::remove_var("INTERVIEW_ROOT");
        }
    }
}
