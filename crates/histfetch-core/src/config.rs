//! Configuration for histfetch (stored in ~/.config/histfetch/config.toml)

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{FetchConfig, PathsConfig};

use crate::bail_invalid;
use crate::error::{FetchError, Result};
use crate::ids::TagPattern;
use crate::mixer::MixOptions;

const APP_DIR: &str = "histfetch";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "HISTFETCH_CONFIG_DIR";
const DATA_DIR_ENV_VAR: &str = "HISTFETCH_DATA_DIR";
const INVALID_STORE_FILE: &str = "invalid_questions.txt";
const SESSION_FILE: &str = "session.json";

impl FetchConfig {
    /// Default config file location
    pub fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    FetchError::Other("unable to determine config directory".to_string())
                })?
                .join(APP_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Directory holding the blocklist and saved session
    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(env_dir) = std::env::var(DATA_DIR_ENV_VAR) {
            return Ok(PathBuf::from(env_dir));
        }
        Ok(dirs::data_dir()
            .ok_or_else(|| FetchError::Other("unable to determine data directory".to_string()))?
            .join(APP_DIR))
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load and validate; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| FetchError::io_operation("read config", path.display(), e))?;
        let config: FetchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| FetchError::io_operation("create directory", parent.display(), e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FetchError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| FetchError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.mix_percent > 100 {
            bail_invalid!("mix percent", self.mix_percent);
        }
        if self.max_depth == 0 {
            bail_invalid!("max depth", self.max_depth);
        }
        if self.hours == 0 {
            bail_invalid!("hours", self.hours);
        }
        if self.rollover_hour > 23 {
            bail_invalid!("rollover hour", self.rollover_hour);
        }
        TagPattern::new(&self.tag_marker)?;
        Ok(())
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tag_marker)
    }

    pub fn mix_options(&self) -> MixOptions {
        MixOptions {
            batch_size: self.batch_size,
            mix_percent: self.mix_percent,
            randomize: self.randomize,
            horizontal_enabled: self.horizontal,
            include_mastered: self.include_mastered,
        }
    }

    pub fn invalid_store_path(&self) -> Result<PathBuf> {
        match &self.paths.invalid_store {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(INVALID_STORE_FILE)),
        }
    }

    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.paths.session {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(SESSION_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.tag_marker, "UWorld");
        assert_eq!(config.batch_size, 40);
        assert_eq!(config.mix_percent, 50);
        assert_eq!(config.max_depth, 1);
        assert!(!config.horizontal);
        assert!(!config.include_mastered);
        assert!(config.states.learning && config.states.young && config.states.mature);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = FetchConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, FetchConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "batch_size = 25\nhorizontal = true\n\n\
             [states]\nmature = false\n\n\
             [paths]\ncollection = \"/tmp/collection.anki2\"\n",
        )
        .unwrap();

        let config = FetchConfig::load_from(&path).unwrap();
        assert_eq!(config.batch_size, 25);
        assert!(config.horizontal);
        assert!(config.states.learning);
        assert!(!config.states.mature);
        assert_eq!(
            config.paths.collection,
            Some(PathBuf::from("/tmp/collection.anki2"))
        );
        assert_eq!(config.mix_percent, 50);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = FetchConfig {
            mix_percent: 30,
            max_depth: 3,
            randomize: true,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(FetchConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for bad in [
            "mix_percent = 101",
            "max_depth = 0",
            "hours = 0",
            "rollover_hour = 24",
            "tag_marker = \"\"",
        ] {
            fs::write(&path, bad).unwrap();
            let err = FetchConfig::load_from(&path).unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidValue { .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "batch_size = [").unwrap();
        assert!(matches!(
            FetchConfig::load_from(&path),
            Err(FetchError::Toml(_))
        ));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = FetchConfig {
            paths: PathsConfig {
                invalid_store: Some(PathBuf::from("/data/invalid.txt")),
                session: Some(PathBuf::from("/data/session.json")),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.invalid_store_path().unwrap(),
            PathBuf::from("/data/invalid.txt")
        );
        assert_eq!(
            config.session_path().unwrap(),
            PathBuf::from("/data/session.json")
        );
    }

    #[test]
    fn test_mix_options_follow_config() {
        let config = FetchConfig {
            batch_size: 12,
            horizontal: true,
            include_mastered: true,
            ..Default::default()
        };
        let opts = config.mix_options();
        assert_eq!(opts.batch_size, 12);
        assert!(opts.horizontal_enabled);
        assert!(opts.include_mastered);
        assert_eq!(opts.mix_percent, 50);
    }
}
