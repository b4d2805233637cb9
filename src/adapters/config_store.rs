//! Configuration file discovery, loading and persistence.
//!
//! Lookup order: `$STRATER_CONFIG`, `./.strater.ini`,
//! `$HOME/.config/strater/.strater.ini`, `/etc/strater/.strater.ini`.

use log::info;
use std::path::{Path, PathBuf};

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::StraterConfig;
use crate::domain::error::StraterError;

pub const CONFIG_ENV_VAR: &str = "STRATER_CONFIG";
pub const CONFIG_FILE_NAME: &str = ".strater.ini";

/// Candidate locations in lookup order, before existence checks.
pub fn candidate_paths(env_path: Option<&str>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = env_path.filter(|p| !p.is_empty()) {
        paths.push(PathBuf::from(p));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    if let Some(home) = home {
        paths.push(home.join(".config").join("strater").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from("/etc/strater").join(CONFIG_FILE_NAME));
    paths
}

/// First existing configuration file, searched in the standard locations.
pub fn find_config_file() -> Result<PathBuf, StraterError> {
    let env_path = std::env::var(CONFIG_ENV_VAR).ok();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    candidate_paths(env_path.as_deref(), home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
        .ok_or(StraterError::ConfigNotFound)
}

/// Resolves an explicit `--file` path (which must exist) or searches the
/// standard locations.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, StraterError> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(StraterError::ConfigParse {
            file: path.display().to_string(),
            reason: "specified config file not found".into(),
        }),
        None => find_config_file(),
    }
}

pub fn load(path: &Path) -> Result<StraterConfig, StraterError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| StraterError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("loading configuration from {}", path.display());
    StraterConfig::from_port(&adapter)
}

pub fn save(config: &StraterConfig, path: &Path) -> Result<(), StraterError> {
    FileConfigAdapter::from_config(config).save(path)?;
    info!("saved configuration to {}", path.display());
    Ok(())
}

/// Writes a default configuration to `path`, refusing to overwrite one.
pub fn init_at(path: &Path) -> Result<StraterConfig, StraterError> {
    if path.exists() {
        return Err(StraterError::ConfigParse {
            file: path.display().to_string(),
            reason: "a configuration file already exists".into(),
        });
    }
    let config = StraterConfig::default();
    save(&config, path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::StrategyOverride;

    #[test]
    fn candidate_order_with_env_and_home() {
        let paths = candidate_paths(Some("/tmp/custom.ini"), Some(Path::new("/home/u")));
        assert_eq!(
            paths,
            [
                PathBuf::from("/tmp/custom.ini"),
                PathBuf::from(".strater.ini"),
                PathBuf::from("/home/u/.config/strater/.strater.ini"),
                PathBuf::from("/etc/strater/.strater.ini"),
            ]
        );
    }

    #[test]
    fn candidate_order_without_env_or_home() {
        let paths = candidate_paths(Some(""), None);
        assert_eq!(
            paths,
            [
                PathBuf::from(".strater.ini"),
                PathBuf::from("/etc/strater/.strater.ini"),
            ]
        );
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = resolve_config_path(Some(Path::new("/nonexistent/.strater.ini"))).unwrap_err();
        assert!(matches!(err, StraterError::ConfigParse { .. }));
    }

    #[test]
    fn init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let written = init_at(&path).unwrap();
        assert_eq!(resolve_config_path(Some(&path)).unwrap(), path);
        assert_eq!(load(&path).unwrap(), written);
    }

    #[test]
    fn init_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        init_at(&path).unwrap();
        assert!(init_at(&path).is_err());
    }

    #[test]
    fn save_persists_strategies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = init_at(&path).unwrap();
        config
            .add_strategy(StrategyOverride {
                trade_reward_pct: Some(0.02),
                ..StrategyOverride::new("ifunds")
            })
            .unwrap();
        save(&config, &path).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(
            reloaded.find_strategy("ifunds").unwrap().trade_reward_pct,
            Some(0.02)
        );
    }

    #[test]
    fn load_reports_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[defaults]\nmonth_count = twelve\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, StraterError::ConfigInvalid { key, .. } if key == "month_count"));
    }
}
