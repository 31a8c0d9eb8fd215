use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional tool configuration, read from `newsstand.toml` when present.
/// A command-line `--database` flag always wins over the config value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewsstandConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("newsstand.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("newsstand.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<NewsstandConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: NewsstandConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &NewsstandConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsstand.toml");

        let config = NewsstandConfig {
            database: Some("data/press.db".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("data/press.db"));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsstand.toml");

        write_config(&path, &NewsstandConfig::default(), false).unwrap();
        assert!(write_config(&path, &NewsstandConfig::default(), false).is_err());
        assert!(write_config(&path, &NewsstandConfig::default(), true).is_ok());
    }
}
