use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix a clipboard URL must start with to be opened as a Tana node.
pub const DEFAULT_TANA_URL_PREFIX: &str = "https://app.tana.inc?nodeid=";

/// Global configuration loaded from `~/.config/clip2tana/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip2TanaConfig {
    /// Clipboard text must start with this to be opened by `clip2tana open`.
    #[serde(default = "default_tana_url_prefix")]
    pub tana_url_prefix: String,
    /// Write paste documents to the system clipboard.
    #[serde(default = "default_true")]
    pub write_clipboard: bool,
    /// Also print paste documents to stdout.
    #[serde(default)]
    pub echo: bool,
}

fn default_tana_url_prefix() -> String {
    DEFAULT_TANA_URL_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Clip2TanaConfig {
    fn default() -> Self {
        Self {
            tana_url_prefix: default_tana_url_prefix(),
            write_clipboard: true,
            echo: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("clip2tana")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Clip2TanaConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`], for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<Clip2TanaConfig> {
    if !path.exists() {
        let default_cfg = Clip2TanaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: Clip2TanaConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Clip2TanaConfig::default();
        assert_eq!(cfg.tana_url_prefix, "https://app.tana.inc?nodeid=");
        assert!(cfg.write_clipboard);
        assert!(!cfg.echo);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            tana_url_prefix = "https://app.tana.inc/?nodeid="
            write_clipboard = false
            echo = true
        "#;
        let cfg: Clip2TanaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.tana_url_prefix, "https://app.tana.inc/?nodeid=");
        assert!(!cfg.write_clipboard);
        assert!(cfg.echo);
    }

    #[test]
    fn config_toml_missing_keys_use_defaults() {
        let cfg: Clip2TanaConfig = toml::from_str("echo = true").unwrap();
        assert_eq!(cfg.tana_url_prefix, DEFAULT_TANA_URL_PREFIX);
        assert!(cfg.write_clipboard);
        assert!(cfg.echo);
    }

    #[test]
    fn load_or_init_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, Clip2TanaConfig::default());
        assert!(path.exists());

        fs::write(&path, "write_clipboard = false\n").unwrap();
        let reloaded = load_or_init_at(&path).unwrap();
        assert!(!reloaded.write_clipboard);
        assert_eq!(reloaded.tana_url_prefix, DEFAULT_TANA_URL_PREFIX);
    }
}
