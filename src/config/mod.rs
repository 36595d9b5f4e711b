use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "servertint";
const APP_CONFIG_FILE: &str = "config.json";

/// Palette analysis tuning from `config.json`. Every field has a default,
/// so a partial or absent file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Upper bound on pixels sampled per icon.
    pub max_samples: usize,
    /// Number of k-means clusters, and so the most swatches one palette
    /// can hold.
    pub cluster_count: usize,
    pub max_iterations: usize,
    /// Pixels with alpha below this are ignored.
    pub alpha_cutoff: u8,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_samples: 4096,
            cluster_count: 8,
            max_iterations: 10,
            alpha_cutoff: 128,
        }
    }
}

pub fn load_palette_config() -> PaletteConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_palette_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_palette_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> PaletteConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return PaletteConfig::default(),
    };
    if !path.exists() {
        return PaletteConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            PaletteConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            PaletteConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("servertint-config-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "servertint",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/servertint/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("servertint", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/servertint/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("servertint", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        with_temp_root(|root| {
            let config = load_palette_config_with(Some(root), None);
            assert_eq!(config, PaletteConfig::default());
        });
    }

    #[test]
    fn partial_config_file_overrides_only_named_fields() {
        with_temp_root(|root| {
            let dir = root.join(APP_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(APP_CONFIG_FILE), r#"{"cluster_count": 12}"#).unwrap();

            let config = load_palette_config_with(Some(root), None);
            assert_eq!(config.cluster_count, 12);
            assert_eq!(config.max_samples, PaletteConfig::default().max_samples);
            assert_eq!(config.alpha_cutoff, PaletteConfig::default().alpha_cutoff);
        });
    }

    #[test]
    fn malformed_config_file_yields_defaults() {
        with_temp_root(|root| {
            let dir = root.join(APP_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(APP_CONFIG_FILE), "{ invalid ").unwrap();

            let config = load_palette_config_with(Some(root), None);
            assert_eq!(config, PaletteConfig::default());
        });
    }
}
