use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`GoldenConfig::root_dir`]
pub const ROOT_DIR_ENV: &str = "GOLDSERT_ROOT_DIR";

/// Environment variable switching golden files into update mode
pub const DEFAULT_UPDATE_ENV: &str = "GOLDEN_UPDATE";

/// Spellings accepted as "on" for boolean environment variables
const TRUTHY: [&str; 6] = ["1", "y", "t", "yes", "on", "true"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenConfig {
    /// Directory holding golden files, relative to the crate under test
    pub root_dir: PathBuf,
    /// File name suffix appended to every artifact name
    pub suffix: String,
    /// Environment variable that enables update mode
    pub update_env: String,
    /// Permissions for created directories (unix only)
    pub dir_mode: u32,
    /// Permissions for written golden files (unix only)
    pub file_mode: u32,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("testdata"),
            suffix: ".golden".to_string(),
            update_env: DEFAULT_UPDATE_ENV.to_string(),
            dir_mode: 0o755,
            file_mode: 0o644,
        }
    }
}

impl GoldenConfig {
    /// Load configuration from a YAML or TOML file; missing keys keep their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: GoldenConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {:?}", path))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {:?}", path))?,
        };

        tracing::debug!("Loaded golden config from: {:?}", path);
        Ok(config)
    }

    /// Defaults with the root directory taken from `GOLDSERT_ROOT_DIR` when set
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(root) = std::env::var_os(ROOT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.root_dir = PathBuf::from(root);
        }
        self
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    /// Whether the configured environment variable currently enables update mode
    pub fn update_mode(&self) -> bool {
        update_mode_from_env(&self.update_env)
    }
}

/// `"1"`, `"y"`, `"t"`, `"yes"`, `"on"` and `"true"`, case-insensitive
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}

pub fn update_mode_from_env(var: &str) -> bool {
    std::env::var(var).map(|v| is_truthy(&v)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_spellings() {
        for value in ["1", "y", "Y", "t", "yes", "YES", "on", "On", "true", "TRUE", " true\n"] {
            assert!(is_truthy(value), "{value:?}");
        }
        for value in ["", "0", "n", "no", "off", "false", "2", "enabled", "yess"] {
            assert!(!is_truthy(value), "{value:?}");
        }
    }

    #[test]
    fn test_update_mode_from_env() {
        let var = "GOLDSERT_TEST_UPDATE_MODE_FROM_ENV";
        assert!(!update_mode_from_env(var));

        std::env::set_var(var, "on");
        assert!(update_mode_from_env(var));

        std::env::set_var(var, "off");
        assert!(!update_mode_from_env(var));
        std::env::remove_var(var);
    }

    #[test]
    fn test_defaults() {
        let config = GoldenConfig::default();
        assert_eq!(config.root_dir, PathBuf::from("testdata"));
        assert_eq!(config.suffix, ".golden");
        assert_eq!(config.update_env, "GOLDEN_UPDATE");
        assert_eq!(
            config.with_root_dir("fixtures").root_dir,
            PathBuf::from("fixtures")
        );
    }
}
