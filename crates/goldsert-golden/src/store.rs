use crate::config::GoldenConfig;
use goldsert::{ArtifactName, GoldsertError, ReferenceStore, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Golden files on disk: `<root_dir>/<scope segments>/<name><suffix>`
///
/// Scope segments are sanitized: every character outside `[A-Za-z0-9._-]`
/// becomes `_`. The mapping is not reversible, so `full struct` and
/// `full_struct` share one directory; keep sub-case names distinct after
/// sanitizing.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: GoldenConfig,
    update: bool,
}

impl FileStore {
    /// Create a store; update mode is read from the environment once, here.
    pub fn new(config: GoldenConfig) -> Self {
        let update = config.update_mode();
        if update {
            tracing::info!(
                "Golden update mode enabled via {}; files under {:?} will be rewritten",
                config.update_env,
                config.root_dir
            );
        }
        Self { config, update }
    }

    /// Create with default configuration and environment overrides
    pub fn with_defaults() -> Self {
        Self::new(GoldenConfig::from_env())
    }

    pub fn with_update_mode(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn config(&self) -> &GoldenConfig {
        &self.config
    }

    /// Path of the golden file for an artifact
    pub fn path(&self, name: &ArtifactName) -> PathBuf {
        let mut path = self.config.root_dir.clone();
        for segment in name.scope.segments() {
            path.push(sanitize(segment));
        }
        path.push(format!("{}{}", sanitize(&name.name), self.config.suffix));
        path
    }

    fn create_parent(&self, parent: &Path) -> Result<()> {
        if parent.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(parent)?;
        set_mode(parent, self.config.dir_mode)
    }
}

impl ReferenceStore for FileStore {
    fn exists(&self, name: &ArtifactName) -> bool {
        self.path(name).is_file()
    }

    fn read(&self, name: &ArtifactName) -> Result<Vec<u8>> {
        let path = self.path(name);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                GoldsertError::not_found(name.to_string(), path.display().to_string())
            }
            _ => GoldsertError::store(format!(
                "Failed to read golden file {}: {}",
                path.display(),
                e
            )),
        })
    }

    /// Writes to a temporary sibling file, then renames it over the golden
    /// file so readers never see a partial write. The temporary file is
    /// removed on every error path.
    fn write(&self, name: &ArtifactName, data: &[u8]) -> Result<()> {
        let path = self.path(name);
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.create_parent(&parent)?;

        let write_err = |e: std::io::Error| {
            GoldsertError::store(format!(
                "Failed to write golden file {}: {}",
                path.display(),
                e
            ))
        };

        let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
        tmp.write_all(data).map_err(write_err)?;
        set_mode(tmp.path(), self.config.file_mode)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Wrote golden file {}", path.display());
        Ok(())
    }

    fn is_update_mode(&self) -> bool {
        self.update
    }

    fn location(&self, name: &ArtifactName) -> String {
        self.path(name).display().to_string()
    }
}

/// Replace characters that are awkward in file names with `_`
fn sanitize(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".repeat(cleaned.len().max(1)),
        _ => cleaned,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
