use crate::error::{GoldsertError, Result};
use crate::scope::Scope;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Key of a reference artifact: the owning test scope plus a per-format name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName {
    pub scope: Scope,
    pub name: String,
}

impl ArtifactName {
    pub fn new(scope: Scope, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_root() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.scope, self.name)
        }
    }
}

/// Durable storage for named reference artifacts.
///
/// Implementations must make each `read` and `write` atomic per name. No
/// locking across names is expected; concurrent writers of the same name
/// are last-writer-wins.
pub trait ReferenceStore: Send + Sync {
    fn exists(&self, name: &ArtifactName) -> bool;

    /// Fails with [`GoldsertError::NotFound`] when the artifact is absent
    fn read(&self, name: &ArtifactName) -> Result<Vec<u8>>;

    fn write(&self, name: &ArtifactName, data: &[u8]) -> Result<()>;

    /// Whether artifacts should be (re)recorded from the current output
    fn is_update_mode(&self) -> bool;

    /// Logical location of an artifact for error messages (a file path, URL...)
    fn location(&self, name: &ArtifactName) -> String;
}

/// In-memory store, mainly for testing the verifier itself
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: RwLock<HashMap<ArtifactName, Vec<u8>>>,
    update: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that records every verified value, like running with update mode on
    pub fn recording() -> Self {
        Self {
            update: true,
            ..Self::default()
        }
    }

    pub fn with_update_mode(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Seed an artifact without going through update mode
    pub fn insert(&self, name: &ArtifactName, data: impl Into<Vec<u8>>) {
        self.lock_write().insert(name.clone(), data.into());
    }

    pub fn get(&self, name: &ArtifactName) -> Option<Vec<u8>> {
        self.lock_read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ArtifactName, Vec<u8>>> {
        self.artifacts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ArtifactName, Vec<u8>>> {
        self.artifacts.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReferenceStore for MemoryStore {
    fn exists(&self, name: &ArtifactName) -> bool {
        self.lock_read().contains_key(name)
    }

    fn read(&self, name: &ArtifactName) -> Result<Vec<u8>> {
        let location = self.location(name);
        self.get(name)
            .ok_or_else(|| GoldsertError::not_found(name.to_string(), location))
    }

    fn write(&self, name: &ArtifactName, data: &[u8]) -> Result<()> {
        self.insert(name, data);
        Ok(())
    }

    fn is_update_mode(&self) -> bool {
        self.update
    }

    fn location(&self, name: &ArtifactName) -> String {
        format!("memory://{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_read_write() {
        let store = MemoryStore::new();
        let name = ArtifactName::new(Scope::new("t").child("case"), "goldsert_json");
        assert_eq!(name.to_string(), "t/case/goldsert_json");

        assert!(!store.exists(&name));
        let err = store.read(&name).unwrap_err();
        assert!(err.is_not_found());

        store.write(&name, b"{}").unwrap();
        assert!(store.exists(&name));
        assert_eq!(store.read(&name).unwrap(), b"{}");
        assert_eq!(store.location(&name), "memory://t/case/goldsert_json");
    }

    #[test]
    fn test_update_mode_flag() {
        assert!(!MemoryStore::new().is_update_mode());
        assert!(MemoryStore::recording().is_update_mode());
        let replaying = MemoryStore::recording().with_update_mode(false);
        assert!(!replaying.is_update_mode());
    }

    #[test]
    fn test_artifacts_keyed_by_scope_segments() {
        let store = MemoryStore::new();
        let nested = ArtifactName::new(Scope::new("a").child("b"), "goldsert_json");
        let flat = ArtifactName::new(Scope::new("a/b"), "goldsert_json");
        assert_eq!(nested.to_string(), flat.to_string());

        store.insert(&nested, "true\n");
        assert!(store.exists(&nested));
        assert!(!store.exists(&flat));
        assert!(store.get(&flat).is_none());

        store.insert(&flat, "false\n");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&nested).unwrap(), b"true\n");
    }

    #[test]
    fn test_root_scope_name() {
        let name = ArtifactName::new(Scope::root(), "goldsert_xml");
        assert_eq!(name.to_string(), "goldsert_xml");
    }
}
