//! Process-wide defaults: one [`Goldsert`] with the standard codecs and one
//! [`FileStore`] rooted at `testdata/`, both built on first use.

use crate::store::FileStore;
use goldsert::{Goldsert, GoldsertError, Scope, Session};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

static GOLDSERT: Lazy<Goldsert> = Lazy::new(Goldsert::new);

static STORE: Lazy<FileStore> = Lazy::new(FileStore::with_defaults);

pub fn global() -> &'static Goldsert {
    &GOLDSERT
}

pub fn global_store() -> &'static FileStore {
    &STORE
}

/// Session over the global defaults
pub fn session(scope: Scope) -> Session<'static, FileStore> {
    Session::new(global(), global_store(), scope)
}

/// Scope named after the running test
pub fn current_scope() -> goldsert::Result<Scope> {
    Scope::from_current_test().ok_or_else(|| {
        GoldsertError::usage("not in a named test thread; pass a scope explicitly")
    })
}

#[track_caller]
pub fn json_marshaling<T>(scope: &Scope, value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.json_marshaling(value);
    s.finish();
}

#[track_caller]
pub fn json_marshaling_p<V, E>(scope: &Scope, value: &V, expected: &E)
where
    V: Serialize + Debug + ?Sized,
    E: DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.json_marshaling_p(value, expected);
    s.finish();
}

#[track_caller]
pub fn yaml_marshaling<T>(scope: &Scope, value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.yaml_marshaling(value);
    s.finish();
}

#[track_caller]
pub fn yaml_marshaling_p<V, E>(scope: &Scope, value: &V, expected: &E)
where
    V: Serialize + Debug + ?Sized,
    E: DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.yaml_marshaling_p(value, expected);
    s.finish();
}

#[track_caller]
pub fn xml_marshaling<T>(scope: &Scope, value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.xml_marshaling(value);
    s.finish();
}

#[track_caller]
pub fn xml_marshaling_p<V, E>(scope: &Scope, value: &V, expected: &E)
where
    V: Serialize + Debug + ?Sized,
    E: DeserializeOwned + PartialEq + Debug,
{
    let mut s = session(scope.clone());
    s.xml_marshaling_p(value, expected);
    s.finish();
}
