use crate::codec::{Codec, JsonCodec, XmlCodec, YamlCodec};
use crate::error::Result;
use crate::report::{render_failures, Failure, Verification};
use crate::scope::Scope;
use crate::store::ReferenceStore;
use crate::verifier::Goldsert;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Assertion handle for one test.
///
/// Fatal errors (marshal/unmarshal failures, missing golden files) panic
/// immediately. Mismatches are collected so the rest of the test keeps
/// running, and are reported together by [`Session::finish`], or when the
/// session is dropped.
pub struct Session<'a, S: ?Sized, J = JsonCodec, Y = YamlCodec, X = XmlCodec> {
    goldsert: &'a Goldsert<J, Y, X>,
    store: &'a S,
    scope: Scope,
    failures: Vec<Failure>,
    finished: bool,
}

impl<'a, S, J, Y, X> Session<'a, S, J, Y, X>
where
    S: ReferenceStore + ?Sized,
    J: Codec,
    Y: Codec,
    X: Codec,
{
    pub fn new(goldsert: &'a Goldsert<J, Y, X>, store: &'a S, scope: Scope) -> Self {
        Self {
            goldsert,
            store,
            scope,
            failures: Vec::new(),
            finished: false,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Run a named sub-case in a child scope. Failures of the sub-case are
    /// added to this session.
    pub fn run<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce(&mut Session<'a, S, J, Y, X>),
    {
        let mut child = Session::new(self.goldsert, self.store, self.scope.child(name));
        f(&mut child);
        child.finished = true;
        self.failures.append(&mut child.failures);
    }

    #[track_caller]
    pub fn json_marshaling<T>(&mut self, value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        let result = self
            .goldsert
            .json_marshaling(self.store, &self.scope, value);
        self.check(result);
    }

    /// `expected` is borrowed; an owned value does not compile:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope, Session};
    ///
    /// let goldsert = Goldsert::new();
    /// let store = MemoryStore::recording();
    /// let mut session = Session::new(&goldsert, &store, Scope::new("t"));
    /// session.json_marshaling_p(&42i64, 42i64);
    /// ```
    #[track_caller]
    pub fn json_marshaling_p<V, E>(&mut self, value: &V, expected: &E)
    where
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        let result = self
            .goldsert
            .json_marshaling_p(self.store, &self.scope, value, expected);
        self.check(result);
    }

    #[track_caller]
    pub fn yaml_marshaling<T>(&mut self, value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        let result = self
            .goldsert
            .yaml_marshaling(self.store, &self.scope, value);
        self.check(result);
    }

    /// `expected` is borrowed; an owned value does not compile:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope, Session};
    ///
    /// let goldsert = Goldsert::new();
    /// let store = MemoryStore::recording();
    /// let mut session = Session::new(&goldsert, &store, Scope::new("t"));
    /// session.yaml_marshaling_p(&42i64, 42i64);
    /// ```
    #[track_caller]
    pub fn yaml_marshaling_p<V, E>(&mut self, value: &V, expected: &E)
    where
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        let result = self
            .goldsert
            .yaml_marshaling_p(self.store, &self.scope, value, expected);
        self.check(result);
    }

    #[track_caller]
    pub fn xml_marshaling<T>(&mut self, value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        let result = self.goldsert.xml_marshaling(self.store, &self.scope, value);
        self.check(result);
    }

    /// `expected` is borrowed; an owned value does not compile:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope, Session};
    ///
    /// let goldsert = Goldsert::new();
    /// let store = MemoryStore::recording();
    /// let mut session = Session::new(&goldsert, &store, Scope::new("t"));
    /// session.xml_marshaling_p(&42i64, 42i64);
    /// ```
    #[track_caller]
    pub fn xml_marshaling_p<V, E>(&mut self, value: &V, expected: &E)
    where
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        let result = self
            .goldsert
            .xml_marshaling_p(self.store, &self.scope, value, expected);
        self.check(result);
    }

    /// Record the outcome of a verification run outside this session
    #[track_caller]
    pub fn check(&mut self, result: Result<Verification>) {
        match result {
            Ok(verification) => self.failures.extend(verification.failures),
            Err(err) => {
                self.finished = true;
                panic!("{}", err);
            }
        }
    }

    /// Panic with every collected failure, if any
    #[track_caller]
    pub fn finish(mut self) {
        self.finished = true;
        if !self.failures.is_empty() {
            panic!("{}", render_failures(&self.failures));
        }
    }
}

impl<S: ?Sized, J, Y, X> Drop for Session<'_, S, J, Y, X> {
    fn drop(&mut self) {
        if !self.finished && !self.failures.is_empty() && !std::thread::panicking() {
            panic!("{}", render_failures(&self.failures));
        }
    }
}
