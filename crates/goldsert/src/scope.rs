use std::fmt;

/// Hierarchical identity of the test an artifact belongs to, e.g.
/// `book_marshaling/full struct`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self::root().child(name)
    }

    /// Scope with no segments; artifacts land directly under the store root
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Nested scope for a sub-case of a table-driven test. Empty names are
    /// ignored.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut segments = self.segments.clone();
        if !name.is_empty() {
            segments.push(name);
        }
        Self { segments }
    }

    /// Scope of the currently running libtest test, derived from the thread
    /// name (`tests::book_marshaling` -> `tests/book_marshaling`).
    pub fn from_current_test() -> Option<Self> {
        let thread = std::thread::current();
        let name = thread.name()?;
        if name == "main" {
            return None;
        }

        let segments: Vec<String> = name
            .split("::")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
