// Assertion outcomes of a verification

use crate::codec::Format;
use crate::diff::Difference;
use crate::store::ArtifactName;
use std::fmt;

/// A non-fatal assertion failure
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The encoded value does not match the reference artifact
    Serialized {
        format: Format,
        location: String,
        /// Why the two forms are not comparable, when one did not parse
        reason: Option<String>,
        reference: String,
        encoded: String,
        differences: Vec<Difference>,
    },
    /// Decoding the reference artifact did not produce the expected value
    Decoded {
        format: Format,
        shape: String,
        location: String,
        expected: String,
        actual: String,
    },
}

impl Failure {
    pub fn format(&self) -> Format {
        match self {
            Failure::Serialized { format, .. } | Failure::Decoded { format, .. } => *format,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Serialized {
                format,
                location,
                reason,
                reference,
                encoded,
                differences,
            } => {
                writeln!(
                    f,
                    "{} marshaling does not match golden file {}",
                    format, location
                )?;
                if let Some(reason) = reason {
                    writeln!(f, "  {}", reason)?;
                }
                for difference in differences {
                    writeln!(f, "  {}", difference)?;
                }
                writeln!(f, "--- golden\n{}", reference.trim_end())?;
                write!(f, "+++ marshaled\n{}", encoded.trim_end())
            }
            Failure::Decoded {
                format,
                shape,
                location,
                expected,
                actual,
            } => {
                writeln!(
                    f,
                    "{} unmarshaling {} from golden file {} does not match expected object",
                    format, shape, location
                )?;
                writeln!(f, "  expected: {}", expected)?;
                write!(f, "  actual:   {}", actual)
            }
        }
    }
}

/// Outcome of one round-trip verification
#[derive(Debug, Clone)]
pub struct Verification {
    pub format: Format,
    pub artifact: ArtifactName,
    pub location: String,
    /// The artifact was rewritten because the store is in update mode
    pub updated: bool,
    pub failures: Vec<Failure>,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Panic with every failure message unless the verification passed
    #[track_caller]
    pub fn assert_passed(&self) {
        if !self.passed() {
            panic!("{}", render_failures(&self.failures));
        }
    }
}

pub(crate) fn render_failures(failures: &[Failure]) -> String {
    let mut out = format!("{} golden assertion(s) failed", failures.len());
    for failure in failures {
        out.push_str("\n\n");
        out.push_str(&failure.to_string());
    }
    out
}
