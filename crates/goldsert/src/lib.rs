//! Golden-file assertions for marshaling round trips.
//!
//! Each assertion marshals a value, compares the result with a golden
//! artifact, then unmarshals the golden artifact and compares the decoded
//! value with the expected one. Where golden artifacts live and whether they
//! are being re-recorded is up to the [`ReferenceStore`] passed in.
//!
//! ```
//! use goldsert::{Goldsert, MemoryStore, Scope};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct MyStruct {
//!     foo_bar: String,
//!     #[serde(skip)]
//!     internal: String,
//! }
//!
//! let goldsert = Goldsert::new();
//! let store = MemoryStore::recording();
//! let scope = Scope::new("my_struct_marshaling");
//!
//! let value = MyStruct { foo_bar: "Hello World!".into(), internal: "nope".into() };
//! let want = MyStruct { foo_bar: "Hello World!".into(), internal: String::new() };
//!
//! goldsert.json_marshaling_p(&store, &scope, &value, &want).unwrap().assert_passed();
//! goldsert.yaml_marshaling_p(&store, &scope, &value, &want).unwrap().assert_passed();
//! goldsert.xml_marshaling_p(&store, &scope, &value, &want).unwrap().assert_passed();
//! ```

pub mod codec;
pub mod diff;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod report;
pub mod scope;
pub mod session;
pub mod store;
pub mod verifier;

// Re-export commonly used types
pub use codec::{Codec, Equivalence, Format, JsonCodec, XmlCodec, YamlCodec};
pub use diff::{Difference, DifferenceKind};
pub use error::{CodecError, GoldsertError, Result};
pub use normalize::normalize_line_breaks;
pub use report::{Failure, Verification};
pub use scope::Scope;
pub use session::Session;
pub use store::{ArtifactName, MemoryStore, ReferenceStore};
pub use verifier::Goldsert;
