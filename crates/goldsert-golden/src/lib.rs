//! Golden files on disk for `goldsert`.
//!
//! Artifacts live under `testdata/<test scope>/<artifact>.golden`. Set
//! `GOLDEN_UPDATE=1` to (re)write them from the current marshaling output.
//!
//! ```no_run
//! use goldsert::Scope;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct MyStruct {
//!     foo_bar: String,
//! }
//!
//! let scope = Scope::new("my_struct_marshaling");
//! let value = MyStruct { foo_bar: "Hello World!".into() };
//! goldsert_golden::json_marshaling(&scope, &value);
//! goldsert_golden::yaml_marshaling(&scope, &value);
//! ```

pub mod config;
pub mod global;
pub mod store;

pub use config::{is_truthy, update_mode_from_env, GoldenConfig};
pub use global::{
    current_scope, global, global_store, json_marshaling, json_marshaling_p, session,
    xml_marshaling, xml_marshaling_p, yaml_marshaling, yaml_marshaling_p,
};
pub use store::FileStore;
