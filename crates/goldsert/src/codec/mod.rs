//! Codec strategies: one configurable encoder/decoder pair per format.
//!
//! A [`Codec`] hides format specific configuration (indentation, unknown
//! field strictness, XML root naming) behind a uniform contract and decides
//! what "the same serialized form" means for its format. Shapes that need
//! their own encoding implement `Serialize`/`Deserialize` by hand. Map keys
//! become element names in XML, so such impls must emit valid XML names to be
//! marshaled as XML.

pub mod json;
pub mod xml;
pub mod yaml;

use crate::diff::Difference;
use crate::error::CodecError;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::Serialize;
use std::fmt;

pub use json::JsonCodec;
pub use xml::XmlCodec;
pub use yaml::YamlCodec;

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
        }
    }

    /// Name of the reference artifact holding this format's golden bytes
    pub fn artifact_name(&self) -> String {
        format!("goldsert_{}", self.as_str())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Xml => "XML",
        };
        f.write_str(name)
    }
}

/// Result of comparing the serialized form of a value with its reference
#[derive(Debug, Clone, PartialEq)]
pub enum Equivalence {
    Equal,
    /// Both sides parsed but differ. Path differences are empty for formats
    /// compared as plain text.
    Different(Vec<Difference>),
    /// One side could not be parsed as the format
    Invalid(String),
}

impl Equivalence {
    pub fn is_equal(&self) -> bool {
        matches!(self, Equivalence::Equal)
    }
}

/// Encoder/decoder strategy for a single format
pub trait Codec: Send + Sync {
    fn format(&self) -> Format;

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode into a freshly created `T`
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// Compare normalized reference bytes with normalized encoded bytes.
    /// Exact byte equality unless the format overrides it.
    fn equivalent(&self, reference: &[u8], encoded: &[u8]) -> Equivalence {
        if reference == encoded {
            Equivalence::Equal
        } else {
            Equivalence::Different(Vec::new())
        }
    }
}

/// Deserialize `T`, failing with [`CodecError::UnknownFields`] when the input
/// carries fields the target shape does not declare.
pub(crate) fn deserialize_strict<'de, D, T>(deserializer: D) -> Result<T, CodecError>
where
    D: Deserializer<'de>,
    D::Error: Into<CodecError>,
    T: Deserialize<'de>,
{
    let mut unknown = Vec::new();
    let value: T = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(path.to_string())
    })
    .map_err(Into::into)?;

    if unknown.is_empty() {
        Ok(value)
    } else {
        Err(CodecError::UnknownFields(unknown))
    }
}

/// Full type name of a shape, used in error messages
pub fn shape_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Last path segment of a type name without generics or references:
/// `my_crate::model::Book` -> `Book`, `&str` -> `str`.
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let last = base.rsplit("::").next().unwrap_or(base);
    let name = last.trim_start_matches(['&', '*', '[', '(', ' ']);
    let name: String = name
        .trim_start_matches("mut ")
        .trim_start_matches("const ")
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    match name.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => name,
        _ => "value".to_string(),
    }
}
