use super::{deserialize_strict, Codec, Equivalence, Format};
use crate::diff::diff_values;
use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// JSON codec
///
/// Encodes pretty printed output followed by a newline. Serialized forms are
/// compared as JSON trees, so object key order in a golden file is not
/// significant.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    /// Spaces per indentation level; `0` produces compact output
    pub indent: usize,
    /// Reject object keys the target shape does not declare
    pub deny_unknown_fields: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self {
            indent: 2,
            deny_unknown_fields: true,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();

        if self.indent == 0 {
            serde_json::to_writer(&mut buf, value)?;
        } else {
            let indent = " ".repeat(self.indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }

        buf.push(b'\n');
        Ok(buf)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        let mut de = serde_json::Deserializer::from_slice(data);
        let value = if self.deny_unknown_fields {
            deserialize_strict(&mut de)?
        } else {
            T::deserialize(&mut de)?
        };
        de.end()?;

        Ok(value)
    }

    fn equivalent(&self, reference: &[u8], encoded: &[u8]) -> Equivalence {
        let reference: Value = match serde_json::from_slice(reference) {
            Ok(v) => v,
            Err(e) => return Equivalence::Invalid(format!("reference is not valid JSON: {}", e)),
        };
        let encoded: Value = match serde_json::from_slice(encoded) {
            Ok(v) => v,
            Err(e) => {
                return Equivalence::Invalid(format!("encoded value is not valid JSON: {}", e))
            }
        };

        let differences = diff_values(&reference, &encoded);
        if differences.is_empty() {
            Equivalence::Equal
        } else {
            Equivalence::Different(differences)
        }
    }
}
