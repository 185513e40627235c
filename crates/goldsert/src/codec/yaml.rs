use super::{deserialize_strict, Codec, Equivalence, Format};
use crate::diff::diff_values;
use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// YAML codec
///
/// Output uses block style with two-space indentation, which is the only
/// layout `serde_yaml` emits. Serialized forms are compared as YAML trees.
#[derive(Debug, Clone)]
pub struct YamlCodec {
    /// Reject mapping keys the target shape does not declare
    pub deny_unknown_fields: bool,
}

impl YamlCodec {
    pub fn new() -> Self {
        Self {
            deny_unknown_fields: true,
        }
    }

    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}

impl Default for YamlCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        serde_yaml::to_writer(&mut buf, value)?;
        Ok(buf)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        let de = serde_yaml::Deserializer::from_slice(data);
        if self.deny_unknown_fields {
            deserialize_strict(de)
        } else {
            Ok(T::deserialize(de)?)
        }
    }

    fn equivalent(&self, reference: &[u8], encoded: &[u8]) -> Equivalence {
        let reference: serde_yaml::Value = match serde_yaml::from_slice(reference) {
            Ok(v) => v,
            Err(e) => return Equivalence::Invalid(format!("reference is not valid YAML: {}", e)),
        };
        let encoded: serde_yaml::Value = match serde_yaml::from_slice(encoded) {
            Ok(v) => v,
            Err(e) => {
                return Equivalence::Invalid(format!("encoded value is not valid YAML: {}", e))
            }
        };

        if reference == encoded {
            return Equivalence::Equal;
        }

        // Trees that map onto JSON (string keys, no tags) are compared again
        // with numbers by value, which also yields path differences.
        match (
            serde_json::to_value(&reference),
            serde_json::to_value(&encoded),
        ) {
            (Ok(reference), Ok(encoded)) => {
                let differences = diff_values(&reference, &encoded);
                if differences.is_empty() {
                    Equivalence::Equal
                } else {
                    Equivalence::Different(differences)
                }
            }
            _ => Equivalence::Different(Vec::new()),
        }
    }
}
