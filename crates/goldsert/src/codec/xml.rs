use super::{deserialize_strict, short_type_name, Codec, Format};
use crate::error::CodecError;
use quick_xml::de::Deserializer;
use quick_xml::se::Serializer;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// XML codec
///
/// XML has no schema-free notion of structural equality that survives
/// attribute and element reordering, so serialized forms are compared as
/// exact text. Unknown elements are passed through on decode unless
/// [`XmlCodec::deny_unknown_fields`] is enabled.
#[derive(Debug, Clone)]
pub struct XmlCodec {
    /// Spaces per indentation level; `0` writes everything on one line
    pub indent: usize,
    /// Root element name; defaults to the short type name of the value
    pub root: Option<String>,
    pub deny_unknown_fields: bool,
}

impl XmlCodec {
    pub fn new() -> Self {
        Self {
            indent: 2,
            root: None,
            deny_unknown_fields: false,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => short_type_name::<T>(),
        };

        let mut out = String::new();
        let mut ser = Serializer::with_root(&mut out, Some(root.as_str()))?;
        if self.indent > 0 {
            ser.indent(' ', self.indent);
        }
        value.serialize(ser)?;

        Ok(out.into_bytes())
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        let text = std::str::from_utf8(data)?;
        let mut de = Deserializer::from_str(text);
        if self.deny_unknown_fields {
            deserialize_strict(&mut de)
        } else {
            Ok(T::deserialize(&mut de)?)
        }
    }
}
