use crate::codec::{shape_name, Codec, Equivalence, JsonCodec, XmlCodec, YamlCodec};
use crate::error::{GoldsertError, Result};
use crate::normalize::normalize_line_breaks;
use crate::report::{Failure, Verification};
use crate::scope::Scope;
use crate::store::{ArtifactName, ReferenceStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Round-trip verifier holding the codec for each format.
///
/// Every assertion runs in two stages. First the value is marshaled and
/// compared against the golden artifact for the format. Then the golden
/// artifact (never the freshly marshaled bytes) is unmarshaled into a new
/// instance and compared field by field against the expected value.
///
/// Codecs are replaced with [`Goldsert::with_json`], [`Goldsert::with_yaml`]
/// and [`Goldsert::with_xml`]. Configure an instance once and share it; it
/// has no interior mutability.
#[derive(Debug, Clone)]
pub struct Goldsert<J = JsonCodec, Y = YamlCodec, X = XmlCodec> {
    json: J,
    yaml: Y,
    xml: X,
    normalize_line_breaks: bool,
}

impl Goldsert {
    /// Default codecs (two-space indentation, strict JSON and YAML decoding)
    /// with line-break normalization enabled.
    pub fn new() -> Self {
        Self {
            json: JsonCodec::new(),
            yaml: YamlCodec::new(),
            xml: XmlCodec::new(),
            normalize_line_breaks: true,
        }
    }
}

impl Default for Goldsert {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: Codec, Y: Codec, X: Codec> Goldsert<J, Y, X> {
    pub fn with_json<C: Codec>(self, json: C) -> Goldsert<C, Y, X> {
        Goldsert {
            json,
            yaml: self.yaml,
            xml: self.xml,
            normalize_line_breaks: self.normalize_line_breaks,
        }
    }

    pub fn with_yaml<C: Codec>(self, yaml: C) -> Goldsert<J, C, X> {
        Goldsert {
            json: self.json,
            yaml,
            xml: self.xml,
            normalize_line_breaks: self.normalize_line_breaks,
        }
    }

    pub fn with_xml<C: Codec>(self, xml: C) -> Goldsert<J, Y, C> {
        Goldsert {
            json: self.json,
            yaml: self.yaml,
            xml,
            normalize_line_breaks: self.normalize_line_breaks,
        }
    }

    /// Replace CRLF and CR line breaks with LF in both the marshaled output
    /// and the golden artifact before comparing them.
    pub fn normalize_line_breaks(mut self, enabled: bool) -> Self {
        self.normalize_line_breaks = enabled;
        self
    }

    pub fn normalizes_line_breaks(&self) -> bool {
        self.normalize_line_breaks
    }

    pub fn json(&self) -> &J {
        &self.json
    }

    pub fn yaml(&self) -> &Y {
        &self.yaml
    }

    pub fn xml(&self) -> &X {
        &self.xml
    }

    /// JSON round trip for values that do not change when marshaled and
    /// unmarshaled.
    pub fn json_marshaling<S, T>(&self, store: &S, scope: &Scope, value: &T) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        self.json_marshaling_p(store, scope, value, value)
    }

    /// JSON round trip where unmarshaling the golden file must produce
    /// `expected` instead of `value`.
    ///
    /// `expected` is taken by reference; owned values are rejected at
    /// compile time:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope};
    ///
    /// let store = MemoryStore::recording();
    /// Goldsert::new()
    ///     .json_marshaling_p(&store, &Scope::new("t"), &true, true)
    ///     .unwrap();
    /// ```
    pub fn json_marshaling_p<S, V, E>(
        &self,
        store: &S,
        scope: &Scope,
        value: &V,
        expected: &E,
    ) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        self.verify_with(&self.json, store, scope, value, expected)
    }

    /// YAML round trip for values that do not change when marshaled and
    /// unmarshaled.
    pub fn yaml_marshaling<S, T>(&self, store: &S, scope: &Scope, value: &T) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        self.yaml_marshaling_p(store, scope, value, value)
    }

    /// YAML round trip where unmarshaling the golden file must produce
    /// `expected` instead of `value`.
    ///
    /// ```
    /// use goldsert::{Goldsert, MemoryStore, Scope};
    ///
    /// let store = MemoryStore::recording();
    /// Goldsert::new()
    ///     .yaml_marshaling_p(&store, &Scope::new("t"), &true, &true)
    ///     .unwrap()
    ///     .assert_passed();
    /// ```
    ///
    /// An owned `expected` does not compile:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope};
    ///
    /// let store = MemoryStore::recording();
    /// Goldsert::new()
    ///     .yaml_marshaling_p(&store, &Scope::new("t"), &true, true)
    ///     .unwrap();
    /// ```
    pub fn yaml_marshaling_p<S, V, E>(
        &self,
        store: &S,
        scope: &Scope,
        value: &V,
        expected: &E,
    ) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        self.verify_with(&self.yaml, store, scope, value, expected)
    }

    /// XML round trip for values that do not change when marshaled and
    /// unmarshaled.
    pub fn xml_marshaling<S, T>(&self, store: &S, scope: &Scope, value: &T) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        self.xml_marshaling_p(store, scope, value, value)
    }

    /// XML round trip where unmarshaling the golden file must produce
    /// `expected` instead of `value`.
    ///
    /// ```
    /// use goldsert::{Goldsert, MemoryStore, Scope};
    ///
    /// let store = MemoryStore::recording();
    /// Goldsert::new()
    ///     .xml_marshaling_p(&store, &Scope::new("t"), &true, &true)
    ///     .unwrap()
    ///     .assert_passed();
    /// ```
    ///
    /// An owned `expected` does not compile:
    ///
    /// ```compile_fail
    /// use goldsert::{Goldsert, MemoryStore, Scope};
    ///
    /// let store = MemoryStore::recording();
    /// Goldsert::new()
    ///     .xml_marshaling_p(&store, &Scope::new("t"), &true, true)
    ///     .unwrap();
    /// ```
    pub fn xml_marshaling_p<S, V, E>(
        &self,
        store: &S,
        scope: &Scope,
        value: &V,
        expected: &E,
    ) -> Result<Verification>
    where
        S: ReferenceStore + ?Sized,
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        self.verify_with(&self.xml, store, scope, value, expected)
    }

    /// Run the round trip with an arbitrary codec.
    ///
    /// Returns `Err` for fatal conditions (marshal or unmarshal failure,
    /// missing golden artifact, store failure). Mismatches are collected in
    /// [`Verification::failures`].
    pub fn verify_with<C, S, V, E>(
        &self,
        codec: &C,
        store: &S,
        scope: &Scope,
        value: &V,
        expected: &E,
    ) -> Result<Verification>
    where
        C: Codec + ?Sized,
        S: ReferenceStore + ?Sized,
        V: Serialize + Debug + ?Sized,
        E: DeserializeOwned + PartialEq + Debug,
    {
        let format = codec.format();
        let artifact = ArtifactName::new(scope.clone(), format.artifact_name());
        let location = store.location(&artifact);

        let marshaled = codec
            .encode(value)
            .map_err(|source| GoldsertError::Encode {
                format,
                shape: shape_name::<V>().to_string(),
                value: format!("{:?}", value),
                source,
            })?;
        let marshaled = self.normalize(marshaled);

        let updated = store.is_update_mode();
        if updated {
            tracing::info!("Updating golden file {}", location);
            store.write(&artifact, &marshaled)?;
        }

        let gold = self.normalize(store.read(&artifact)?);

        let mut failures = Vec::new();
        let serialized_failure = |reason, differences| Failure::Serialized {
            format,
            location: location.clone(),
            reason,
            reference: String::from_utf8_lossy(&gold).into_owned(),
            encoded: String::from_utf8_lossy(&marshaled).into_owned(),
            differences,
        };
        match codec.equivalent(&gold, &marshaled) {
            Equivalence::Equal => {
                tracing::debug!("{} marshaling matches {}", format, location);
            }
            Equivalence::Different(differences) => {
                tracing::warn!("{} marshaling differs from {}", format, location);
                failures.push(serialized_failure(None, differences));
            }
            Equivalence::Invalid(reason) => {
                tracing::warn!(
                    "{} marshaling not comparable with {}: {}",
                    format,
                    location,
                    reason
                );
                failures.push(serialized_failure(Some(reason), Vec::new()));
            }
        }

        let got: E = codec.decode(&gold).map_err(|source| GoldsertError::Decode {
            format,
            shape: shape_name::<E>().to_string(),
            location: location.clone(),
            source,
        })?;

        if got != *expected {
            tracing::warn!(
                "{} unmarshaling of {} does not match expected object",
                format,
                location
            );
            failures.push(Failure::Decoded {
                format,
                shape: shape_name::<E>().to_string(),
                location: location.clone(),
                expected: format!("{:#?}", expected),
                actual: format!("{:#?}", got),
            });
        }

        Ok(Verification {
            format,
            artifact,
            location,
            updated,
            failures,
        })
    }

    fn normalize(&self, data: Vec<u8>) -> Vec<u8> {
        if self.normalize_line_breaks {
            normalize_line_breaks(&data)
        } else {
            data
        }
    }
}
