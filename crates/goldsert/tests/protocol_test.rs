use goldsert::{
    normalize_line_breaks, ArtifactName, Codec, CodecError, Equivalence, Failure, Format, Goldsert,
    GoldsertError, JsonCodec, MemoryStore, ReferenceStore, Scope, Verification, XmlCodec, YamlCodec,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: String,
    title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct MyStruct {
    #[serde(rename = "Public")]
    public: String,
    #[serde(skip)]
    internal: String,
}

fn entry() -> Entry {
    Entry {
        id: "x".to_string(),
        title: "y".to_string(),
    }
}

const FORMATS: [Format; 3] = [Format::Json, Format::Yaml, Format::Xml];

fn verify<V, E>(
    gs: &Goldsert,
    store: &MemoryStore,
    scope: &Scope,
    format: Format,
    value: &V,
    expected: &E,
) -> Result<Verification, GoldsertError>
where
    V: Serialize + std::fmt::Debug,
    E: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    match format {
        Format::Json => gs.json_marshaling_p(store, scope, value, expected),
        Format::Yaml => gs.yaml_marshaling_p(store, scope, value, expected),
        Format::Xml => gs.xml_marshaling_p(store, scope, value, expected),
    }
}

fn encode<V: Serialize>(format: Format, value: &V) -> Vec<u8> {
    let encoded = match format {
        Format::Json => JsonCodec::new().encode(value),
        Format::Yaml => YamlCodec::new().encode(value),
        Format::Xml => XmlCodec::new().encode(value),
    };
    encoded.unwrap()
}

#[test]
fn test_id_title_json_two_space_indent() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::recording();
    let scope = Scope::new("id_title");

    let verification = goldsert.json_marshaling(&store, &scope, &entry()).unwrap();
    verification.assert_passed();

    let recorded = store.read(&verification.artifact).unwrap();
    assert_eq!(
        String::from_utf8(recorded.clone()).unwrap(),
        "{\n  \"id\": \"x\",\n  \"title\": \"y\"\n}\n"
    );
    let decoded: Entry = JsonCodec::new().decode(&recorded).unwrap();
    assert_eq!(decoded, entry());
}

#[test]
fn test_internal_field_is_not_marshaled() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::recording();
    let value = MyStruct {
        public: "a".to_string(),
        internal: "secret".to_string(),
    };
    let want = MyStruct {
        public: "a".to_string(),
        internal: String::new(),
    };

    for format in FORMATS {
        let scope = Scope::new("internal_field").child(format.as_str());
        let verification = verify(&goldsert, &store, &scope, format, &value, &want).unwrap();
        verification.assert_passed();

        let recorded = String::from_utf8(store.read(&verification.artifact).unwrap()).unwrap();
        assert!(!recorded.contains("secret"), "{format}: {recorded}");
    }
}

#[test]
fn test_asymmetric_expectation_must_match_decoded_value() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::recording();
    let value = MyStruct {
        public: "a".to_string(),
        internal: "b".to_string(),
    };

    for format in FORMATS {
        let scope = Scope::new("asymmetric").child(format.as_str());

        // Decoding can never restore the internal field
        let verification = verify(&goldsert, &store, &scope, format, &value, &value).unwrap();
        assert_eq!(verification.failures().len(), 1, "{format}");
        match &verification.failures()[0] {
            Failure::Decoded {
                format: failed,
                expected,
                actual,
                ..
            } => {
                assert_eq!(*failed, format);
                assert!(expected.contains("internal: \"b\""));
                assert!(actual.contains("internal: \"\""));
            }
            other => panic!("unexpected failure: {other}"),
        }
    }
}

#[test]
fn test_crlf_reference_matches_lf_encoding() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();

    for format in FORMATS {
        let scope = Scope::new("crlf").child(format.as_str());
        let lf = String::from_utf8(encode(format, &entry())).unwrap();
        let crlf = lf.replace('\n', "\r\n");
        assert_ne!(lf, crlf);
        store.insert(
            &ArtifactName::new(scope.clone(), format.artifact_name()),
            crlf,
        );

        let verification = verify(&goldsert, &store, &scope, format, &entry(), &entry()).unwrap();
        assert!(
            verification.passed(),
            "{format}: {:?}",
            verification.failures()
        );
        assert!(!verification.updated);
    }
}

#[test]
fn test_update_mode_reads_back_what_it_wrote() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::recording();

    for format in FORMATS {
        let scope = Scope::new("write_then_read");
        let artifact = ArtifactName::new(scope.clone(), format.artifact_name());
        store.insert(&artifact, "stale content from an older run");

        let verification = verify(&goldsert, &store, &scope, format, &entry(), &entry()).unwrap();
        verification.assert_passed();
        assert!(verification.updated);
        assert_eq!(
            store.read(&artifact).unwrap(),
            normalize_line_breaks(&encode(format, &entry()))
        );
    }
}

#[test]
fn test_missing_artifact_fails_for_every_format() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();

    for format in FORMATS {
        let scope = Scope::new("missing").child(format.as_str());
        let err = verify(&goldsert, &store, &scope, format, &entry(), &entry()).unwrap_err();
        match err {
            GoldsertError::NotFound { artifact, location } => {
                assert_eq!(
                    artifact,
                    format!("missing/{}/{}", format.as_str(), format.artifact_name())
                );
                assert_eq!(location, format!("memory://{}", artifact));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    assert!(store.is_empty());
}

#[test]
fn test_reordered_keys_in_golden_file() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();
    let scope = Scope::new("reordered");
    store.insert(
        &ArtifactName::new(scope.clone(), "goldsert_json"),
        r#"{"title":"y","id":"x"}"#,
    );
    store.insert(
        &ArtifactName::new(scope.clone(), "goldsert_yaml"),
        "title: \"y\"\nid: x\n",
    );

    goldsert
        .json_marshaling(&store, &scope, &entry())
        .unwrap()
        .assert_passed();
    goldsert
        .yaml_marshaling(&store, &scope, &entry())
        .unwrap()
        .assert_passed();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Measure {
    n: f64,
}

#[test]
fn test_integral_golden_number_matches_float() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();
    let scope = Scope::new("integral_number");
    store.insert(
        &ArtifactName::new(scope.clone(), "goldsert_json"),
        "{\"n\": 1}\n",
    );
    store.insert(&ArtifactName::new(scope.clone(), "goldsert_yaml"), "n: 1\n");

    let value = Measure { n: 1.0 };
    goldsert
        .json_marshaling(&store, &scope, &value)
        .unwrap()
        .assert_passed();
    goldsert
        .yaml_marshaling(&store, &scope, &value)
        .unwrap()
        .assert_passed();

    let verification = goldsert
        .json_marshaling(&store, &scope, &Measure { n: 1.5 })
        .unwrap();
    assert_eq!(verification.failures().len(), 2);
}

#[test]
fn test_serialized_mismatch_is_not_fatal() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();
    let scope = Scope::new("mismatch");
    let golden = Entry {
        id: "x".to_string(),
        title: "old".to_string(),
    };
    store.insert(
        &ArtifactName::new(scope.clone(), "goldsert_xml"),
        encode(Format::Xml, &golden),
    );

    let verification = goldsert.xml_marshaling(&store, &scope, &entry()).unwrap();
    let failures = verification.failures();
    assert_eq!(failures.len(), 2);
    assert!(matches!(
        &failures[0],
        Failure::Serialized {
            format: Format::Xml,
            ..
        }
    ));
    assert!(matches!(
        &failures[1],
        Failure::Decoded {
            format: Format::Xml,
            ..
        }
    ));
}

#[test]
fn test_invalid_golden_json_fails_to_unmarshal() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();
    let scope = Scope::new("invalid_json");
    let artifact = ArtifactName::new(scope.clone(), "goldsert_json");
    store.insert(&artifact, "{\"id\": \"x\",");

    // The comparison fails first, then decoding the same bytes is fatal
    let err = goldsert
        .json_marshaling(&store, &scope, &entry())
        .unwrap_err();
    match err {
        GoldsertError::Decode {
            format, location, ..
        } => {
            assert_eq!(format, Format::Json);
            assert_eq!(location, store.location(&artifact));
        }
        other => panic!("unexpected error: {other}"),
    }

    let codec = JsonCodec::new();
    assert!(matches!(
        codec.equivalent(b"{\"id\": \"x\",", &codec.encode(&entry()).unwrap()),
        Equivalence::Invalid(_)
    ));
}

#[test]
fn test_unknown_field_in_golden_file_is_fatal() {
    let goldsert = Goldsert::new();
    let store = MemoryStore::new();
    let scope = Scope::new("unknown_field");
    store.insert(
        &ArtifactName::new(scope.clone(), "goldsert_yaml"),
        "id: x\ntitle: y\nsubtitle: z\n",
    );

    let err = goldsert
        .yaml_marshaling(&store, &scope, &entry())
        .unwrap_err();
    match err {
        GoldsertError::Decode {
            format: Format::Yaml,
            source: CodecError::UnknownFields(fields),
            ..
        } => assert_eq!(fields, vec!["subtitle".to_string()]),
        other => panic!("unexpected error: {other}"),
    }

    let lenient = Goldsert::new().with_yaml(YamlCodec::new().with_deny_unknown_fields(false));
    let verification = lenient.yaml_marshaling(&store, &scope, &entry()).unwrap();
    assert_eq!(verification.failures().len(), 1);
    assert!(matches!(
        &verification.failures()[0],
        Failure::Serialized { .. }
    ));
}

/// Wraps the default JSON codec but writes four-space indentation and
/// compares golden files as exact text.
struct ExactJson(JsonCodec);

impl Codec for ExactJson {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.0.encode(value)
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        self.0.decode(data)
    }
}

#[test]
fn test_custom_codec() {
    let goldsert = Goldsert::new().with_json(ExactJson(JsonCodec::new().with_indent(4)));
    let store = MemoryStore::recording();
    let scope = Scope::new("custom_codec");

    let verification = goldsert.json_marshaling(&store, &scope, &entry()).unwrap();
    verification.assert_passed();
    assert_eq!(
        store.read(&verification.artifact).unwrap(),
        b"{\n    \"id\": \"x\",\n    \"title\": \"y\"\n}\n"
    );

    // Key order now matters
    let store = store.with_update_mode(false);
    store.insert(&verification.artifact, r#"{"title":"y","id":"x"}"#);
    let verification = goldsert.json_marshaling(&store, &scope, &entry()).unwrap();
    assert_eq!(verification.failures().len(), 1);
}
