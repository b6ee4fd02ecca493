//! Conversion between [`ManifestInfo`] and package.json text
//!
//! The `dependencies` field is rewritten on the parsed JSON value: entries
//! become an object on the way out, and an object (or the transport array
//! form) becomes entries on the way in.

use serde_json::{Map, Value};
use tracing::warn;

use crate::manifest::dependencies::{self, normalize_entry};
use crate::manifest::error::ManifestError;
use crate::manifest::types::ManifestInfo;

const DEPENDENCIES_FIELD: &str = "dependencies";

/// Serialize `info` as package.json text with dependencies as an object.
///
/// When any dependency entry lacks a `:` separator, has an empty name or
/// repeats a name, the whole field is left out and a warning is logged.
/// The text ends with a single LF.
pub fn serialize_manifest(info: &ManifestInfo) -> Result<String, ManifestError> {
    let mut value = serde_json::to_value(info)?;
    let Value::Object(object) = &mut value else {
        return Err(ManifestError::InvalidShape(
            "manifest did not serialize to an object".to_string(),
        ));
    };

    match dependencies::to_object(&info.dependencies) {
        Ok(pairs) => {
            let deps: Map<String, Value> = pairs
                .into_iter()
                .map(|(name, version)| (name, Value::String(version)))
                .collect();
            object.insert(DEPENDENCIES_FIELD.to_string(), Value::Object(deps));
        }
        Err(malformed) => {
            warn!(
                "{} has malformed dependencies. All dependencies removed until this is fixed. \
                 Each dependency needs a unique name and a version, e.g. 'the.name.thing: 0.0.1': {}",
                info.name, malformed
            );
            object.retain(|key, _| key != DEPENDENCIES_FIELD);
        }
    }

    finish(&value)
}

/// Serialize `info` keeping dependencies as an array of self-describing strings
pub fn serialize_transport(info: &ManifestInfo) -> Result<String, ManifestError> {
    finish(&serde_json::to_value(info)?)
}

/// Parse package.json text.
///
/// Accepts `dependencies` as an object of name/version pairs or as an array
/// of self-describing strings; either way entries come back as `name: version`.
pub fn deserialize_manifest(text: &str) -> Result<ManifestInfo, ManifestError> {
    let mut value: Value = serde_json::from_str(text)?;
    let Value::Object(object) = &mut value else {
        return Err(ManifestError::InvalidShape(
            "top-level value must be an object".to_string(),
        ));
    };

    if let Some(deps) = object.get_mut(DEPENDENCIES_FIELD) {
        *deps = Value::Array(
            dependency_entries(deps)?
                .into_iter()
                .map(Value::String)
                .collect(),
        );
    }

    Ok(serde_json::from_value(value)?)
}

fn dependency_entries(deps: &Value) -> Result<Vec<String>, ManifestError> {
    match deps {
        Value::Null => Ok(Vec::new()),
        Value::Object(pairs) => {
            let pairs = pairs
                .iter()
                .map(|(name, version)| match version {
                    Value::String(version) => Ok((name.as_str(), version.as_str())),
                    other => Err(ManifestError::InvalidShape(format!(
                        "dependency '{name}' must have a string version, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dependencies::from_object(pairs))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(entry) => Ok(normalize_entry(entry)),
                other => Err(ManifestError::InvalidShape(format!(
                    "dependency entries must be strings, found {other}"
                ))),
            })
            .collect(),
        other => Err(ManifestError::InvalidShape(format!(
            "dependencies must be an object or an array, found {other}"
        ))),
    }
}

fn finish(value: &Value) -> Result<String, ManifestError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::types::Sample;
    use serde_json::json;

    fn manifest_with(dependencies: &[&str]) -> ManifestInfo {
        ManifestInfo {
            name: "com.feddas.unitymodules".to_string(),
            version: "1.0.0".to_string(),
            unity: Some("2018.2".to_string()),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn serialize_manifest_writes_dependencies_as_object() {
        let info = manifest_with(&["com.unity.standardevents: 1.0.13", "com.shawn.testing: 0.0.1"]);
        let text = serialize_manifest(&info).unwrap();

        assert_eq!(
            text,
            r#"{
  "name": "com.feddas.unitymodules",
  "version": "1.0.0",
  "unity": "2018.2",
  "dependencies": {
    "com.unity.standardevents": "1.0.13",
    "com.shawn.testing": "0.0.1"
  }
}
"#
        );
    }

    #[test]
    fn serialize_manifest_writes_empty_object_without_dependencies() {
        let text = serialize_manifest(&manifest_with(&[])).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dependencies"], json!({}));
    }

    #[test]
    fn serialize_manifest_drops_malformed_dependencies() {
        let info = manifest_with(&["a: 1.0.0", "missing-version"]);
        let text = serialize_manifest(&info).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert!(value.get("dependencies").is_none());
        assert_eq!(value["name"], "com.feddas.unitymodules");
    }

    #[test]
    fn serialize_manifest_drops_dependencies_with_repeated_name() {
        let info = manifest_with(&["a: 1.0.0", "a: 2.0.0"]);
        let text = serialize_manifest(&info).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert!(value.get("dependencies").is_none());
    }

    #[test]
    fn serialize_manifest_keeps_quotes_inside_versions() {
        let info = manifest_with(&["a: 1.0.0", r#"b: "2"x"#]);
        let text = serialize_manifest(&info).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["dependencies"], json!({ "a": "1.0.0", "b": "2\"x" }));
    }

    #[test]
    fn serialize_manifest_ends_with_single_newline() {
        let text = serialize_manifest(&manifest_with(&["a: 1.0.0"])).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn serialize_transport_keeps_dependency_array() {
        let text = serialize_transport(&manifest_with(&["a: 1.0.0"])).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dependencies"], json!(["a: 1.0.0"]));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn deserialize_manifest_reads_transport_array() {
        let text = r#"{"name":"x","dependencies":["a\": \"1.0.0","b\": \"2.0.0"],"version":"1.0.0"}"#;
        let info = deserialize_manifest(text).unwrap();

        assert_eq!(info.name, "x");
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.dependencies, vec!["a: 1.0.0", "b: 2.0.0"]);
    }

    #[test]
    fn deserialize_manifest_reads_dependency_object() {
        let text = r#"{
  "name": "my-app",
  "version": "0.3.1",
  "dependencies": {
    "lodash": "^4.17.21",
    "@types/node": "20.0.0"
  },
  "keywords": ["tools"]
}"#;
        let info = deserialize_manifest(text).unwrap();

        assert_eq!(info.dependencies, vec!["lodash: ^4.17.21", "@types/node: 20.0.0"]);
        assert_eq!(info.keywords, vec!["tools"]);
    }

    #[test]
    fn deserialize_manifest_treats_null_dependencies_as_empty() {
        let info = deserialize_manifest(r#"{"name":"x","dependencies":null}"#).unwrap();
        assert!(info.dependencies.is_empty());
    }

    #[test]
    fn deserialize_manifest_ignores_unknown_fields() {
        let info = deserialize_manifest(r#"{"name":"x","scripts":{"test":"jest"}}"#).unwrap();
        assert_eq!(info.name, "x");
    }

    #[rstest::rstest]
    #[case("not json")]
    #[case("[1, 2]")]
    #[case(r#"{"name": 5}"#)]
    #[case(r#"{"dependencies": "a"}"#)]
    #[case(r#"{"dependencies": {"a": 1}}"#)]
    #[case(r#"{"dependencies": [1]}"#)]
    fn deserialize_manifest_rejects_invalid_text(#[case] text: &str) {
        let error = deserialize_manifest(text).unwrap_err();
        assert!(error.is_parse_error(), "unexpected error: {error}");
    }

    #[test]
    fn round_trip_preserves_well_formed_manifest() {
        let info = ManifestInfo {
            display_name: Some("Unity Modules".to_string()),
            description: Some("Shared \"editor\" tools".to_string()),
            keywords: vec!["editor".to_string(), "version".to_string()],
            samples: vec![Sample {
                display_name: "Example".to_string(),
                description: "Example usage".to_string(),
                path: "Samples~/Example".to_string(),
            }],
            ..manifest_with(&["com.unity.standardevents: 1.0.13", "com.shawn.testing: 0.0.1"])
        };

        let text = serialize_manifest(&info).unwrap();
        assert_eq!(deserialize_manifest(&text).unwrap(), info);
    }
}
