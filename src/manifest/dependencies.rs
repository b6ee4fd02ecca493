//! Dependency entries and their two manifest encodings
//!
//! On disk `dependencies` is an object of `"name": "version"` pairs. In
//! memory each dependency is a single self-describing string, `name: version`.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Splits an entry at its first `:`, tolerating the quoted `name": "version` form
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^\s*"?(?P<name>[^:]*?)"?\s*:\s*(?P<version>.*?)\s*$"#)
        .expect("dependency entry pattern is valid")
});

/// Why an entry cannot be written as a name/version pair
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedDependency {
    #[error("'{0}' has no ':' between name and version")]
    MissingSeparator(String),

    #[error("'{0}' has an empty name")]
    EmptyName(String),

    #[error("'{entry}' repeats the dependency name '{name}'")]
    DuplicateName { entry: String, name: String },
}

/// One dependency split into its name and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
}

impl DependencyEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a self-describing entry at its first `:`.
    ///
    /// A version opening with a quote loses that quote and a closing one, if
    /// present. Other quotes are kept.
    pub fn parse(entry: &str) -> Result<Self, MalformedDependency> {
        let captures = ENTRY_PATTERN
            .captures(entry)
            .ok_or_else(|| MalformedDependency::MissingSeparator(entry.to_string()))?;

        let name = captures
            .name("name")
            .map_or("", |m| m.as_str().trim().trim_matches('"'));
        if name.is_empty() {
            return Err(MalformedDependency::EmptyName(entry.to_string()));
        }

        let version = captures.name("version").map_or("", |m| m.as_str());
        let version = match version.strip_prefix('"') {
            Some(quoted) => quoted.strip_suffix('"').unwrap_or(quoted),
            None => version,
        };
        Ok(Self::new(name, version))
    }
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.version)
    }
}

/// Convert entries to an ordered name -> version map.
///
/// Fails on the first entry that is malformed or repeats an earlier name.
pub fn to_object(entries: &[String]) -> Result<IndexMap<String, String>, MalformedDependency> {
    let mut object = IndexMap::with_capacity(entries.len());
    for entry in entries {
        let dep = DependencyEntry::parse(entry)?;
        if object.contains_key(&dep.name) {
            return Err(MalformedDependency::DuplicateName {
                entry: entry.clone(),
                name: dep.name,
            });
        }
        object.insert(dep.name, dep.version);
    }
    Ok(object)
}

/// Convert an ordered name -> version map back to self-describing entries
pub fn from_object<'a, I>(pairs: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, version)| DependencyEntry::new(name, version).to_string())
        .collect()
}

/// Canonicalize an entry from the array encoding.
///
/// `name": "version` and `name:version` both become `name: version`; entries
/// that cannot be split are kept as written.
pub fn normalize_entry(entry: &str) -> String {
    DependencyEntry::parse(entry)
        .map(|dep| dep.to_string())
        .unwrap_or_else(|_| entry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("com.unity.standardevents: 1.0.13", "com.unity.standardevents", "1.0.13")]
    #[case(r#"com.unity.standardevents": "1.0.13"#, "com.unity.standardevents", "1.0.13")]
    #[case(r#""lodash": "^4.17.21""#, "lodash", "^4.17.21")]
    #[case("a:1.0.0", "a", "1.0.0")]
    #[case("@types/node : 20.0.0", "@types/node", "20.0.0")]
    #[case("local: file:../local", "local", "file:../local")]
    #[case("pending:", "pending", "")]
    #[case(r#"b: "2"x"#, "b", r#"2"x"#)]
    #[case(r#"c: say "hi""#, "c", r#"say "hi""#)]
    fn parse_splits_name_and_version(
        #[case] input: &str,
        #[case] name: &str,
        #[case] version: &str,
    ) {
        assert_eq!(
            DependencyEntry::parse(input),
            Ok(DependencyEntry::new(name, version))
        );
    }

    #[rstest]
    #[case("com.unity.standardevents", MalformedDependency::MissingSeparator("com.unity.standardevents".to_string()))]
    #[case("", MalformedDependency::MissingSeparator(String::new()))]
    #[case(": 1.0.0", MalformedDependency::EmptyName(": 1.0.0".to_string()))]
    #[case(r#"  "": 1.0.0"#, MalformedDependency::EmptyName(r#"  "": 1.0.0"#.to_string()))]
    fn parse_rejects_malformed_entries(#[case] input: &str, #[case] expected: MalformedDependency) {
        assert_eq!(DependencyEntry::parse(input), Err(expected));
    }

    #[test]
    fn to_object_preserves_order() {
        let entries = vec!["b: 2.0.0".to_string(), "a: 1.0.0".to_string()];
        let object = to_object(&entries).unwrap();
        assert_eq!(
            object.into_iter().collect::<Vec<_>>(),
            vec![
                ("b".to_string(), "2.0.0".to_string()),
                ("a".to_string(), "1.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn to_object_reports_first_malformed_entry() {
        let entries = vec![
            "a: 1.0.0".to_string(),
            "broken".to_string(),
            "also-broken".to_string(),
        ];
        assert_eq!(
            to_object(&entries),
            Err(MalformedDependency::MissingSeparator("broken".to_string()))
        );
    }

    #[test]
    fn to_object_rejects_repeated_name() {
        let entries = vec!["a: 1.0.0".to_string(), "a: 2.0.0".to_string()];
        assert_eq!(
            to_object(&entries),
            Err(MalformedDependency::DuplicateName {
                entry: "a: 2.0.0".to_string(),
                name: "a".to_string(),
            })
        );
    }

    #[test]
    fn to_object_accepts_empty() {
        assert!(to_object(&[]).unwrap().is_empty());
    }

    #[test]
    fn from_object_joins_with_colon() {
        assert_eq!(
            from_object([("a", "1.0.0"), ("b", "2.0.0")]),
            vec!["a: 1.0.0".to_string(), "b: 2.0.0".to_string()]
        );
    }

    #[rstest]
    #[case(r#"a": "1.0.0"#, "a: 1.0.0")]
    #[case("a:1.0.0", "a: 1.0.0")]
    #[case("bare-name", "bare-name")]
    fn normalize_entry_canonicalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_entry(input), expected);
    }
}
