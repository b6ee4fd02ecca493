use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

/// Number of dot-separated components in a semantic version
pub const COMPONENT_COUNT: usize = 3;

const ORDINALS: [&str; COMPONENT_COUNT] = ["1st", "2nd", "3rd"];

/// A `major.minor.patch` version with fixed-width numeric components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn from_components(components: [u32; COMPONENT_COUNT]) -> Self {
        let [major, minor, patch] = components;
        Self::new(major, minor, patch)
    }

    /// Components in `[major, minor, patch]` order
    pub fn components(&self) -> [u32; COMPONENT_COUNT] {
        [self.major, self.minor, self.patch]
    }

    /// Compact form with each component clamped to 255
    pub fn to_bytes(&self) -> [u8; COMPONENT_COUNT] {
        self.components()
            .map(|component| u8::try_from(component).unwrap_or(u8::MAX))
    }

    /// Returns the next patch version. Saturates at `u32::MAX`.
    pub fn bump_patch(&self) -> Self {
        Self {
            patch: self.patch.saturating_add(1),
            ..*self
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned by the strict [`FromStr`] implementation of [`Version`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not a canonical major.minor.patch version: {0}")]
pub struct InvalidVersion(pub String);

impl FromStr for Version {
    type Err = InvalidVersion;

    /// Strict parse: only input that [`parse_version`] accepts without
    /// rewriting is valid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_version(s);
        if parsed.is_dirty() {
            return Err(InvalidVersion(s.to_string()));
        }
        Ok(parsed.version)
    }
}

/// Result of the lenient version parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub version: Version,
    /// Canonical replacement string, present only when the input had to be rewritten
    pub normalized: Option<String>,
}

impl ParsedVersion {
    /// Whether the input differed from its canonical form
    pub fn is_dirty(&self) -> bool {
        self.normalized.is_some()
    }
}

/// Parse a version string into exactly three numeric components.
///
/// Never fails. Missing or unparsable components become 0, and any such
/// fallback (or more than three segments) marks the input dirty so that the
/// caller replaces it with the canonical string in `normalized`.
///
/// Examples:
/// - "1.2.3" -> 1.2.3, clean
/// - "1.2" -> 1.2.0, normalized to "1.2.0"
/// - "1.x.3" -> 1.0.3, normalized to "1.0.3"
/// - "1.2.3.4" -> 1.2.3, normalized to "1.2.3"
pub fn parse_version(input: &str) -> ParsedVersion {
    let segments: Vec<&str> = input.split('.').collect();
    let mut dirty = segments.len() > COMPONENT_COUNT;
    if dirty {
        warn!(
            "Ignoring {} extra version segment(s) in '{}'",
            segments.len() - COMPONENT_COUNT,
            input
        );
    }

    let mut components = [0u32; COMPONENT_COUNT];
    for (index, component) in components.iter_mut().enumerate() {
        let Some(segment) = segments.get(index) else {
            warn!(
                "Version '{}' has no {} element, using 0",
                input, ORDINALS[index]
            );
            dirty = true;
            continue;
        };

        match segment.parse::<u32>() {
            Ok(value) => *component = value,
            Err(_) => {
                warn!(
                    "Version value unacceptable. The {} element ({}) must be parsable as an integer in '{}'",
                    ORDINALS[index], segment, input
                );
                dirty = true;
            }
        }
    }

    let version = Version::from_components(components);
    ParsedVersion {
        version,
        normalized: dirty.then(|| version.to_string()),
    }
}

/// Parse `version` and overwrite it with its canonical form when dirty
pub fn normalize_version(version: &mut String) -> Version {
    let parsed = parse_version(version);
    if let Some(normalized) = parsed.normalized {
        debug!("Normalized version '{}' to '{}'", version, normalized);
        *version = normalized;
    }
    parsed.version
}
