//! Engine release strings used to seed new manifests

/// Reduce an engine release such as `2018.2.0f2` to its `major.minor` prefix.
///
/// Package managers of 2019.1 and later reject the patch suffix in a
/// manifest's engine field. Input with fewer than two segments is returned
/// unchanged.
pub fn release_prefix(engine_version: &str) -> String {
    let mut segments = engine_version.trim().split('.');
    match (segments.next(), segments.next()) {
        (Some(major), Some(minor)) => format!("{major}.{minor}"),
        _ => engine_version.trim().to_string(),
    }
}
