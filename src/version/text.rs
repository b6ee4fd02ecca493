//! Substitution of a version string into display text

/// Key replaced by [`render_version_text`] when none is configured
pub const DEFAULT_VERSION_KEY: &str = "{v}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template has no occurrence of the key to replace
    #[error("Text '{template}' must contain the version key '{key}', e.g. 'my version is {key}'")]
    MissingKey { template: String, key: String },
}

/// Replace every occurrence of `key` in `template` with `version`.
///
/// An empty key means the whole text is the version.
pub fn render_version_text(template: &str, key: &str, version: &str) -> Result<String, TemplateError> {
    if key.is_empty() {
        return Ok(version.to_string());
    }

    if !template.contains(key) {
        return Err(TemplateError::MissingKey {
            template: template.to_string(),
            key: key.to_string(),
        });
    }

    Ok(template.replace(key, version))
}
