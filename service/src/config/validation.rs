//! Value checks for a loaded [`ArtifactConfig`]

use linkml_core::{LinkMLError, Result};

use super::ArtifactConfig;

/// Reject configuration values the generators cannot work with
///
/// # Errors
///
/// Returns `LinkMLError::ConfigError` naming the first offending key
pub fn validate_values(config: &ArtifactConfig) -> Result<()> {
    let type_name = &config.i18n.type_name;
    let is_identifier = type_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && type_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !is_identifier {
        return Err(LinkMLError::config(format!(
            "i18n.type_name must be a TypeScript identifier, got '{type_name}'"
        )));
    }

    if config.i18n.map_type.trim().is_empty() {
        return Err(LinkMLError::config("i18n.map_type must not be empty"));
    }
    if config.i18n.language_marker.trim().is_empty() {
        return Err(LinkMLError::config("i18n.language_marker must not be empty"));
    }
    if !config.context.version.is_finite() || config.context.version <= 0.0 {
        return Err(LinkMLError::config(format!(
            "context.version must be a positive number, got {}",
            config.context.version
        )));
    }
    if config.docs.schema_extensions.is_empty() {
        return Err(LinkMLError::config(
            "docs.schema_extensions must list at least one extension",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_values(&ArtifactConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ArtifactConfig::default();
        config.i18n.type_name = "I18N String".to_string();
        assert!(matches!(
            validate_values(&config),
            Err(LinkMLError::ConfigError(_))
        ));

        let mut config = ArtifactConfig::default();
        config.docs.schema_extensions.clear();
        assert!(validate_values(&config).is_err());

        let mut config = ArtifactConfig::default();
        config.context.version = 0.0;
        assert!(validate_values(&config).is_err());
    }
}
