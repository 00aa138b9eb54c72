//! Loading the skill catalog from authored files.

use std::path::Path;

use beastarena_core::error::DomainError;
use tracing::info;

use crate::domain::catalog::SkillCatalog;

/// Source formats the catalog loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// YAML document (`.yaml` / `.yml`).
    Yaml,
    /// JSON document (`.json`).
    Json,
}

impl CatalogFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(DomainError::Content(format!(
                "unsupported catalog file: {}",
                path.display()
            ))),
        }
    }
}

/// Parses catalog source text in the given format.
///
/// # Errors
///
/// Returns `DomainError::Content` or `DomainError::Validation` if the source
/// is malformed.
pub fn parse_catalog(source: &str, format: CatalogFormat) -> Result<SkillCatalog, DomainError> {
    match format {
        CatalogFormat::Yaml => SkillCatalog::from_yaml_str(source),
        CatalogFormat::Json => SkillCatalog::from_json_str(source),
    }
}

/// Reads and parses a catalog file, picking the format from its extension.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read, and the
/// errors of [`parse_catalog`] otherwise.
pub fn load_from_path(path: &Path) -> Result<SkillCatalog, DomainError> {
    let format = CatalogFormat::from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Infrastructure(format!("failed to read {}: {e}", path.display()))
    })?;
    let catalog = parse_catalog(&source, format)?;

    info!(
        path = %path.display(),
        skills = catalog.len(),
        content_hash = catalog.content_hash(),
        "skill catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("skills.yaml")).unwrap(),
            CatalogFormat::Yaml
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("skills.YML")).unwrap(),
            CatalogFormat::Yaml
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("skills.json")).unwrap(),
            CatalogFormat::Json
        );
    }

    #[test]
    fn test_unknown_extension_is_content_error() {
        assert!(matches!(
            CatalogFormat::from_path(Path::new("skills.toml")),
            Err(DomainError::Content(_))
        ));
        assert!(matches!(
            CatalogFormat::from_path(Path::new("skills")),
            Err(DomainError::Content(_))
        ));
    }

    #[test]
    fn test_missing_file_is_infrastructure_error() {
        let result = load_from_path(Path::new("/nonexistent/beastarena/skills.yaml"));
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_load_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "beastarena-catalog-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"skills":[{"id":"bite","name":"Bite","category":"active","trigger_rate":0.5}]}"#,
        )
        .unwrap();

        let catalog = load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_parse_catalog_dispatches_on_format() {
        let yaml = "skills:\n  - id: bite\n    name: Bite\n    category: active\n";
        let catalog = parse_catalog(yaml, CatalogFormat::Yaml).unwrap();
        assert!(catalog.get("bite").is_some());
        assert!(parse_catalog(yaml, CatalogFormat::Json).is_err());
    }
}
