//! Category taxonomy loading.

use std::path::Path;

use tracing::info;
use wikicorpus_shared::{Result, Taxonomy, WikiCorpusError};

/// Read the category taxonomy from a JSON file.
///
/// The file must hold one object mapping category labels to arrays of
/// subcategory identifiers. Missing or malformed files are errors.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy> {
    let content = std::fs::read_to_string(path).map_err(|e| WikiCorpusError::io(path, e))?;

    let taxonomy: Taxonomy = serde_json::from_str(&content).map_err(|e| {
        WikiCorpusError::parse(format!("invalid taxonomy in {}: {e}", path.display()))
    })?;

    info!(
        path = %path.display(),
        categories = taxonomy.len(),
        "successfully loaded the categories from the JSON file"
    );
    Ok(taxonomy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_fixture_in_file_order() {
        let path = Path::new("../../../fixtures/categories.json");
        let taxonomy = load_taxonomy(path).expect("load fixture");

        let labels: Vec<&str> = taxonomy.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, vec!["Wirtschaft", "Sport", "Kunst"]);
        assert_eq!(
            taxonomy.0["Sport"],
            vec!["Kategorie:Sportart", "Kategorie:Sportler"]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_taxonomy(Path::new("/nonexistent/categories.json")).unwrap_err();
        assert!(matches!(err, WikiCorpusError::Io { .. }));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Wirtschaft": "Kategorie:Wirtschaft"}}"#).unwrap();

        let err = load_taxonomy(file.path()).unwrap_err();
        assert!(matches!(err, WikiCorpusError::Parse { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_taxonomy(file.path()).unwrap_err();
        assert!(matches!(err, WikiCorpusError::Parse { .. }));
    }
}
