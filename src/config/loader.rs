//! Page configuration loading.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::PageConfig;

/// Error type for configuration loading.
///
/// Fatal to the configuration attempt only; a store keeps whatever
/// configuration was active before.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Shape error: {0}")]
    Shape(String),
}

/// Records that must be JSON objects, keyed by their list in the page.
const RECORD_LISTS: [&str; 3] = ["fragments", "assets", "dependencies"];

/// Deserialize a page configuration from its JSON form.
///
/// Only the object form is accepted: serde would otherwise also read a
/// struct from a positional array.
pub fn parse_page_config(raw: &str) -> Result<PageConfig, ConfigError> {
    let value: Value = serde_json::from_str(raw)?;
    require_objects(&value)?;
    let config = serde_json::from_value(value)?;
    Ok(config)
}

fn require_objects(value: &Value) -> Result<(), ConfigError> {
    let Some(root) = value.as_object() else {
        return Err(ConfigError::Shape("page configuration must be an object".into()));
    };

    for list in RECORD_LISTS {
        let Some(items) = root.get(list).and_then(Value::as_array) else {
            continue;
        };
        for (i, item) in items.iter().enumerate() {
            let Some(record) = item.as_object() else {
                return Err(ConfigError::Shape(format!("{}[{}] must be an object", list, i)));
            };
            match record.get("attributes") {
                None | Some(Value::Null) | Some(Value::Object(_)) => {}
                Some(_) => {
                    return Err(ConfigError::Shape(format!(
                        "{}[{}].attributes must be an object",
                        list, i
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Read and deserialize a page configuration file.
pub fn load_page_config(path: &Path) -> Result<PageConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_page_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_required_field() {
        // `dependencies` is required.
        let err = parse_page_config(r#"{"page": "p", "fragments": [], "assets": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_positional_forms_rejected() {
        let err = parse_page_config(r#"["p", [], [], []]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Shape(_)));

        let err = parse_page_config(
            r#"{"page": "p", "fragments": [["f", true]], "assets": [], "dependencies": []}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Shape error: fragments[0] must be an object");

        let err = parse_page_config(
            r#"{"page": "p", "fragments": [{"name": "f", "attributes": ["x"]}], "assets": [], "dependencies": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Shape(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"page": "p", "fragments": [], "assets": [], "dependencies": []}}"#
        )
        .unwrap();

        let config = load_page_config(file.path()).unwrap();
        assert_eq!(config.page, "p");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_page_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
