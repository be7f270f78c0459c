use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::rubric::{RubricDefinition, RubricItem};
use crate::loader::scenario_loader::extension_of;

/// Rubric files come in two shapes: a full object with metadata, or a
/// bare list of items.
#[derive(Deserialize)]
#[serde(untagged)]
enum RubricFile {
    Full {
        #[serde(default)]
        name: String,
        #[serde(default)]
        description: String,
        items: Vec<RubricItem>,
    },
    Items(Vec<RubricItem>),
}

/// Load a rubric from a JSON or YAML file. The rubric name falls back to
/// the file stem when the file does not carry one.
pub fn load_rubric(path: impl AsRef<Path>) -> Result<RubricDefinition> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("rubric file not found: {}", path.display()))?;

    let raw: RubricFile = match extension_of(path).as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid rubric JSON: {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid rubric YAML: {}", path.display()))?,
        _ => bail!("unsupported rubric file extension: {}", path.display()),
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rubric")
        .to_string();

    let definition = match raw {
        RubricFile::Full {
            name,
            description,
            items,
        } => RubricDefinition {
            name: if name.trim().is_empty() { stem } else { name },
            description,
            items,
        },
        RubricFile::Items(items) => RubricDefinition {
            name: stem,
            description: String::new(),
            items,
        },
    };

    if definition.items.is_empty() {
        bail!("rubric '{}' must include at least one item", path.display());
    }
    for (idx, item) in definition.items.iter().enumerate() {
        if item.name.trim().is_empty() || item.description.trim().is_empty() {
            bail!(
                "rubric '{}' item #{} is missing a name or description",
                path.display(),
                idx + 1
            );
        }
    }

    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_object_form_with_metadata() {
        let json = r#"{
            "name": "Writing basics",
            "description": "Core writing checks",
            "items": [
                {"name": "Tone", "description": "Polite.", "max_score": 4},
                {"name": "Clarity", "description": "Short sentences."}
            ]
        }"#;
        let file = write_temp(".json", json);
        let rubric = load_rubric(file.path()).unwrap();
        assert_eq!(rubric.name, "Writing basics");
        assert_eq!(rubric.items[0].max_score, 4);
        assert_eq!(rubric.items[1].max_score, 5);
    }

    #[test]
    fn bare_list_takes_name_from_file_stem() {
        let yaml = "\
- name: Tone
  description: Polite.
";
        let file = write_temp(".yml", yaml);
        let rubric = load_rubric(file.path()).unwrap();
        let stem = file
            .path()
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(rubric.name, stem);
        assert_eq!(rubric.items.len(), 1);
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let file = write_temp(".json", r#"{"items": []}"#);
        assert!(load_rubric(file.path()).is_err());
    }

    #[test]
    fn item_without_description_is_rejected() {
        let file = write_temp(".json", r#"[{"name": "Tone", "description": ""}]"#);
        let err = load_rubric(file.path()).unwrap_err();
        assert!(err.to_string().contains("item #1"));
    }
}
