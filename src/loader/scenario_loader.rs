use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::model::scenario::Scenario;

/// Load a scenario from a JSON or YAML file and validate the fields the
/// prompt composer depends on.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("scenario file not found: {}", path.display()))?;

    let scenario: Scenario = match extension_of(path).as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid scenario JSON: {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid scenario YAML: {}", path.display()))?,
        _ => bail!("unsupported scenario file extension: {}", path.display()),
    };

    for (field, value) in [
        ("name", &scenario.name),
        ("environment", &scenario.environment),
        ("counterpart_role", &scenario.counterpart_role),
        ("student_task", &scenario.student_task),
        ("starter_sender_name", &scenario.starter_sender_name),
        ("starter_subject", &scenario.starter_subject),
    ] {
        if value.trim().is_empty() {
            bail!(
                "scenario '{}' has an empty required field: {}",
                path.display(),
                field
            );
        }
    }

    Ok(scenario)
}

pub(super) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
