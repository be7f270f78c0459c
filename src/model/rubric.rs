use serde::{Deserialize, Serialize};

fn default_max_score() -> i64 {
    5
}

/// One grading dimension. Defined externally, consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricItem {
    pub name: String,
    pub description: String,
    #[serde(default = "default_max_score")]
    pub max_score: i64,
}

impl RubricItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            max_score: default_max_score(),
        }
    }
}

/// Complete rubric definition returned by the loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<RubricItem>,
}

/// Built-in rubric reused across all scenarios when no file is supplied.
pub fn global_rubric() -> RubricDefinition {
    RubricDefinition {
        name: "Global email etiquette rubric".to_string(),
        description: "Default dimensions applied to every scenario.".to_string(),
        items: vec![
            RubricItem::new(
                "Tone & respect",
                "Email is polite and respectful, not too casual or emotional.",
            ),
            RubricItem::new(
                "Clarity & conciseness",
                "Message is easy to understand and not too long.",
            ),
            RubricItem::new(
                "Structure",
                "Email has a clear greeting, organized body, and proper closing.",
            ),
            RubricItem::new(
                "Professionalism & responsibility",
                "Student takes responsibility where needed and shows commitment.",
            ),
            RubricItem::new(
                "Task fulfillment",
                "Student clearly answers the request or makes a clear ask.",
            ),
        ],
    }
}
