use serde::{Deserialize, Serialize};

/// A configured role-play context driving prompt generation.
///
/// Required fields must be non-empty; the loaders enforce that before a
/// scenario ever reaches the engine. The optional fields default to empty
/// strings when absent from the scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub environment: String,
    pub counterpart_role: String,
    #[serde(default)]
    pub counterpart_style: String,
    pub student_task: String,
    #[serde(default)]
    pub grading_focus: String,
    pub starter_sender_name: String,
    pub starter_subject: String,
    /// Pre-authored first email. When non-empty, starter generation is
    /// skipped entirely.
    #[serde(default)]
    pub starter_email_body: String,
    #[serde(default)]
    pub starter_email_generation_hint: String,
}

/// Learner-context block substituted into every prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortProfile {
    pub program: String,
    pub learner_background: String,
    pub english_level: String,
    pub remote_context: String,
    pub employer_region: String,
}

impl Default for CohortProfile {
    fn default() -> Self {
        Self {
            program: "BYU-Pathway Worldwide".to_string(),
            learner_background: "Most learners are from developing countries, improving their \
                                 earning ability through remote work, and are non-native English \
                                 speakers."
                .to_string(),
            english_level: "intermediate".to_string(),
            remote_context: "The student may have unstable internet and power but is trying to \
                             be professional and reliable."
                .to_string(),
            employer_region: "US-based employer in a different time zone".to_string(),
        }
    }
}
