use tracing::info;

use crate::engine::error::EngineError;
use crate::engine::grading_parser::parse_grading;
use crate::engine::llm_client::TextGenerator;
use crate::engine::prompt_builder::PromptBuilder;
use crate::model::email::{EmailMessage, EmailThread};
use crate::model::grading::{EvaluationAndReply, GradingResult, ModelInfo};
use crate::model::rubric::RubricItem;
use crate::model::scenario::{CohortProfile, Scenario};

const FALLBACK_STARTER_INSTRUCTIONS: &str = "Write a simple starter email for this scenario.";
const FALLBACK_REPLY_INSTRUCTIONS: &str = "Respond as a professional manager.";

/// Orchestrates one training scenario: starter email, counterpart replies,
/// and grading. Owns the scenario configuration and the backend binding;
/// every operation is a stateless single-pass pipeline.
pub struct EmailAgent {
    scenario: Scenario,
    cohort: CohortProfile,
    llm: Box<dyn TextGenerator>,
}

impl EmailAgent {
    pub fn new(scenario: Scenario, llm: Box<dyn TextGenerator>) -> Self {
        Self {
            scenario,
            cohort: CohortProfile::default(),
            llm,
        }
    }

    pub fn with_cohort(mut self, cohort: CohortProfile) -> Self {
        self.cohort = cohort;
        self
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Create the initial thread (first email from the counterpart).
    ///
    /// A scenario that carries a pre-authored starter body is wrapped
    /// directly; only scenarios without one cost a model invocation.
    pub fn build_starter_thread(&self) -> Result<EmailThread, EngineError> {
        let s = &self.scenario;

        let body = if !s.starter_email_body.is_empty() {
            s.starter_email_body.clone()
        } else {
            let combined = format!(
                "{}\n\n{}",
                s.counterpart_style.trim(),
                s.starter_email_generation_hint.trim()
            )
            .trim()
            .to_string();
            let instructions = if combined.is_empty() {
                FALLBACK_STARTER_INSTRUCTIONS
            } else {
                combined.as_str()
            };

            info!(scenario = %s.name, "generating starter email");
            let prompt = PromptBuilder::starter_email(s, &self.cohort, instructions)?;
            self.llm.generate(&prompt)?
        };

        Ok(vec![EmailMessage::new(
            s.starter_sender_name.clone(),
            s.starter_subject.clone(),
            body,
        )])
    }

    /// Generate the counterpart's reply to the current thread.
    /// Instructions default to the scenario's counterpart style.
    pub fn reply_as_counterpart(
        &self,
        thread: &[EmailMessage],
        instructions: Option<&str>,
    ) -> Result<String, EngineError> {
        let instructions = match instructions {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                if self.scenario.counterpart_style.is_empty() {
                    FALLBACK_REPLY_INSTRUCTIONS.to_string()
                } else {
                    self.scenario.counterpart_style.clone()
                }
            }
        };

        info!(scenario = %self.scenario.name, "generating counterpart reply");
        let prompt =
            PromptBuilder::counterpart_reply(&self.scenario, &self.cohort, thread, &instructions)?;
        self.llm.generate(&prompt)
    }

    /// Grade a student's email against a rubric and return structured
    /// results.
    pub fn grade_student_email(
        &self,
        thread: &[EmailMessage],
        student_email: &str,
        rubric: &[RubricItem],
    ) -> Result<GradingResult, EngineError> {
        info!(
            scenario = %self.scenario.name,
            rubric_items = rubric.len(),
            "grading student email"
        );
        let prompt = PromptBuilder::grading(
            &self.scenario,
            &self.cohort,
            thread,
            student_email,
            rubric,
        )?;

        let raw = self.llm.generate(&prompt)?;
        parse_grading(
            &raw,
            &self.scenario.name,
            ModelInfo {
                model_name: self.llm.model_name().to_string(),
                temperature: self.llm.temperature(),
            },
        )
    }

    /// Grade the student's email against the prior thread, then answer it
    /// as the counterpart. Grading always runs first; the two invocations
    /// are independent but sequential.
    pub fn evaluate_and_respond(
        &self,
        prior_thread: &[EmailMessage],
        student_email: &EmailMessage,
        rubric: &[RubricItem],
    ) -> Result<EvaluationAndReply, EngineError> {
        let grading = self.grade_student_email(prior_thread, &student_email.body, rubric)?;

        let mut full_thread = prior_thread.to_vec();
        full_thread.push(student_email.clone());
        let counterpart_reply = self.reply_as_counterpart(&full_thread, None)?;

        Ok(EvaluationAndReply {
            grading,
            counterpart_reply,
        })
    }
}
