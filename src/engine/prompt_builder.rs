use crate::engine::error::EngineError;
use crate::model::email::EmailMessage;
use crate::model::rubric::RubricItem;
use crate::model::scenario::{CohortProfile, Scenario};

/// Builds the full prompt sent to the LLM.
/// This struct is intentionally dumb: it only formats text.
/// No parsing, no networking, no engine logic.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt asking the counterpart to open a thread with a first email.
    pub fn starter_email(
        scenario: &Scenario,
        cohort: &CohortProfile,
        instructions: &str,
    ) -> Result<String, EngineError> {
        check_required_fields(scenario)?;

        let mut prompt = String::new();
        push_system_prompt(&mut prompt);
        push_learner_context(&mut prompt, cohort);
        push_scenario_section(&mut prompt, scenario);
        push_student_task(&mut prompt, scenario);
        push_counterpart_voice(&mut prompt, scenario);

        prompt.push_str(
            "Your job:\n\
- Write a realistic email from the counterpart to the student in a REMOTE WORK situation.\n\
- This email will usually be the first email in the thread.\n\
- Use clear, professional English that is easy for an intermediate learner to understand.\n\
- Avoid slang, idioms, or heavy cultural references.\n\
- 1-3 short paragraphs is enough.\n\n",
        );

        push_instructions(&mut prompt, instructions);
        prompt.push_str(
            "Draft the full counterpart email below as plain text.\n\
Do not explain your reasoning, only output the email body.\n",
        );

        Ok(prompt)
    }

    /// Prompt asking the counterpart to reply to the newest email in the
    /// thread.
    pub fn counterpart_reply(
        scenario: &Scenario,
        cohort: &CohortProfile,
        thread: &[EmailMessage],
        instructions: &str,
    ) -> Result<String, EngineError> {
        check_required_fields(scenario)?;

        let mut prompt = String::new();
        push_system_prompt(&mut prompt);
        push_learner_context(&mut prompt, cohort);
        push_scenario_section(&mut prompt, scenario);
        push_student_task(&mut prompt, scenario);
        push_counterpart_voice(&mut prompt, scenario);
        push_thread_section(&mut prompt, "Email thread so far (newest last)", thread);

        prompt.push_str(
            "You have just received the student's email above.\n\
Write a realistic reply from the counterpart (manager, client, etc.) to the student.\n\n\
Guidelines:\n\
- Respond in a calm, professional tone.\n\
- Acknowledge what the student said.\n\
- Confirm any decisions, next steps, or expectations.\n\
- Use clear, simple English.\n\
- Keep it 1-3 short paragraphs.\n\n",
        );

        push_instructions(&mut prompt, instructions);
        prompt.push_str(
            "Draft the full counterpart reply below as plain text.\n\
Do not explain your reasoning, only output the email body.\n",
        );

        Ok(prompt)
    }

    /// Prompt asking the model to grade the student's email and answer in
    /// strict JSON.
    pub fn grading(
        scenario: &Scenario,
        cohort: &CohortProfile,
        thread: &[EmailMessage],
        student_email: &str,
        rubric: &[RubricItem],
    ) -> Result<String, EngineError> {
        check_required_fields(scenario)?;

        let mut prompt = String::new();
        push_system_prompt(&mut prompt);
        prompt.push_str(
            "You are grading a student's email for a remote-work email etiquette assignment.\n\n",
        );
        push_learner_context(&mut prompt, cohort);

        prompt.push_str("SCENARIO:\n");
        prompt.push_str(&format!("- Name: {}\n", scenario.name));
        prompt.push_str(&format!("- Environment: {}\n", scenario.environment));
        prompt.push_str(&format!(
            "- Counterpart role: {}\n\n",
            scenario.counterpart_role
        ));

        prompt.push_str("What the student was asked to do:\n");
        prompt.push_str(&scenario.student_task);
        prompt.push_str("\n\n");

        prompt.push_str("Grading focus for this scenario:\n");
        prompt.push_str(&scenario.grading_focus);
        prompt.push_str("\n\n");

        push_thread_section(
            &mut prompt,
            "Here is the email thread the student is responding to (newest last)",
            thread,
        );

        prompt.push_str("Here is the student's email to grade:\n");
        prompt.push_str(student_email.trim());
        prompt.push_str("\n\n");

        prompt.push_str("RUBRIC:\n");
        prompt.push_str(&rubric_to_text(rubric));
        prompt.push_str("\n\n");

        prompt.push_str(
            "Return your feedback as a single JSON object with this structure:\n\n\
{\n\
  \"scores\": [\n\
    {\"name\": \"<rubric item name>\", \"score\": 1-5, \"max_score\": 5},\n\
    ...\n\
  ],\n\
  \"overall_comment\": \"<3-6 sentences of feedback in simple, kind English>\",\n\
  \"revision_example\": \"<a revised version of the student's email that is better but realistic>\"\n\
}\n\n\
Important:\n\
- Do NOT include any text before or after the JSON.\n\
- Do NOT wrap the JSON in backticks or say 'Here is the JSON'.\n\
- Only output valid JSON.\n",
        );

        Ok(prompt)
    }
}

/// Serialize a thread for prompt embedding, oldest first.
pub fn thread_to_text(thread: &[EmailMessage]) -> String {
    if thread.is_empty() {
        return "(no prior emails yet)".to_string();
    }

    let mut blocks = Vec::new();
    for (idx, message) in thread.iter().enumerate() {
        let header = format!(
            "Message {} — From: {} | Subject: {}",
            idx + 1,
            message.sender,
            message.subject
        );
        blocks.push(format!("{}\n{}", header, message.body.trim()));
    }
    blocks.join("\n\n")
}

/// Render rubric items as the bullet list embedded in the grading prompt.
pub fn rubric_to_text(rubric: &[RubricItem]) -> String {
    rubric
        .iter()
        .map(|item| format!("- {} (1–{}): {}", item.name, item.max_score, item.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_required_fields(scenario: &Scenario) -> Result<(), EngineError> {
    for (field, value) in [
        ("name", &scenario.name),
        ("environment", &scenario.environment),
        ("counterpart_role", &scenario.counterpart_role),
        ("student_task", &scenario.student_task),
    ] {
        if value.trim().is_empty() {
            return Err(EngineError::Template(field.to_string()));
        }
    }
    Ok(())
}

fn push_system_prompt(prompt: &mut String) {
    prompt.push_str(
        "You are part of an email etiquette training simulator for students preparing for \
remote work with employers in other countries.\n\
Your job is to model and support clear, respectful, and professional email communication \
in a global workplace.\n\
Always:\n\
- Use clear, simple English (CEFR B1-B2 level).\n\
- Avoid slang, idioms, or cultural references that may be confusing.\n\
- Show how to be respectful but also confident and responsible.\n\n",
    );
}

fn push_learner_context(prompt: &mut String, cohort: &CohortProfile) {
    prompt.push_str("LEARNER & CONTEXT:\n");
    prompt.push_str(&format!("- Program: {}\n", cohort.program));
    prompt.push_str(&format!(
        "- Learner background: {}\n",
        cohort.learner_background
    ));
    prompt.push_str(&format!("- English level: {}\n", cohort.english_level));
    prompt.push_str(&format!(
        "- Remote work context: {}\n",
        cohort.remote_context
    ));
    prompt.push_str(&format!(
        "- Typical employer region: {}\n\n",
        cohort.employer_region
    ));
}

fn push_scenario_section(prompt: &mut String, scenario: &Scenario) {
    prompt.push_str("SCENARIO:\n");
    prompt.push_str(&format!("- Name: {}\n", scenario.name));
    prompt.push_str(&format!("- Environment: {}\n", scenario.environment));
    prompt.push_str(&format!(
        "- You are role-playing as: {}\n\n",
        scenario.counterpart_role
    ));
}

fn push_student_task(prompt: &mut String, scenario: &Scenario) {
    prompt.push_str("What the student is expected to do in this assignment:\n");
    prompt.push_str(&scenario.student_task);
    prompt.push_str("\n\n");
}

fn push_counterpart_voice(prompt: &mut String, scenario: &Scenario) {
    prompt.push_str("How you (the counterpart) should sound:\n");
    prompt.push_str(&scenario.counterpart_style);
    prompt.push_str("\n\n");
}

fn push_thread_section(prompt: &mut String, label: &str, thread: &[EmailMessage]) {
    prompt.push_str(label);
    prompt.push_str(":\n");
    prompt.push_str(&thread_to_text(thread));
    prompt.push_str("\n\n");
}

fn push_instructions(prompt: &mut String, instructions: &str) {
    prompt.push_str("Operator instructions:\n");
    prompt.push_str(instructions);
    prompt.push_str("\n\n");
}
