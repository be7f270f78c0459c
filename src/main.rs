use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mailcoach::engine::agent::EmailAgent;
use mailcoach::engine::llm_client::OllamaClient;
use mailcoach::loader::{load_rubric, load_scenario};
use mailcoach::model::email::EmailMessage;
use mailcoach::model::grading_record::GradingRecord;
use mailcoach::model::rubric::global_rubric;
use mailcoach::store::save_record;

/// Run one email-training session against a local Ollama backend.
#[derive(Parser, Debug)]
#[command(name = "mailcoach", version)]
struct Args {
    /// Scenario file (JSON or YAML)
    scenario: PathBuf,

    /// Rubric file; the built-in global rubric is used when omitted
    #[arg(long)]
    rubric: Option<PathBuf>,

    /// Model identifier passed to the backend
    #[arg(long, default_value = "llama3")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,

    /// Backend base URL (defaults to the local Ollama endpoint)
    #[arg(long)]
    base_url: Option<String>,

    /// Archive the grading record under the local data directory
    #[arg(long)]
    save: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let scenario = load_scenario(&args.scenario)?;
    let rubric = match &args.rubric {
        Some(path) => load_rubric(path)?,
        None => global_rubric(),
    };

    let mut client = OllamaClient::new(args.model, args.temperature);
    if let Some(base_url) = args.base_url {
        client = client.with_base_url(base_url);
    }
    let agent = EmailAgent::new(scenario, Box::new(client));

    let starter_thread = agent.build_starter_thread()?;
    let starter = &starter_thread[0];

    println!("\n=== STARTER EMAIL ({} → Student) ===\n", starter.sender);
    println!("Subject: {}", starter.subject);
    println!("From: {}\n", starter.sender);
    println!("{}", starter.body);
    println!("\n=====================================================\n");

    let student_email = prompt_student_email(&starter.subject)?;

    let result = agent.evaluate_and_respond(&starter_thread, &student_email, &rubric.items)?;

    println!("=== GRADING RESULTS ===\n");
    println!("Scenario: {}", result.grading.scenario_name);
    println!("Rubric: {}", rubric.name);
    println!(
        "Total Score: {}/{}\n",
        result.grading.total_score, result.grading.max_total_score
    );

    println!("Rubric Breakdown:");
    for score in &result.grading.scores {
        println!("  - {}: {}/{}", score.name, score.score, score.max_score);
    }

    println!("\nOverall Comment:\n");
    println!("{}", result.grading.overall_comment);

    println!("\nSuggested Revision:\n");
    println!("{}", result.grading.revision_example);

    println!("\n=====================================================\n");
    println!("=== COUNTERPART REPLY ===\n");
    println!("{}", result.counterpart_reply.trim());
    println!("\n=====================================================\n");

    let record = GradingRecord::from_result(&result.grading);
    println!("=== STORAGE PAYLOAD ===");
    println!("{}", serde_json::to_string_pretty(&record)?);

    if args.save {
        let path = save_record(&record, None)?;
        println!("\nSaved grading record to {}", path.display());
    }

    Ok(())
}

/// Collect a multi-line email body from stdin, terminated by a lone '.'.
fn prompt_student_email(reply_subject: &str) -> Result<EmailMessage> {
    println!("Please type the student's email reply. Finish input with a line containing only '.'");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }

    let body = lines.join("\n").trim().to_string();
    if body.is_empty() {
        bail!("no student email text provided");
    }

    Ok(EmailMessage::new(
        "Student",
        format!("Re: {}", reply_subject),
        body,
    ))
}
