use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use coaching_engine::{ask_coach, ClaudeClient, CoachConfig, CoachError, CoachInput, DailyBriefing};

const DEFAULT_LOG_FILTER: &str = "coaching_engine=info,coach_context=info";

/// Render the coaching context for an athlete snapshot, optionally asking the coach a question
#[derive(Parser)]
#[command(name = "coach-context", version, about)]
struct Cli {
  /// JSON snapshot: athlete, goals, constraints, check-in, activities, wellness, fitness, plan
  input: PathBuf,

  /// Question for the coach; requires ANTHROPIC_API_KEY
  question: Option<String>,

  /// Print the structured briefing as JSON instead of text
  #[arg(long)]
  json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    )
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  match run(Cli::parse()).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!(error = %e, "coach-context failed");
      eprintln!("Error: {}", e);
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> Result<(), CoachError> {
  let config = CoachConfig::from_env()?;
  let policy = config.load_policy()?;

  let json = std::fs::read_to_string(&cli.input)?;
  let input = CoachInput::from_json(&json)?;
  let briefing = DailyBriefing::build(input, &policy, Utc::now());

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&briefing)?);
  } else {
    println!("{}", briefing.rendered);
    let summary = briefing.assessment_summary();
    if !summary.is_empty() {
      println!("\n## Assessments\n{}", summary);
    }
  }

  if let Some(question) = cli.question {
    let client = ClaudeClient::from_config(&config)?;
    let completion = ask_coach(&client, &config, &briefing, &question).await?;
    println!("\n## Coach\n{}", completion.text);
  }

  Ok(())
}
