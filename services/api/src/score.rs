use crate::infra::{build_pipeline, InMemorySessionStore};
use clap::Args;
use lead_intent::config::AppConfig;
use lead_intent::error::AppError;
use lead_intent::telemetry;
use lead_intent::workflows::scoring::{LeadScoringService, Offer, ScoredResult};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Offer JSON document (`name`, `value_props`, `ideal_use_cases`)
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Leads CSV with name, role, company, industry, location, linkedin_bio
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Write scored leads as CSV instead of printing a table
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let offer: Offer = serde_json::from_reader(BufReader::new(File::open(&args.offer)?))?;

    let service = LeadScoringService::new(
        Arc::new(build_pipeline(&config.llm)),
        Arc::new(InMemorySessionStore::default()),
    );
    service.set_offer(offer)?;
    service.upload_leads(BufReader::new(File::open(&args.leads)?))?;
    let summary = service.score_uploaded().await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, service.export_csv()?)?;
            info!(path = %path.display(), total = summary.total_scored, "scored leads written");
        }
        None => print_table(&service.results()?),
    }

    if summary.degraded > 0 {
        println!(
            "{} of {} leads fell back to Low intent; check model credentials.",
            summary.degraded, summary.total_scored
        );
    }
    Ok(())
}

fn print_table(results: &[ScoredResult]) {
    println!("{:<24} {:<8} {:>5}  Reasoning", "Name", "Intent", "Score");
    for result in results {
        println!(
            "{:<24} {:<8} {:>5}  {}",
            truncate(&result.name, 24),
            result.intent.label(),
            result.score,
            result.reasoning.replace('\n', " ")
        );
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('~');
    shortened
}
