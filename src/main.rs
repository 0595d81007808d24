mod cli;
mod config;
mod draft;
mod error;
mod report;
mod scoring;
mod store;
mod telemetry;
mod types;

use crate::draft::AssessmentDraft;
use crate::error::{AssessError, Result};
use crate::store::{AssessmentStore, CandidateStore, FileStore, ProcessCatalog};
use crate::types::config::AssessConfig;
use crate::types::record::{AssessmentRecord, MachineType};
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn read_record(path: &Path) -> Result<AssessmentRecord> {
    if !path.exists() {
        return Err(AssessError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();

    let root = cli.command.root();
    if !root.exists() {
        return Err(AssessError::PathNotFound(root.display().to_string()));
    }
    let loaded = config::load_config(root)?;
    let missing_config = loaded.is_none();
    let config = loaded.unwrap_or_default();

    let level = telemetry::level_from_flags(cli.verbose, cli.quiet).unwrap_or(config.log_level());
    telemetry::init(level)?;
    if missing_config {
        tracing::debug!(
            "no {} found in {}; using defaults",
            config::DEFAULT_CONFIG_FILE,
            root.display()
        );
    }

    let store = FileStore::new(root.join(config.data_dir()));
    match cli.command {
        cli::Commands::Score(cmd) => score(&cmd, &config, &store),
        cli::Commands::Validate(cmd) => validate(&cmd, &store),
        cli::Commands::Catalog(cmd) => catalog(&cmd, &store),
        cli::Commands::Prepare(cmd) => prepare(&cmd, &store),
        cli::Commands::History(_) => history(&store),
    }
}

fn score(cmd: &cli::ScoreCommand, config: &AssessConfig, store: &FileStore) -> Result<i32> {
    let record = read_record(&cmd.record)?;

    let mut policy = scoring::ScoringPolicy::from_config(config);
    if let Some(rule) = cmd.practical_rule {
        policy.practical_rule = rule.into();
    }
    if cmd.no_overrides {
        policy.apply_overrides = false;
    }

    let result = scoring::compute_assessment(&record, &policy)?;
    let output_format = match cmd.format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    };
    println!("{}", report::render(&result, output_format)?);

    if cmd.save {
        let candidate_id = record.candidate_id.as_deref().ok_or_else(|| {
            AssessError::InvalidCandidateId("record has no candidateId".to_string())
        })?;
        store.save(candidate_id, &record, &result)?;
        eprintln!("saved: {}", store.assessment_path(candidate_id)?.display());
    }

    Ok(exit_code::SUCCESS)
}

fn validate(cmd: &cli::ValidateCommand, store: &FileStore) -> Result<i32> {
    let record = read_record(&cmd.record)?;
    let mut findings = match scoring::validate(&record) {
        Ok(findings) => findings,
        Err(err) if err.is_validation() => {
            println!("[BLOCKING] {err}");
            return Ok(exit_code::BLOCKING);
        }
        Err(err) => return Err(err),
    };
    if store.has_catalog() {
        findings.extend(store::catalog_findings(&record, store)?);
    }

    if findings.is_empty() {
        println!("validate: no findings");
        return Ok(exit_code::SUCCESS);
    }
    for finding in &findings {
        println!("[WARN] {}: {}", finding.id, finding.title);
        println!("  {}", finding.body);
    }
    Ok(exit_code::WARNINGS)
}

fn catalog(cmd: &cli::CatalogCommand, store: &FileStore) -> Result<i32> {
    let entries = if cmd.all {
        store.processes()?
    } else {
        store.assessable()?.into_values().collect()
    };

    if entries.is_empty() {
        println!("catalog: no processes");
        return Ok(exit_code::SUCCESS);
    }
    for entry in &entries {
        println!(
            "- {} [smv {:.2}, {}]{}",
            entry.name,
            entry.smv,
            entry.process_status,
            if entry.is_assessment {
                ""
            } else {
                " (not assessable)"
            }
        );
    }
    Ok(exit_code::SUCCESS)
}

fn prepare(cmd: &cli::PrepareCommand, store: &FileStore) -> Result<i32> {
    let candidate = store.candidate(&cmd.candidate_id)?;
    let mut draft = AssessmentDraft::new(&candidate);

    let carried = match store.prior_assessment(&candidate.candidate_id)? {
        Some(prior) => {
            tracing::info!(candidate = %candidate.candidate_id, "pre-filling from prior assessment");
            draft = draft.with_prior(&prior);
            draft.process_count()
        }
        None => 0,
    };

    let machine = MachineType::from(cmd.machine.as_str());
    if !machine.is_recognized() {
        tracing::warn!(machine = %machine, "unrecognized machine type for seeded rows");
    }
    for (position, name) in cmd.processes.iter().enumerate() {
        let index = if carried == 0 && position == 0 {
            0
        } else {
            draft.add_process()
        };
        draft.select_process(index, name, store)?;
        draft.set_machine(index, machine.clone())?;
    }
    if cmd.fresh {
        for _ in 0..carried {
            draft.remove_process(0)?;
        }
    }

    for times in &cmd.cycle_times {
        for (slot, seconds) in times.seconds.iter().enumerate() {
            draft.set_cycle_time(times.row, slot, *seconds)?;
        }
    }
    let unmeasured = draft
        .record()
        .processes
        .iter()
        .filter(|row| row.cycle_times.iter().all(|time| *time <= 0.0))
        .count();
    if unmeasured > 0 {
        tracing::info!(rows = unmeasured, "draft rows still need cycle times");
    }

    let record = draft.into_record();
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(exit_code::SUCCESS)
}

fn history(store: &FileStore) -> Result<i32> {
    let saved = store.list()?;
    if saved.is_empty() {
        println!("history: no saved assessments");
        return Ok(exit_code::SUCCESS);
    }
    for assessment in &saved {
        println!(
            "- {} {} {} [{}] total {:.2} (saved {})",
            assessment.candidate_id,
            assessment.record.date,
            assessment.result.operator_name,
            assessment.result.final_assessment,
            assessment.result.scores.total_score,
            assessment.saved_at.to_rfc3339()
        );
    }
    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_validation() {
                exit_code::BLOCKING
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
