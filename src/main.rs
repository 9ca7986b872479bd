use anyhow::Result as AnyhowResult;
use checkpoint::config::Config;
use checkpoint::model::edit::Edit;
use checkpoint::model::memory::MemoryReport;
use checkpoint::scenario;
use checkpoint::services::tracing_setup;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkpoint-report")]
#[command(about = "Compare delta-chain and full-snapshot history costs", long_about = None)]
#[command(version)]
struct Args {
    /// Edit sequence to run
    #[arg(long, value_enum, default_value_t = ScenarioKind::LargeFile)]
    scenario: ScenarioKind,

    /// Lines in the generated file (large-file scenario)
    #[arg(long, value_name = "N")]
    lines: Option<usize>,

    /// Number of commits appended to the generated file (large-file scenario)
    #[arg(long, value_name = "N")]
    commits: Option<usize>,

    /// Per-edit overhead in bytes used by the memory model
    #[arg(long, value_name = "BYTES")]
    overhead: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: warnings and info on stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScenarioKind {
    /// "Hello" grows to "Hello World!"
    Greeting,
    /// Generated source file with small appended commits
    LargeFile,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scenario: &'a str,
    content_bytes: usize,
    memory: MemoryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    change_log: Option<&'a [Edit]>,
}

fn effective_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e)
        })?,
        None => Config::default(),
    };

    if let Some(lines) = args.lines {
        config.scenario.large_file_lines = lines;
    }
    if let Some(commits) = args.commits {
        config.scenario.commits = commits;
    }
    if let Some(overhead) = args.overhead {
        config.history.edit_overhead_bytes = overhead;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    tracing_setup::init_global(args.log_file.as_deref())?;

    let config = effective_config(&args)?;

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let (name, session) = match args.scenario {
        ScenarioKind::Greeting => ("greeting", scenario::greeting(&config)?),
        ScenarioKind::LargeFile => ("large-file", scenario::large_file(&config)?),
    };

    if !session.verify()? {
        anyhow::bail!("Delta chain replay does not match the document");
    }

    let report = session.report();
    let edits = session.store().chain().edits();

    if args.json {
        let json = JsonReport {
            scenario: name,
            content_bytes: session.document().len(),
            memory: report,
            change_log: config.report.show_change_log.then_some(edits),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Scenario: {name}");
    println!("Final content: {} bytes", session.document().len());
    println!("{report}");

    if config.report.show_change_log {
        println!();
        println!("Change log:");
        for (i, edit) in edits.iter().enumerate() {
            println!("Commit {}: {}", i + 1, edit.to_string().escape_debug());
        }
    }

    Ok(())
}
