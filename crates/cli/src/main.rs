//! OKR Pulse CLI - objective health, timeline and kanban reports.

mod config;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use okr_core::{
    HealthAssessment, Objective, ObjectiveId, ProgressSnapshot, RawProgressSnapshot, Task,
    TaskFilter, TaskStatus,
};
use okr_progress::{BasicProgressTracker, ProgressTracker};
use okr_storage::{JsonStorage, Storage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::PulseConfig;

#[derive(Parser)]
#[command(name = "okr")]
#[command(about = "Objective health, timeline and kanban reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding objectives and tasks
    #[arg(long, global = true, default_value = ".okr")]
    data_dir: PathBuf,

    /// JSON file overriding engine constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one objective, or every objective when no ID is given
    Assess {
        /// Objective ID
        id: Option<String>,
        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Group tasks by due date
    Timeline {
        /// Only tasks of this objective
        #[arg(long)]
        objective: Option<String>,
        /// Include done and cancelled tasks
        #[arg(long)]
        all: bool,
        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Group tasks by status
    Kanban {
        /// Only tasks of this objective
        #[arg(long)]
        objective: Option<String>,
    },
    /// Score a progress snapshot JSON document ("-" reads stdin)
    Score {
        /// Snapshot file
        file: String,
    },
    /// Import an export document into the data directory
    Import {
        /// Export file
        file: PathBuf,
    },
}

/// Objectives and tasks exported from the planning app.
#[derive(Debug, Default, Deserialize)]
struct ExportDocument {
    #[serde(default)]
    objectives: Vec<Objective>,
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    snapshot: &'a ProgressSnapshot,
    assessment: &'a HealthAssessment,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });

    // Reports go to stdout; keep logs out of the way.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PulseConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Assess { id, now } => {
            let now = reference_time(now.as_deref())?;
            let tracker = open_tracker(&cli.data_dir, &config, &now).await?;
            let now = now.with_timezone(&Utc);

            match id {
                Some(id) => {
                    let id = parse_objective_id(&id)?;
                    let Some(report) = tracker.assess_objective(id, now).await? else {
                        anyhow::bail!("Objective not found: {}", id);
                    };
                    match cli.format {
                        Format::Text => print!("{}", render::report(&report)),
                        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                    }
                }
                None => {
                    let portfolio = tracker.assess_all(now).await?;
                    match cli.format {
                        Format::Text => print!("{}", render::portfolio(&portfolio)),
                        Format::Json => println!("{}", serde_json::to_string_pretty(&portfolio)?),
                    }
                }
            }
        }
        Commands::Timeline { objective, all, now } => {
            let now = reference_time(now.as_deref())?;
            let tracker = open_tracker(&cli.data_dir, &config, &now).await?;

            let filter = TaskFilter {
                status: (!all).then(|| {
                    vec![TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Blocked]
                }),
                objective_id: objective.as_deref().map(parse_objective_id).transpose()?,
            };
            let buckets = tracker.timeline(&filter, now.with_timezone(&Utc)).await?;
            match cli.format {
                Format::Text => print!("{}", render::timeline(&buckets)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&buckets)?),
            }
        }
        Commands::Kanban { objective } => {
            let now = reference_time(None)?;
            let tracker = open_tracker(&cli.data_dir, &config, &now).await?;

            let filter = TaskFilter {
                objective_id: objective.as_deref().map(parse_objective_id).transpose()?,
                ..Default::default()
            };
            let board = tracker.kanban(&filter).await?;
            match cli.format {
                Format::Text => print!("{}", render::kanban(&board)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&board)?),
            }
        }
        Commands::Score { file } => {
            let raw = read_snapshot(&file)?;
            let snapshot = ProgressSnapshot::from(raw);
            let assessment = config.engine().assess(&snapshot);
            debug!("Scored snapshot from {}: {:.1}", file, assessment.score);

            match cli.format {
                Format::Text => print!("{}", render::assessment(&snapshot, &assessment)),
                Format::Json => {
                    let output = ScoreOutput { snapshot: &snapshot, assessment: &assessment };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading export {}", file.display()))?;
            let document: ExportDocument = serde_json::from_str(&text)
                .with_context(|| format!("parsing export {}", file.display()))?;

            let mut storage = JsonStorage::new(&cli.data_dir)
                .await
                .with_context(|| format!("opening data dir {}", cli.data_dir.display()))?;
            import(&mut storage, &document).await?;

            info!("Imported into {}", storage.root().display());
            println!(
                "Imported {} objectives and {} tasks",
                document.objectives.len(),
                document.tasks.len()
            );
        }
    }

    Ok(())
}

async fn open_tracker(
    data_dir: &Path,
    config: &PulseConfig,
    now: &DateTime<FixedOffset>,
) -> Result<BasicProgressTracker<JsonStorage>> {
    let storage = JsonStorage::new(data_dir)
        .await
        .with_context(|| format!("opening data dir {}", data_dir.display()))?;
    Ok(BasicProgressTracker::new(storage)
        .with_engine(config.engine())
        .with_bucketer(config.bucketer())
        .with_offset(*now.offset()))
}

async fn import<S: Storage>(storage: &mut S, document: &ExportDocument) -> Result<()> {
    for objective in &document.objectives {
        storage.save_objective(objective).await?;
    }
    for task in &document.tasks {
        storage.save_task(task).await?;
    }
    Ok(())
}

/// `--now` if given, else the local clock. The offset decides calendar days.
fn reference_time(now: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now timestamp: {}", s)),
        None => {
            let now = Local::now();
            Ok(now.with_timezone(&now.offset().fix()))
        }
    }
}

fn parse_objective_id(s: &str) -> Result<ObjectiveId> {
    s.parse().with_context(|| format!("invalid objective ID: {}", s))
}

fn read_snapshot(file: &str) -> Result<RawProgressSnapshot> {
    let text = if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading snapshot from stdin")?;
        text
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading snapshot {}", file))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", file))
}
