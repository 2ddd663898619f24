//! shotcmp CLI - shotline comparison for solid models
//!
//! Compares a recorded set of shotlines against either a second
//! recording or a re-trace through an analytic scene, and prints an
//! itemized report of every difference.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use shotcmp_engine::{CompareSettings, Session, SettingValue};
use shotcmp_model::SegmentKind;
use shotcmp_trace::{ReplayTracer, SceneTracer, ShotlineTracer};

#[derive(Parser)]
#[command(name = "shotcmp")]
#[command(about = "Compare recorded shotlines against a model", long_about = None)]
struct Cli {
    /// Settings file (TOML) applied before the command runs
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a recorded shotfile and print a summary
    Check {
        /// Path to the shotfile
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare a recorded shotfile against a scene or second recording
    Compare {
        /// Path to the recorded shotfile (the original side)
        file: PathBuf,
        /// Re-trace every ray against this scene description (TOML)
        #[arg(long)]
        scene: Option<PathBuf>,
        /// Replay the current side from this second shotfile
        #[arg(long)]
        against: Option<PathBuf>,
        /// Override a setting, e.g. --set los_tol=0.01 (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// List all settings, or read/write one by name
    Settings {
        /// Setting name
        name: Option<String>,
        /// New value; writes back to the --settings file
        value: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Check { file, json } => check(&file, json),
        Commands::Compare {
            file,
            scene,
            against,
            set,
        } => compare(&file, scene, against, &set, settings),
        Commands::Settings { name, value } => {
            settings_cmd(cli.settings.as_deref(), settings, name, value)
        }
    }
}

fn load_settings(path: Option<&std::path::Path>) -> Result<CompareSettings> {
    let Some(path) = path else {
        return Ok(CompareSettings::default());
    };
    let text = fs::read_to_string(path)?;
    let settings: CompareSettings = toml::from_str(&text)?;
    settings.validate()?;
    Ok(settings)
}

#[derive(Serialize)]
struct CheckSummary {
    rays: usize,
    partitions: usize,
    gaps: usize,
    overlaps: usize,
    misses: usize,
}

fn check(file: &PathBuf, json: bool) -> Result<()> {
    let rays = shotcmp_shotfile::read_shotfile(file)?;

    let mut summary = CheckSummary {
        rays: rays.len(),
        partitions: 0,
        gaps: 0,
        overlaps: 0,
        misses: 0,
    };
    for shot in &rays {
        for seg in &shot.original {
            match seg.kind() {
                SegmentKind::Partition => summary.partitions += 1,
                SegmentKind::Gap => summary.gaps += 1,
                SegmentKind::Overlap => summary.overlaps += 1,
                SegmentKind::Miss => summary.misses += 1,
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}: {} rays", file.display(), summary.rays);
        println!(
            "  {} partitions, {} gaps, {} overlaps, {} misses",
            summary.partitions, summary.gaps, summary.overlaps, summary.misses
        );
    }
    Ok(())
}

fn compare(
    file: &PathBuf,
    scene: Option<PathBuf>,
    against: Option<PathBuf>,
    set: &[String],
    settings: CompareSettings,
) -> Result<()> {
    let mut session = Session::with_settings(settings)?;
    for override_ in set {
        let Some((name, value)) = override_.split_once('=') else {
            anyhow::bail!("--set expects NAME=VALUE, got `{override_}`");
        };
        session.set_setting(name.trim(), value.trim())?;
    }

    let tracer: Box<dyn ShotlineTracer> = match (scene, against) {
        (Some(scene), None) => Box::new(SceneTracer::from_path(scene)?),
        (None, Some(against)) => Box::new(ReplayTracer::from_path(against)?),
        _ => anyhow::bail!("exactly one of --scene or --against is required"),
    };

    session.load_path(file)?;
    session.run(tracer.as_ref())?;
    print!("{}", session.report()?);
    Ok(())
}

fn settings_cmd(
    path: Option<&std::path::Path>,
    mut settings: CompareSettings,
    name: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (name, value) {
        (None, _) => {
            for (name, value) in settings.entries() {
                println!("{name} = {value}");
            }
        }
        (Some(name), None) => {
            println!("{}", settings.get(&name)?);
        }
        (Some(name), Some(value)) => {
            settings.set(&name, &value)?;
            let Some(path) = path else {
                anyhow::bail!("writing a setting requires --settings <file>");
            };
            fs::write(path, toml::to_string_pretty(&settings)?)?;
            println!("{name} = {}", settings.get(&name)?);
        }
    }
    Ok(())
}
