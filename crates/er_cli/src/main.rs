//! Event Recognizer CLI
//!
//! Recognize, evaluate and tune pass / failed pass / shot detection on
//! tracking datasets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::info;

use er_core::calibration::{best_row, sweep};
use er_core::manifest::{manifest_path_for, RunManifest};
use er_core::{
    do_comparison, load_dataset, load_event_maps, output_path_for, recognize_dataset,
    save_event_maps, write_sweep_csv, Dataset, EventMaps, RecognitionConfig, TuningParameter,
};

#[derive(Parser, Debug)]
#[command(name = "event-recognizer")]
#[command(about = "Recognize passes, failed passes and shots in tracking data", long_about = None)]
struct Cli {
    /// JSON or YAML recognition config (overrides ER_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Preset: default, strict or lenient (overrides ER_PROFILE)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recognize events in every sequence and save them
    Recognize {
        /// Input dataset JSON
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,

        /// Also print the events to stdout
        #[arg(long, default_value = "false")]
        print: bool,
    },

    /// Recognize, save and compare with hand labels
    Evaluate {
        /// Input dataset JSON
        #[arg(long)]
        input: PathBuf,

        /// Expected events JSON
        #[arg(long)]
        labels: PathBuf,

        /// Output directory
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
    },

    /// Trace recognition of a single sequence
    Debug {
        /// Input dataset JSON
        #[arg(long)]
        input: PathBuf,

        /// Sequence id, e.g. sequence_1
        #[arg(long)]
        sequence: String,

        /// Expected events JSON to compare against
        #[arg(long)]
        labels: Option<PathBuf>,
    },

    /// Sweep one threshold (or all) and write precision/recall tables
    Tune {
        /// Input dataset JSON
        #[arg(long)]
        input: PathBuf,

        /// Expected events JSON
        #[arg(long)]
        labels: PathBuf,

        /// Parameter name, or "all"
        #[arg(long, default_value = "all")]
        param: String,

        /// Include per-category scores
        #[arg(long, default_value = "false")]
        full: bool,

        /// CSV output directory
        #[arg(long, default_value = "output/csv")]
        out_dir: PathBuf,
    },
}

fn log_filter(verbose: u8, command: &Commands) -> &'static str {
    match (verbose, command) {
        (_, Commands::Debug { .. }) | (3.., _) => "trace",
        (2, _) => "debug",
        (1, _) => "info",
        _ => "warn",
    }
}

fn load_config(cli: &Cli) -> Result<RecognitionConfig> {
    if cli.config.is_none() && cli.profile.is_none() {
        return Ok(RecognitionConfig::from_env_or_default());
    }
    let config = RecognitionConfig::resolve(cli.config.clone(), cli.profile.clone())
        .context("Failed to resolve recognition config")?;
    config.validate().context("Invalid recognition config")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose, &cli.command);
    env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Recognize {
            input,
            out_dir,
            print,
        } => {
            let output = recognize(&input, &out_dir, &config)?;
            if print {
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Commands::Evaluate {
            input,
            labels,
            out_dir,
        } => evaluate(&input, &labels, &out_dir, &config)?,

        Commands::Debug {
            input,
            sequence,
            labels,
        } => debug_sequence(&input, &sequence, labels.as_deref(), &config)?,

        Commands::Tune {
            input,
            labels,
            param,
            full,
            out_dir,
        } => tune(&input, &labels, &param, full, &out_dir, &config)?,
    }

    Ok(())
}

/// Recognize a dataset file, saving events and the run manifest.
fn recognize(input: &Path, out_dir: &Path, config: &RecognitionConfig) -> Result<EventMaps> {
    println!("🔍 Recognizing events...");
    println!("   Input:  {}", input.display());

    let dataset = load_dataset(input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?;
    let output = recognize_dataset(&dataset, config);

    let output_path = output_path_for(input, out_dir);
    save_event_maps(&output_path, &output)
        .with_context(|| format!("Failed to save output: {}", output_path.display()))?;

    let manifest = RunManifest::new(&dataset, &output, config);
    let manifest_path = manifest_path_for(input, out_dir);
    manifest
        .save(&manifest_path)
        .with_context(|| format!("Failed to save manifest: {}", manifest_path.display()))?;

    println!("\n✅ Recognition finished");
    println!("   Sequences: {}", manifest.sequences);
    println!(
        "   Events:    {} (passes {}, failed passes {}, shots {})",
        manifest.events.total,
        manifest.events.passes,
        manifest.events.failed_passes,
        manifest.events.shots
    );
    println!("   Output:    {}", output_path.display());
    println!("   Manifest:  {}", manifest_path.display());
    Ok(output)
}

fn evaluate(
    input: &Path,
    labels: &Path,
    out_dir: &Path,
    config: &RecognitionConfig,
) -> Result<()> {
    let output = recognize(input, out_dir, config)?;
    let expected = load_event_maps(labels)
        .with_context(|| format!("Failed to load labels: {}", labels.display()))?;

    let comparison =
        do_comparison(&output, &expected, true).context("Output and labels do not line up")?;
    println!("\n{}", comparison);
    Ok(())
}

fn debug_sequence(
    input: &Path,
    sequence: &str,
    labels: Option<&Path>,
    config: &RecognitionConfig,
) -> Result<()> {
    let dataset = load_dataset(input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?
        .restrict_to(sequence)?;
    info!("Debugging {} with {:?}", sequence, config.thresholds);

    let output = recognize_dataset(&dataset, config);
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(labels) = labels {
        let mut expected = load_event_maps(labels)
            .with_context(|| format!("Failed to load labels: {}", labels.display()))?;
        let events = expected
            .remove(sequence)
            .with_context(|| format!("No labels for {}", sequence))?;
        let expected = BTreeMap::from([(sequence.to_string(), events)]);
        let comparison = do_comparison(&output, &expected, true)?;
        println!("\n{}", comparison);
    }
    Ok(())
}

fn parameters(param: &str) -> Result<Vec<TuningParameter>> {
    if param.eq_ignore_ascii_case("all") {
        return Ok(TuningParameter::ALL.to_vec());
    }
    Ok(vec![param.parse()?])
}

fn tune(
    input: &Path,
    labels: &Path,
    param: &str,
    full: bool,
    out_dir: &Path,
    config: &RecognitionConfig,
) -> Result<()> {
    let parameters = parameters(param)?;
    let dataset: Dataset = load_dataset(input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?;
    let expected = load_event_maps(labels)
        .with_context(|| format!("Failed to load labels: {}", labels.display()))?;

    for parameter in parameters {
        println!("🔧 Tuning {} (current {})...", parameter, parameter.get(config));
        let rows = sweep(parameter, &dataset, &expected, config)?;
        let path = write_sweep_csv(out_dir, parameter, &rows, full)?;

        if let Some(best) = best_row(&rows) {
            println!(
                "   Best {} = {} (F-score {:.2}%)",
                parameter,
                best.value,
                best.comparison.overall.f_score * 100.0
            );
        }
        println!("   Saved: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = parse(&[
            "event-recognizer",
            "recognize",
            "--input",
            "input/test_data.json",
            "--profile",
            "strict",
            "-vv",
        ]);
        assert_eq!(cli.profile.as_deref(), Some("strict"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Recognize { out_dir, print, .. } => {
                assert_eq!(out_dir, PathBuf::from("output"));
                assert!(!print);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_tune_defaults() {
        let cli = parse(&[
            "event-recognizer",
            "tune",
            "--input",
            "d.json",
            "--labels",
            "l.json",
        ]);
        match cli.command {
            Commands::Tune {
                param,
                full,
                out_dir,
                ..
            } => {
                assert_eq!(param, "all");
                assert!(!full);
                assert_eq!(out_dir, PathBuf::from("output/csv"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["event-recognizer", "tune"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let recognize = Commands::Recognize {
            input: PathBuf::new(),
            out_dir: PathBuf::new(),
            print: false,
        };
        assert_eq!(log_filter(0, &recognize), "warn");
        assert_eq!(log_filter(1, &recognize), "info");
        assert_eq!(log_filter(2, &recognize), "debug");
        assert_eq!(log_filter(3, &recognize), "trace");

        let debug = Commands::Debug {
            input: PathBuf::new(),
            sequence: "sequence_1".into(),
            labels: None,
        };
        // Ball speed and angle lines are logged at trace
        assert_eq!(log_filter(0, &debug), "trace");
    }

    #[test]
    fn test_parameters() {
        assert_eq!(parameters("all").unwrap().len(), 5);
        assert_eq!(
            parameters("min_speed_change_factor").unwrap(),
            vec![TuningParameter::MinSpeedChangeFactor]
        );
        assert!(parameters("nope").is_err());
    }

    #[test]
    fn test_recognize_writes_output_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("test_data.json");
        let frame = vec![0.0; er_core::episode::FRAME_LEN];
        fs::write(
            &input,
            serde_json::to_string(&BTreeMap::from([("sequence_1", vec![frame; 4])])).unwrap(),
        )
        .unwrap();

        let out_dir = dir.path().join("output");
        let output = recognize(&input, &out_dir, &RecognitionConfig::default()).unwrap();
        assert_eq!(output.len(), 1);
        assert!(out_dir.join("test_data_out.json").exists());
        assert!(out_dir.join("test_data_manifest.json").exists());

        let labels = out_dir.join("test_data_out.json");
        evaluate(&input, &labels, &out_dir, &RecognitionConfig::default()).unwrap();
        debug_sequence(&input, "sequence_1", Some(&labels), &RecognitionConfig::default()).unwrap();
        assert!(debug_sequence(&input, "sequence_9", None, &RecognitionConfig::default()).is_err());
    }
}
