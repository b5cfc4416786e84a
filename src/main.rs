//! Trainer Metrics Demo Entry Point
//!
//! Runs a simulated training loop for each configured brain and writes
//! one metrics CSV per brain.
//!
//! # Usage
//!
//! ```bash
//! # Simulate the default brain with default settings
//! trainer-metrics
//!
//! # Use a metrics configuration file
//! trainer-metrics metrics.yaml
//!
//! # More updates, different output directory, debug logging
//! trainer-metrics metrics.yaml --updates 10 --output-dir /tmp/summaries --verbose
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use log::{error, info};

use trainer_metrics::config::load_config;
use trainer_metrics::{MetricsConfig, MetricsRegistry, APP_NAME, VERSION};

/// Default number of simulated policy updates per brain.
const DEFAULT_UPDATES: usize = 3;

/// Brain simulated when the configuration lists none.
const DEFAULT_BRAIN: &str = "DemoBrain";

/// Simulated experience collection time per update.
const COLLECTION_TIME: Duration = Duration::from_millis(40);

/// Simulated policy update time.
const UPDATE_TIME: Duration = Duration::from_millis(15);

/// Experiences gathered per simulated collection.
const EXPERIENCES_PER_COLLECTION: u64 = 64;

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    config_path: Option<String>,
    updates: usize,
    output_dir: Option<PathBuf>,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            updates: DEFAULT_UPDATES,
            output_dir: None,
            verbose: false,
        }
    }
}

/// Default log filter; `--verbose` enables debug for this crate's targets only.
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,trainer_metrics=debug"
    } else {
        "info"
    }
}

/// Initializes env_logger; `RUST_LOG` overrides the default filter.
fn setup_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(log_filter(verbose));

    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                log::Level::Debug | log::Level::Trace => {
                    writeln!(buf, "  {}", record.args())
                }
                log::Level::Info => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: trainer-metrics [OPTIONS] [CONFIG_FILE]");
    println!();
    println!("Arguments:");
    println!("  [CONFIG_FILE]       Metrics configuration YAML file");
    println!();
    println!("Options:");
    println!("  --updates N         Policy updates per brain (default: {})", DEFAULT_UPDATES);
    println!("  --output-dir PATH   Directory for metrics CSV files");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--updates" => {
                i += 1;
                if i >= args.len() {
                    return Err("--updates requires a number argument".to_string());
                }
                config.updates = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid updates value: {}", args[i]))?;
            }
            "--output-dir" => {
                i += 1;
                if i >= args.len() {
                    return Err("--output-dir requires a path argument".to_string());
                }
                config.output_dir = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if config.config_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                config.config_path = Some(arg.clone());
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Builds the metrics configuration from the file and command-line overrides.
fn resolve_metrics_config(config: &Config) -> Result<MetricsConfig, Box<dyn std::error::Error>> {
    let mut metrics_config = match &config.config_path {
        Some(path) => load_config(path)?,
        None => MetricsConfig::default(),
    };

    if let Some(dir) = &config.output_dir {
        metrics_config.output_dir = dir.clone();
    }

    if metrics_config.brains.is_empty() {
        metrics_config.brains.push(DEFAULT_BRAIN.to_string());
    }

    Ok(metrics_config)
}

/// Drives every brain through the requested number of updates.
fn simulate_training(
    registry: &mut MetricsRegistry,
    brains: &[String],
    updates: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    for update in 0..updates {
        for brain in brains {
            let session = registry.session_mut(brain)?;

            session.begin_collection();
            thread::sleep(COLLECTION_TIME);
            session.end_collection()?;

            let experiences = EXPERIENCES_PER_COLLECTION * (update as u64 + 1);
            let mean_return = update as f64 * 0.5;
            session.begin_update(experiences, mean_return);
            thread::sleep(UPDATE_TIME);
            session.end_update()?;
        }
        info!("Completed update {}/{}", update + 1, updates);
    }

    Ok(())
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(config.verbose);
    info!("{} v{}", APP_NAME, VERSION);

    let metrics_config = resolve_metrics_config(&config).map_err(|e| {
        error!("Failed to load metrics configuration: {}", e);
        e
    })?;

    info!(
        "Recording {} brains into {}",
        metrics_config.brains.len(),
        metrics_config.output_dir.display()
    );

    let mut registry = MetricsRegistry::from_config(&metrics_config)?;
    simulate_training(&mut registry, &metrics_config.brains, config.updates)?;
    registry.flush_all()?;

    for brain in &metrics_config.brains {
        info!("  {} -> {}", brain, metrics_config.csv_path(brain).display());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
