use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{cmd_analyze, cmd_calibrate, cmd_init, cmd_show_calibration};

#[derive(Parser)]
#[command(name = "skinscore")]
#[command(version, about = "Heuristic skin-condition scores from a facial photo", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more images
    Analyze {
        /// Input files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Calibration table (JSON)
        #[arg(long, value_name = "FILE")]
        calibration: Option<PathBuf>,

        /// Analysis config (YAML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Include raw statistics next to the scores
        #[arg(long)]
        raw: bool,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Fit a calibration table from labeled reference images
    Calibrate {
        /// Root with <metric>/mild and <metric>/severe folders
        #[arg(value_name = "DATA_ROOT")]
        data_root: PathBuf,

        /// Output calibration file (overwritten)
        #[arg(short, long, value_name = "FILE", default_value = "calibration.json")]
        out: PathBuf,

        /// Analysis config (YAML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Suppress per-metric output
        #[arg(short, long)]
        silent: bool,
    },

    /// Show the effective calibration table
    Calibration {
        /// Calibration table (JSON)
        #[arg(long, value_name = "FILE")]
        calibration: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write default config and calibration files
    Init {
        /// Target directory (default: ./config)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            inputs,
            recursive,
            calibration,
            config,
            json,
            raw,
            threads,
        } => cmd_analyze(inputs, recursive, calibration, config, json, raw, threads),
        Commands::Calibrate {
            data_root,
            out,
            config,
            silent,
        } => cmd_calibrate(data_root, out, config, silent),
        Commands::Calibration { calibration, json } => cmd_show_calibration(calibration, json),
        Commands::Init { dir, force } => cmd_init(dir, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
