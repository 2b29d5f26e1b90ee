//! CLI frontend for Rigwright model assembly.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rw",
    about = "Rigwright: assemble simulation models from setup files",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the model named in a setup file and summarize it
    Assemble {
        /// Setup file (JSON)
        setup: PathBuf,

        /// Also list the base model's actuators from before the merge
        #[arg(short, long)]
        originals: bool,
    },

    /// Print a setup file containing every default value
    Defaults,

    /// Assemble a model, attach its analyses, and write their results
    Results {
        /// Setup file (JSON)
        setup: PathBuf,

        /// Output directory (default: the setup's results_directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Base name for results files (default: the setup file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Resampling interval; omit or pass a negative value to write every step
        #[arg(long, allow_hyphen_values = true)]
        interval: Option<f64>,

        /// Extension for results files
        #[arg(long, default_value = "sto")]
        ext: String,
    },
}

fn main() {
    commands::init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assemble { setup, originals } => commands::assemble::run(&setup, originals),
        Commands::Defaults => commands::defaults::run(),
        Commands::Results {
            setup,
            dir,
            name,
            interval,
            ext,
        } => commands::results::run(&setup, dir.as_deref(), name.as_deref(), interval, &ext),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
