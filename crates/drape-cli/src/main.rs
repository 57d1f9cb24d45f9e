//! Drape CLI: run scenes, benchmarks and input validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Mass-spring cloth with surface-bound strands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene from a config file.
    Simulate {
        /// Path to scene config (TOML).
        #[arg(short, long, default_value = "scene.toml")]
        config: String,

        /// Override the number of frames.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Write telemetry events as JSON lines to this file.
        #[arg(short, long)]
        events: Option<String>,

        /// Leave per-substep `step_completed` events out of the events file.
        #[arg(long)]
        no_steps: bool,

        /// Write the final driver mesh as JSON to this file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_cloth, sphere_drape, box_drape, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output file path (.csv or .json).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the config of a canonical scenario as TOML.
    Config {
        /// Scenario name (hanging_cloth, sphere_drape, box_drape).
        #[arg(short, long, default_value = "hanging_cloth")]
        scenario: String,
    },

    /// Validate a scene config (.toml) or mesh (.json).
    Validate {
        /// Path to config or mesh file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            frames,
            events,
            no_steps,
            output,
        } => commands::simulate(
            &config,
            frames,
            events.as_deref(),
            no_steps,
            output.as_deref(),
        ),
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Config { scenario } => commands::config(&scenario),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
