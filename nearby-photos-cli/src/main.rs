//! Nearby Photos CLI - Command-line interface
//!
//! Renders the nearby photos controller state in the terminal.

mod commands;
mod error;
mod render;
mod runner;

use clap::{Parser, Subcommand, ValueEnum};
use nearby_photos::config::Environment;

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;

#[derive(Parser)]
#[command(name = "nearby-photos")]
#[command(version = nearby_photos::VERSION)]
#[command(about = "Find photos taken near a position", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnvironmentArg {
    Development,
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the position and list the nearest photos
    Fetch {
        /// Latitude in decimal degrees (defaults to position.latitude)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees (defaults to position.longitude)
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Backend base URL (overrides backend.url and BACKEND_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Deployment environment
        #[arg(long, value_enum)]
        env: Option<EnvironmentArg>,

        /// Number of reload cycles to run
        #[arg(long, default_value = "1")]
        repeat: u32,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            lat,
            lng,
            base_url,
            env,
            repeat,
        } => commands::fetch::run(FetchArgs {
            lat,
            lng,
            base_url,
            environment: env.map(Environment::from),
            repeat,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
