use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use goaltimer_core::Config;

#[derive(Parser)]
#[command(name = "goaltimer-cli", version, about = "Goal Timer CLI")]
struct Cli {
    /// Milliseconds per countdown second (overrides timer.tick_interval_ms)
    #[arg(long, global = true)]
    tick_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive goal list and timer (default)
    Shell,
    /// Add one goal and count it down in the foreground
    Run {
        /// Timer length in minutes
        #[arg(long)]
        minutes: String,
        /// Goal description
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Print how a remaining time is displayed
    Format {
        /// Remaining seconds
        #[arg(allow_hyphen_values = true)]
        seconds: i64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GOALTIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration with command-line overrides applied.
fn load_config(tick_ms: Option<u64>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(ms) = tick_ms {
        config.timer.tick_interval_ms = ms;
        config.validate()?;
    }
    Ok(config)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => load_config(cli.tick_ms)
            .and_then(|config| commands::shell::run(&config, cli.json)),
        Commands::Run {
            minutes,
            description,
        } => load_config(cli.tick_ms).and_then(|config| {
            commands::run::run(&config, cli.json, &minutes, &description.join(" "))
        }),
        Commands::Format { seconds } => commands::format::run(seconds),
        Commands::Config { action } => commands::config::run(action),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
