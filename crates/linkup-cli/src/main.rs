use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "linkup")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Automated LinkedIn connection requests with personalized notes",
    long_about = "Linkup drives a Chrome session through a list of LinkedIn profiles, \
                  sending each a connection request with a short note generated by a \
                  local Ollama model. Credentials come from LINKEDIN_EMAIL and \
                  LINKEDIN_PASSWORD in the environment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a list of profiles, sending connection requests
    Run {
        /// Path to the JSON profile list (array of {name, url, ...})
        #[arg(short, long, value_name = "FILE")]
        profiles: PathBuf,

        /// Path to a JSON selector override file
        #[arg(long, value_name = "FILE")]
        selectors: Option<PathBuf>,

        /// Run Chrome without a visible window
        #[arg(long)]
        headless: bool,

        /// Minimum pause between profiles, in seconds
        #[arg(long, value_name = "SECONDS")]
        min_delay: Option<u64>,

        /// Maximum pause between profiles, in seconds
        #[arg(long, value_name = "SECONDS")]
        max_delay: Option<u64>,
    },

    /// Generate a single note without touching the browser
    Note {
        /// Profile name to personalize for
        #[arg(long, conflicts_with = "prompt", required_unless_present = "prompt")]
        name: Option<String>,

        /// Profile's current position
        #[arg(long, requires = "name")]
        position: Option<String>,

        /// Send a raw prompt instead of a profile
        #[arg(long)]
        prompt: Option<String>,

        /// Model to use (default: llama2, or LINKUP_MODEL)
        #[arg(long)]
        model: Option<String>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            profiles,
            selectors,
            headless,
            min_delay,
            max_delay,
        } => commands::run::execute(&profiles, selectors.as_deref(), headless, min_delay, max_delay),
        Commands::Note {
            name,
            position,
            prompt,
            model,
        } => commands::note::execute(name, position, prompt, model),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("linkup=debug,linkup_core=debug,linkup_browser=debug,linkup_notegen=debug")
    } else {
        EnvFilter::new("linkup=info,linkup_browser=info,linkup_notegen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
