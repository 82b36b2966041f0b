//! Konteks - AI-assisted organizational context analysis in your terminal.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use konteks::{tui, Config, DraftingGateway, GeminiProvider, WizardApp};

/// AI-assisted organizational context analysis (SWOT / PESTLE / TOWS)
#[derive(Parser)]
#[command(name = "konteks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use for drafting (overrides config)
    #[arg(short, long, global = true)]
    model: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis wizard (default)
    Run,

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GEMINI_API_KEY from a local .env during development
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None | Some(Commands::Run) => run_wizard(cli.model).await,
        Some(Commands::Config { path }) => show_config(path),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "konteks", &mut io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr so they do not tear the alternate screen.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "konteks=debug" } else { "konteks=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run_wizard(model_override: Option<String>) -> Result<()> {
    let config = Config::load()?;

    let model = model_override.unwrap_or_else(|| config.ai.model.clone());
    let mut provider = GeminiProvider::new()?.with_model(model);
    if let Some(base_url) = &config.ai.base_url {
        provider = provider.with_base_url(base_url.as_str());
    }

    let gateway = DraftingGateway::new(Arc::new(provider));
    let mut app = WizardApp::new(gateway);
    if let Some(dir) = &config.export.output_dir {
        app = app.with_output_dir(dir.clone());
    }

    tui::run_tui(app).await
}

fn show_config(path_only: bool) -> Result<()> {
    if path_only {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("could not determine the config directory"),
        }
        return Ok(());
    }
    let config = Config::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
