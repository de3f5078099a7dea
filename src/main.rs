use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradientcraft::clipboard::SystemClipboard;
use gradientcraft::config::GradientConfig;
use gradientcraft::gradient::css_declaration;
use gradientcraft::tui::app::GradientApp;
use gradientcraft::tui::runner::{run_tui, RunnerContext};

#[derive(Parser)]
#[command(name = "gradientcraft", about = "CSS gradient generator. Live preview, copy the CSS.")]
struct Cli {
    /// Config file (defaults to .gradientcraft/config.yaml, then ~/.gradientcraft/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the CSS declaration and exit instead of opening the TUI
    #[arg(short, long)]
    print: bool,

    /// With --print: randomize the gradient first
    #[arg(short, long, requires = "print")]
    random: bool,

    /// Seed for the random source (reproducible colors)
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("gradientcraft=info".parse()?);
    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else if cli.print {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => GradientConfig::load_from(path)?,
        None => GradientConfig::load(),
    };

    let mut app = GradientApp::from_config(&config, cli.seed);

    if cli.print {
        if cli.random {
            app.randomize();
        }
        println!("{}", css_declaration(&app.state));
        return Ok(());
    }

    info!("gradientcraft starting");

    let ctx = RunnerContext {
        clipboard: Arc::new(SystemClipboard),
        config,
        preset_path: cli.config.clone(),
    };
    run_tui(app, ctx).await
}
