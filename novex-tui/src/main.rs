use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use novex_core::{
    ensure_data_dir, Assistant, CompletionProvider, GeminiProvider, MockProvider, NovexConfig,
};

mod app;
mod theme;
mod ui;

use app::App;

#[derive(Debug, Parser)]
#[command(name = "novex", version, about = "Terminal chat for the Novex DeFi AI assistant")]
struct Cli {
    /// Run against canned demo responses instead of the live model
    #[arg(long)]
    demo: bool,

    /// Override the configured model id
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = NovexConfig::load()?;
    if let Some(model) = cli.model {
        config.llm.model = model;
    }

    setup_logging(&config)?;

    let provider: Arc<dyn CompletionProvider> = if cli.demo {
        Arc::new(MockProvider::new())
    } else {
        match GeminiProvider::from_config(&config.llm) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                eprintln!("{e}");
                if let Some(hint) = e.user_suggestion() {
                    eprintln!("  Suggestion: {hint}");
                }
                std::process::exit(1);
            }
        }
    };

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, provider, &config);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Log to a file in the data dir; stdout belongs to the alternate screen.
fn setup_logging(config: &NovexConfig) -> Result<()> {
    let log_dir = ensure_data_dir()?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("novex-tui.log"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    provider: Arc<dyn CompletionProvider>,
    config: &NovexConfig,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut app = App::new(Assistant::new(provider), &config.tui);
        app.run(terminal).await
    })
}
