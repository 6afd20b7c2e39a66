//! Alpha Quotes TUI Entry Point
//!
//! Loads configuration, constructs the Gemini gateway, and runs the
//! terminal surface.
//!
//! Configuration comes from `~/.config/alpha-quotes/config.toml` and the
//! environment; the API key is required (`GEMINI_API_KEY` or `API_KEY`).
//! Logs go to stderr so the alternate screen stays clean; tune them with
//! `RUST_LOG`.

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotes_core::{load_config, GeminiGateway, QuoteGateway};

use alpha_quotes_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs to stderr: stdout belongs to the alternate screen.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Resolve configuration before touching the terminal so a missing API
    // key prints a plain, readable error.
    let config = load_config().context("Failed to load configuration")?;
    let gateway_config = config.gateway_config()?;
    let gateway: Arc<dyn QuoteGateway> = Arc::new(GeminiGateway::new(gateway_config));
    let visuals_dir = config.visuals_dir.clone();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: alpha-quotes requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, gateway, visuals_dir).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    gateway: Arc<dyn QuoteGateway>,
    visuals_dir: std::path::PathBuf,
) -> anyhow::Result<()> {
    let mut app = App::new(gateway, visuals_dir);
    app.run(terminal).await
}
