//! Siteform - terminal client for a static site's contact forms
//!
//! A Ratatui-based TUI that validates form fields as the visitor types and
//! submits the form as JSON to the site's form endpoint.

mod app;
mod config;
mod controller;
mod i18n;
mod platform;
mod state;
mod submit;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::SiteConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use submit::HttpTransport;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "siteform", version, about = "Fill in and submit a site's contact forms")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root the form endpoint resolves against
    #[arg(long)]
    site_url: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

/// Log to a file; the alternate screen owns stdout and stderr
fn init_logging(verbose: bool) -> WorkerGuard {
    let log_dir = ProjectDirs::from("io", "siteform", "siteform")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    let file_appender = tracing_appender::rolling::never(log_dir, "siteform.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if verbose { "siteform=debug" } else { "siteform=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = match &cli.config {
        // A fresh file is being created from the defaults
        Some(path) if cli.init_config && !path.exists() => SiteConfig::default(),
        Some(path) => SiteConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SiteConfig::load()?,
    };
    // The command line wins over the environment
    let config = config
        .with_env_overrides()
        .with_site_url(cli.site_url.clone());
    config.validate()?;
    Ok(config)
}

/// Write the effective configuration; returns where it went
fn write_config(cli: &Cli, config: &SiteConfig) -> Result<Option<PathBuf>> {
    let path = cli.config.clone().or_else(SiteConfig::config_path);
    match &path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    tracing::info!(?path, "configuration written");
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose);

    let config = load_config(&cli)?;
    if cli.init_config {
        if let Some(path) = write_config(&cli, &config)? {
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let transport = HttpTransport::new(&config.site_url, &config.endpoint, config.request_timeout())
        .context("configuring the form endpoint")?;
    let endpoint = transport.endpoint().to_string();
    tracing::info!(%endpoint, locale = ?config.locale, "starting");

    let mut app = App::new(&config, endpoint, Arc::new(transport));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("{err:?}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(app.poll_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    app.handle_key(key);
                }
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on the next draw
                }
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit() {
            tracing::info!("quitting");
            return Ok(());
        }
    }
}
