//! talentscout - terminal dashboard for the candidate sourcing backend.

mod tasks;

use camino::Utf8Path;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use miette::{IntoDiagnostic, Result};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use talentscout_api::ApiClient;
use talentscout_cli::Args;
use talentscout_monitor::{App, Theme};
use talentscout_workflow::{Poller, WorkflowEvent};
use tasks::TaskRunner;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let client = Arc::new(ApiClient::new(&args.client_config()).into_diagnostic()?);
    tracing::info!("talentscout {} using {}", env!("CARGO_PKG_VERSION"), client.base_url());

    let (tx, mut rx) = unbounded_channel();
    let mut tasks = TaskRunner::new(
        client,
        Poller::new(args.poller_config()),
        tx,
        runtime.handle().clone(),
    );
    tasks.check_health();
    tasks.refresh(false);

    let mut app = App::new(
        args.stale_page_policy(),
        Theme::from_name(&args.theme),
        args.api_url.clone(),
    );

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let res = run_app(&mut terminal, &mut app, &mut rx, &mut tasks);

    tasks.shutdown();

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    runtime.shutdown_timeout(Duration::from_millis(500));

    if let Err(err) = res {
        tracing::error!("Dashboard error: {}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Log to a file; the terminal is owned by the dashboard.
fn init_logging(path: &Utf8Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .into_diagnostic()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(file).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(())
}

/// Main application loop.
fn run_app<B: Backend, A: talentscout_api::Backend + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut UnboundedReceiver<WorkflowEvent>,
    tasks: &mut TaskRunner<A>,
) -> io::Result<()>
where
    io::Error: From<B::Error>,
{
    let tick_rate = Duration::from_millis(100);

    loop {
        // Apply everything background tasks reported since the last frame
        while let Ok(event) = events.try_recv() {
            app.apply_event(event);
        }

        terminal.draw(|frame| app.render(frame))?;

        if let Some(action) = app.poll_events(tick_rate)? {
            tasks.dispatch(action);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
