mod app;
mod catalog;
mod config;
mod host;
mod plugin;
mod service;
mod system;
mod ui;
mod utils;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use crate::app::{App, Shell};
use crate::catalog::CatalogStore;
use crate::config::{AddonInfo, Settings, LOG_FILE};
use crate::host::stdio::StdioHost;
use crate::plugin::Dispatcher;
use crate::service::ShutdownMonitor;
use crate::system::opener::SystemOpener;
use crate::system::signal::{RefreshFlag, SignalFile};

/// A personal launcher for external programs, games and files.
#[derive(Debug, Parser)]
#[command(name = "simple-launcher", version, about)]
struct Cli {
    /// Profile directory holding programs.json (defaults to the platform data dir).
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Add-on id used in plugin:// URLs.
    #[arg(long, global = true)]
    addon_id: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse the catalog in the terminal (default).
    Shell {
        /// Show the reduced widget listing.
        #[arg(long)]
        widget: bool,
    },
    /// Run one plugin URL or query string and print the listing as JSON.
    Invoke {
        /// e.g. `plugin://plugin.program.simplelauncher/?action=add` or `action=add`.
        url: String,
        #[arg(long)]
        widget: bool,
    },
    /// Signal running shells to refresh on a fixed interval until interrupted.
    Service,
}

fn init_logging(settings: &Settings, writer: BoxMakeWriter, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}

/// The shell owns the screen, so its logs go to a file in the profile.
fn log_file_writer(addon: &AddonInfo) -> BoxMakeWriter {
    let path = addon.profile.join(LOG_FILE);
    let opened = std::fs::create_dir_all(&addon.profile)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    match opened {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

fn run_terminal(app: &mut App, shell: &mut Shell<'_>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alt screen")?;

    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to init terminal")?;
    app::run(app, &mut terminal, shell)
}

fn run_shell(addon: AddonInfo, settings: &Settings, widget: bool) -> Result<()> {
    let store = CatalogStore::open(&addon.profile).context("failed to open catalog")?;
    let opener = SystemOpener::detect();
    info!(
        addon = %addon.id,
        install = %addon.path.display(),
        catalog = %store.path().display(),
        platform = opener.platform().label(),
        widget,
        "starting shell"
    );
    let refresh = Arc::new(RefreshFlag::default());
    let monitor = ShutdownMonitor::new();

    let refresh_loop = {
        let monitor = Arc::clone(&monitor);
        let refresh = Arc::clone(&refresh);
        let interval = settings.refresh_interval();
        thread::Builder::new()
            .name("refresh".to_string())
            .spawn(move || service::run(&monitor, refresh.as_ref(), interval))
            .context("failed to start refresh loop")?
    };

    let signal = SignalFile::new(&addon.profile);
    let mut shell = Shell {
        dispatcher: Dispatcher::new(&store, &opener, settings.notification_duration()),
        watcher: signal.clone().watch(),
        signal,
        refresh: refresh.as_ref(),
        toast: settings.notification_duration(),
    };
    let mut app = App::new(addon, widget);

    let result = run_terminal(&mut app, &mut shell);

    monitor.request_abort();
    if refresh_loop.join().is_err() {
        warn!("refresh loop panicked");
    }
    info!("shell closed");
    result
}

fn run_invoke(addon: AddonInfo, settings: &Settings, url: &str, widget: bool) -> Result<()> {
    let store = CatalogStore::open(&addon.profile).context("failed to open catalog")?;
    let opener = SystemOpener::detect();
    debug!(
        catalog = %store.path().display(),
        platform = opener.platform().label(),
        "invoking"
    );
    let dispatcher = Dispatcher::new(&store, &opener, settings.notification_duration());

    let stdin = io::stdin();
    let mut host = StdioHost::new(
        addon,
        widget,
        stdin.lock(),
        io::stdout().lock(),
        io::stderr(),
    );
    dispatcher
        .dispatch(&mut host, url)
        .with_context(|| format!("failed to handle {url}"))
}

fn run_service(addon: AddonInfo, settings: &Settings) -> Result<()> {
    let monitor = ShutdownMonitor::new();
    {
        let monitor = Arc::clone(&monitor);
        ctrlc::set_handler(move || monitor.request_abort())
            .context("failed to install interrupt handler")?;
    }

    let signal = SignalFile::new(&addon.profile);
    std::fs::create_dir_all(&addon.profile)
        .with_context(|| format!("failed to create {}", addon.profile.display()))?;
    service::run(&monitor, &signal, settings.refresh_interval());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let addon = AddonInfo::resolve(cli.addon_id, cli.profile);
    let loaded = Settings::load(&addon.profile);
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    let command = cli.command.unwrap_or(Command::Shell { widget: false });

    match command {
        Command::Shell { .. } => init_logging(&settings, log_file_writer(&addon), false),
        _ => init_logging(&settings, BoxMakeWriter::new(io::stderr), true),
    }
    if let Err(err) = &loaded {
        warn!(error = %err, "settings unusable, using defaults");
    }

    match command {
        Command::Shell { widget } => run_shell(addon, &settings, widget),
        Command::Invoke { url, widget } => run_invoke(addon, &settings, &url, widget),
        Command::Service => run_service(addon, &settings),
    }
}
