//! sertop: live terminal dashboard for a serial-attached sensor
//!
//! Connects to a serial port, reads `<device-ms> <temperature>
//! <humidity>` lines, and renders charts, alert banners, and a
//! recent-data table.
//!
//! Run: `sertop --port /dev/ttyUSB0 --connect`

use sertop::{app, ui};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use app::App;
use sertop::config::Config;
use sertop::state::BaudRate;

/// sertop: live serial sensor dashboard
#[derive(Parser, Debug)]
#[command(name = "sertop")]
#[command(version)]
#[command(about = "Live terminal dashboard for serial sensor data", long_about = None)]
struct Cli {
    /// Serial port, e.g. /dev/ttyUSB0 or COM8
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (9600, 19200, 38400, 57600 or 115200)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Poll cadence in milliseconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Readings to retain per series
    #[arg(long)]
    capacity: Option<usize>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Connect immediately on startup
    #[arg(long)]
    connect: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default_path()
            .filter(|p| p.exists())
            .map(Config::load_or_default)
            .unwrap_or_default(),
    };

    // CLI flags win over the file.
    if let Some(port) = &cli.port {
        config.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        match BaudRate::try_from(baud) {
            Ok(b) => config.baud = b,
            Err(e) => bail!(e),
        }
    }
    if let Some(refresh) = cli.refresh {
        config.refresh_ms = refresh;
    }
    if let Some(capacity) = cli.capacity {
        if capacity == 0 {
            bail!("capacity must be at least 1");
        }
        config.capacity = capacity;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, config, cli.connect);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: Config,
    connect: bool,
) -> Result<()> {
    let refresh = config.refresh_interval();
    let mut app = App::new(config);
    if connect {
        app.connect();
    }

    let tick_rate = Duration::from_millis(50);
    let mut last_poll = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        // Poll the port on the configured cadence.
        if last_poll.elapsed() >= refresh {
            app.poll_tick();
            last_poll = Instant::now();
        }

        // Handle events; this is the only place the loop suspends, so
        // keystrokes take effect within one tick.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    app.shutdown();
                    return Ok(());
                }
            }
        }
    }
}
