//! otpfield - One-Time Code Entry
//!
//! A terminal one-time-password entry made of single-character cells.
//! Typing moves focus forward, Backspace on an empty cell moves back, and
//! codes can be pasted from the clipboard.

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;

use otpfield::application::{App, OtpEntry};
use otpfield::domain::{platform, Platform};
use otpfield::infrastructure::{init_tracing, AppConfig, ConfigRepository};
use otpfield::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "otpfield", version, about = "Terminal one-time-code entry")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cells, overriding the config
    #[arg(long)]
    cells: Option<usize>,

    /// Mask entered characters
    #[arg(long)]
    secure: bool,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective config to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

/// Entry point for the otpfield terminal application.
///
/// Loads the configuration, installs the platform traits, sets up the
/// terminal and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the config cannot be read, logging cannot be set up,
/// or the terminal fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigRepository::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(cells) = cli.cells {
        config.cells = cells;
    }
    if cli.secure {
        config.options.secure_text_entry = true;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }

    if let Some(path) = &cli.write_config {
        ConfigRepository::save(&config, path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(log_file) = &config.log_file {
        init_tracing(log_file)?;
    }

    let detected = config.platform.clone().unwrap_or_else(Platform::detect);
    platform::install(&detected);

    let mut app = App::new(OtpEntry::new(config.cells, config.options, config.style));
    app.entry.focus(0);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if let Some(code) = &app.submitted {
        println!("{code}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Draws a frame, runs the cells' post-render effects (drawing again when
/// they changed a native control), then handles one key.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;
        if app.entry.commit() {
            terminal.draw(|f| render_ui(f, app))?;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
