//! mFiles: a terminal directory browser built with ratatui.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mfiles_core::config::keymap::Keymap;
use mfiles_core::config::settings::Config;
use mfiles_core::config::theme::Theme;
use mfiles_core::{CoreError, CoreResult};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::{config_dir, App};
use crate::input::{handle_key, InputAction};
use crate::render::render;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so the terminal UI is not disturbed. The filter comes from
/// `MFILES_LOG` (e.g. `MFILES_LOG=debug`).
fn init_tracing() -> anyhow::Result<()> {
    let log_path = std::env::temp_dir().join("mfiles.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let filter = EnvFilter::try_from_env("MFILES_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// A missing file means defaults; any other failure is logged, then defaults.
fn load_or_default<T: Default>(what: &str, result: CoreResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(CoreError::NotFound(_)) => T::default(),
        Err(e) => {
            tracing::warn!("{what}: {e}; using defaults");
            T::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cfg_dir = config_dir();
    let config = load_or_default("config", Config::load(&cfg_dir.join("default.toml")));
    let keymap = load_or_default("keymap", Keymap::load(&cfg_dir.join("keymap.toml")));
    let theme = load_or_default("theme", Theme::load(&cfg_dir.join("theme.toml")));
    tracing::info!(
        "starting with window_size={} font_size={}",
        config.ui.window_size,
        config.ui.font_size
    );

    let start_dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match &config.general.initial_directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        },
    };

    // Fail before touching the terminal if the start directory is unusable
    let app = App::new(&start_dir, &config, keymap, theme)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        app = match handle_key(key, &app.mode(), app.keymap()) {
            InputAction::Command(cmd) => app.handle_command(cmd),
            InputAction::ShowHelp => app.with_help(true),
            InputAction::HideHelp => app.with_help(false),
            InputAction::Quit => app.with_quit(),
            InputAction::None => app,
        };

        let (next, request) = app.take_editor_request();
        app = next;
        if let Some(path) = request {
            let argv = app.editor().resolve_argv();
            app = match launch_editor(terminal, &argv, &path) {
                Ok(()) => app,
                Err(e) => {
                    tracing::warn!("editor: {e}");
                    app.with_error(e.to_string())
                }
            };
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Suspends the TUI, runs the editor `argv` with `file_path` appended in the
/// file's directory, and restores the TUI afterwards.
fn launch_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    argv: &[String],
    file_path: &Path,
) -> anyhow::Result<()> {
    let Some((program, args)) = argv.split_first() else {
        anyhow::bail!("no editor configured");
    };
    let editor = argv.join(" ");
    tracing::info!("opening {} with {editor}", file_path.display());

    // Leave alternate screen and restore normal terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let mut command = std::process::Command::new(program);
    command.args(args).arg(file_path);
    if let Some(dir) = file_path.parent() {
        command.current_dir(dir);
    }
    let status = command.status();

    // Re-enter alternate screen regardless of editor result
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => anyhow::bail!("{editor} exited with {s}"),
        Err(e) => anyhow::bail!("failed to launch {editor}: {e}"),
    }
}
