//! Main entry point for the MR->QR terminal studio

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    panic,
    path::PathBuf,
    time::{Duration, Instant},
};

use mrqr::{
    clock::{Clock, SystemClock},
    config::Config,
    export::{export_file_name, save_surface, DirectorySink, SystemClipboard},
    input::handle_event,
    logging,
    render::render,
    session::Session,
    settings::{SettingKey, SettingValue},
    state::{AppState, InputMode},
    terminal_capabilities::detect_capabilities,
    ui,
    worker::{spawn_worker, WorkerHandle},
};

/// Target frame time for 60 FPS
const FRAME_TIME_MS: u64 = 16;

/// Command-line options
#[derive(Debug, Default)]
struct CliArgs {
    text: Option<String>,
    mode: Option<InputMode>,
    settings: Vec<(SettingKey, SettingValue)>,
    out_dir: Option<PathBuf>,
    dark: bool,
    export_once: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args;

    while let Some(a) = iter.next() {
        match a.as_str() {
            "--text" => cli.text = Some(iter.next().context("--text needs a value")?),
            "--mode" => {
                let mode = iter.next().context("--mode needs text or url")?;
                cli.mode = Some(mode.parse().map_err(anyhow::Error::msg)?);
            }
            "--set" => {
                let assignment = iter.next().context("--set needs key=value")?;
                cli.settings.push(SettingValue::parse_assignment(&assignment)?);
            }
            "--out-dir" => {
                cli.out_dir = Some(PathBuf::from(iter.next().context("--out-dir needs a path")?));
            }
            "--dark" => cli.dark = true,
            "--export-once" => cli.export_once = true,
            other => bail!("unknown argument '{}'", other),
        }
    }

    Ok(cli)
}

/// Build the initial state from config and command line
fn initial_state(cli: &CliArgs, config: &Config) -> Result<AppState> {
    let mut state = AppState::new(cli.dark || config.ui.start_dark);
    if let Some(ref text) = cli.text {
        state.set_text(text.clone());
    }
    if let Some(mode) = cli.mode {
        state.set_mode(mode);
    }
    for (key, value) in &cli.settings {
        state.set_setting(*key, value.clone())?;
    }
    Ok(state)
}

fn main() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}; using defaults", e);
            Config::default()
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let state = initial_state(&cli, &config)?;
    let export_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| config.export.directory.clone());

    if cli.export_once {
        return run_export_once(&state, export_dir);
    }

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let capabilities = detect_capabilities();
    let workers = spawn_worker(Box::new(DirectorySink::new(&export_dir)))
        .context("Failed to spawn export worker")?;
    log::info!("session started, exporting to {}", export_dir.display());

    let mut session = Session::new(
        state,
        capabilities,
        Box::new(SystemClock::new()),
        Box::new(SystemClipboard::new()),
        workers.request_tx.clone(),
    );

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut session, &workers);
    cleanup_terminal(terminal)?;

    workers.shutdown();
    log::info!("session ended");

    result
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main event loop - handles input, advances timers, drains worker responses
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session,
    workers: &WorkerHandle,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_TIME_MS);

    loop {
        let frame_start = Instant::now();

        terminal.draw(|frame| ui::render(frame, session))?;

        let timeout = frame_duration.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            handle_event(event::read()?, session)?;
        }

        session.tick();

        while let Ok(response) = workers.response_rx.try_recv() {
            session.handle_worker_response(response);
        }

        if session.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the initial state once and write it straight to disk
fn run_export_once(state: &AppState, export_dir: PathBuf) -> Result<()> {
    let surface = render(&state.text, &state.settings)?
        .context("Nothing to export: text is empty (use --text)")?;

    let file_name = export_file_name(SystemClock::new().unix_millis());
    let path = save_surface(&mut DirectorySink::new(export_dir), &surface, &file_name)?;
    log::info!("exported {}", path.display());
    println!("{}", path.display());
    Ok(())
}
