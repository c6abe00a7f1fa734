#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::thread;
use std::time::{Duration, Instant};

use blockstack::app::{App, AppResult};
use blockstack::cadence::Cadence;
use blockstack::config::loader;
use blockstack::ui;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Keep log output off the terminal the game draws on
    let log_path = "blockstack.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Blockstack");

    let config = match loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            blockstack::config::Config::default()
        }
    };

    let frame_interval = Duration::from_millis(config.display.frame_interval_ms.max(1));
    let app = App::new(config).with_score_store();

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (sender, receiver) = unbounded();
    spawn_input_thread(sender);

    let res = run_app(&mut terminal, app, &receiver, frame_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

// Terminal events are read on their own thread and applied on the game thread.
fn spawn_input_thread(sender: Sender<Event>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read terminal event: {e}");
                    break;
                }
            }
        }
    });
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    events: &Receiver<Event>,
    frame_interval: Duration,
) -> AppResult<()> {
    let mut last_update = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        // Wake for the next gravity tick or the next frame, whichever is first
        let wait = app
            .world
            .resource::<Cadence>()
            .until_next()
            .map_or(frame_interval, |until| until.min(frame_interval));

        match events.recv_timeout(wait) {
            Ok(event) => app.handle_event(&event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Input thread finished");
                return Ok(());
            }
        }

        let now = Instant::now();
        app.on_tick(now.duration_since(last_update));
        last_update = now;

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
