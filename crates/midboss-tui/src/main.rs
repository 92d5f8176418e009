mod app;
mod cue;
mod ui;

use anyhow::{bail, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use midboss_core::models::{Config, Preset};
use midboss_core::storage::{init_config_dir, ConfigStorage};
use midboss_timer::{TimerController, TimerEventType};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn setup_logging(config: &Config) -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("midboss-tui.log");

    let level = &config.logging.level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("midboss={level},midboss_timer={level}"))
    });

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "midboss")]
#[command(about = "MidBoss Timer - preset countdown with a last-30-seconds alert", long_about = None)]
struct Args {
    /// Config file (defaults to <config dir>/midboss/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset to select at startup, in minutes (5, 6 or 7)
    #[arg(short, long)]
    preset: Option<u64>,

    /// Disable the terminal bell and desktop notifications
    #[arg(long)]
    mute: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let storage = match &args.config {
        Some(path) => ConfigStorage::from_file(path.clone()),
        None => ConfigStorage::new(init_config_dir()?),
    };

    let mut config = storage.load()?;
    if args.mute {
        config.mute();
    }
    Ok(config)
}

fn initial_preset(args: &Args, config: &Config) -> Result<Option<Preset>> {
    match args.preset {
        Some(minutes) => match Preset::from_minutes(minutes) {
            Some(preset) => Ok(Some(preset)),
            None => bail!("No {} minute preset, choose 5, 6 or 7", minutes),
        },
        None => Ok(config.default_preset),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let preset = initial_preset(&args, &config)?;

    setup_logging(&config)?;
    setup_panic_hook();
    info!("MidBoss TUI starting up");

    let (cue, bell) = cue::build_alert_cue(&config.alerts);
    let controller = TimerController::new(cue);
    if let Some(preset) = preset {
        controller.select_timer(preset.seconds());
    }
    let mut timer_events = controller.subscribe();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, config.alerts.clone());

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if let Some(bell) = &bell {
            bell.ring_if_pending(terminal.backend_mut())?;
        }

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = timer_events.recv() => match event {
                Ok(event) => {
                    if app.handle_timer_event(&event) && app.alerts.desktop_notifications {
                        tokio::task::spawn_blocking(|| {
                            cue::send_urgent_notification(
                                "⏰ Time's up!",
                                "Your countdown has finished.",
                            )
                        });
                    }
                    if !matches!(event.event_type, TimerEventType::Tick { .. }) {
                        info!(event = event.event_type.name(), "Timer event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} timer events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::time::sleep(Duration::from_millis(16)) => {
                if event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.handle_key(key.code);
                        }
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    app.controller.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("MidBoss TUI shut down");
    Ok(())
}
