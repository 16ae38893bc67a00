use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{
    poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind,
};
use ratatui::DefaultTerminal;
use termfolio::app::App;
use termfolio::config::Config;
use termfolio::services::mail_relay::EmailJsRelay;
use termfolio::services::tip_flag::TipFlags;
use termfolio::services::tracing_setup;
use termfolio::ui;

/// An animated portfolio page that runs in the terminal
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "An animated single-page portfolio for the terminal", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Override the animation clock period in milliseconds
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Override the effect seed (fixed by default for reproducible motion)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Don't show or persist the first-run shortcuts tip
    #[arg(long)]
    no_tips: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms.max(1);
    }
    if let Some(seed) = args.seed {
        config.effects.seed = seed;
    }

    if args.dump_config {
        println!("{}", config.dump_json()?);
        return Ok(());
    }

    let log_path = args.log_file.clone().unwrap_or_else(|| {
        std::env::temp_dir().join(format!(
            "termfolio-{}.log",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    });
    tracing_setup::init_global(&log_path)?;
    tracing::info!("termfolio starting, log file: {}", log_path.display());

    let tips = if args.no_tips {
        TipFlags::load(None)
    } else {
        TipFlags::load(TipFlags::default_path())
    };
    let relay = Arc::new(EmailJsRelay::new(config.relay.clone()));

    let mut terminal = ratatui::init();
    let size = terminal.size().context("querying terminal size")?;
    let mut app = App::new(config, relay, tips, size.width, size.height);

    let result = run_event_loop(&mut app, &mut terminal);
    ratatui::restore();
    result
}

/// Main event loop: one shared animation clock, frame-budgeted rendering,
/// input handled as it arrives.
fn run_event_loop(app: &mut App, terminal: &mut DefaultTerminal) -> AnyhowResult<()> {
    const FRAME_DURATION: Duration = Duration::from_millis(16); // 60fps ceiling

    let tick_duration = Duration::from_millis(app.tick_ms());
    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();
    let mut needs_render = true;

    loop {
        // Relay outcomes from submission worker threads.
        if app.process_async_messages() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        // The one timer in the process: everything animated hangs off it.
        if last_tick.elapsed() >= tick_duration {
            app.on_clock_tick();
            last_tick = Instant::now();
            needs_render = true;
        }

        if needs_render && last_render.elapsed() >= FRAME_DURATION {
            terminal.draw(|frame| ui::render(frame, app))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let until_tick = tick_duration.saturating_sub(last_tick.elapsed());
        let timeout = if needs_render {
            until_tick.min(FRAME_DURATION.saturating_sub(last_render.elapsed()))
        } else {
            until_tick
        };

        if event_poll(timeout)? {
            match event_read()? {
                CrosstermEvent::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Press && app.handle_key(key_event) {
                        needs_render = true;
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    app.resize(width, height);
                    needs_render = true;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
