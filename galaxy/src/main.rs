//! Galaxy Math Academy terminal game.
//!
//! Shoot down alien ships by answering multiplication questions up to
//! 19 x 19, with story dialogue written live by Claude.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripted
//! play:
//!
//! ```bash
//! cargo run -p galaxy -- --headless --offline --seed 7
//! ```

mod app;
mod effects;
mod events;
mod headless;
mod ui;

use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use galaxy_core::{Game, GameConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// Frame interval; also the input poll timeout.
const TICK_RATE: Duration = Duration::from_millis(30);

/// Command line options.
#[derive(Debug, Default)]
struct Args {
    headless: bool,
    offline: bool,
    help: bool,
    seed: Option<u64>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => parsed.headless = true,
            "--offline" => parsed.offline = true,
            "-h" | "--help" => parsed.help = true,
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                parsed.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed {value:?}"))?,
                );
            }
            other => anyhow::bail!("unknown argument {other:?} (try --help)"),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let raw: Vec<String> = std::env::args().collect();
    let args = parse_args(&raw)?;
    if args.help {
        print_help();
        return Ok(());
    }

    init_logging(!args.headless)?;

    let mut config = GameConfig::from_env()?;
    if args.offline {
        config = config.offline();
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    tracing::info!(online = config.is_online(), seed = ?config.seed, "starting");

    if args.headless {
        return headless::run_headless(&config).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(Game::from_config(&config), config.is_online());
    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so it logs to a file; headless mode logs to
/// stderr and keeps stdout for the protocol.
fn init_logging(to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("GALAXY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let path = std::env::var("GALAXY_LOG_FILE").unwrap_or_else(|_| "galaxy.log".to_string());
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {path}"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Fold in any narrative that arrived since the last frame
        if let Some(kind) = app.game.poll_narrative().await {
            app.on_job_finished(kind);
        }

        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Galaxy Math Academy - multiplication space shooter");
    println!();
    println!("USAGE:");
    println!("  galaxy [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run in headless mode (line protocol, no TUI)");
    println!("  --offline        Never call the API; use built-in dialogue");
    println!("  --seed <N>       Seed the question generator");
    println!();
    println!("ENVIRONMENT:");
    println!("  ANTHROPIC_API_KEY     Enables live story dialogue");
    println!("  GALAXY_MODEL          Model override");
    println!("  GALAXY_MAX_TOKENS     Reply length limit (default 512)");
    println!("  GALAXY_TEMPERATURE    Sampling temperature (default 0.9)");
    println!("  GALAXY_TTS_COMMAND    Speech command, e.g. \"espeak-ng -v cmn\"");
    println!("  GALAXY_LOG            Log filter (default warn)");
    println!("  GALAXY_LOG_FILE       TUI log file (default galaxy.log)");
    println!();
    println!("KEYS:");
    println!("  Enter          Start / next line / fire / back to base");
    println!("  0-9            Type answer");
    println!("  Backspace      Delete digit");
    println!("  c              Clear answer");
    println!("  q, Ctrl+C      Quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("galaxy")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&["--headless", "--offline", "--seed", "9"])).unwrap();
        assert!(parsed.headless);
        assert!(parsed.offline);
        assert_eq!(parsed.seed, Some(9));
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }
}
