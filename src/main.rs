//! Terminal front end of the anniversary countdown.
//!
//! Shows the days since the stored anniversary and the upcoming milestones,
//! refreshed every second with `watch`, and edits the stored date with `set`.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anniversary::store::{self, FileStore, Store};
use anniversary::tick::{self, SystemClock};
use anniversary::{Board, Config, Date, config, logging, zone};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "anniversary",
    version,
    about = "Days since your anniversary, and the milestones ahead"
)]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = "anniversary.toml")]
    config: PathBuf,
    /// IANA time zone, overriding the configured one (e.g. `Asia/Tokyo`).
    #[arg(long, global = true)]
    timezone: Option<String>,
    /// Log this program's debug events to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the countdown once.
    Show,
    /// Redraw the countdown every second.
    Watch {
        /// Stop after this many ticks.
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Print the stored anniversary.
    Get,
    /// Replace the stored anniversary.
    Set {
        /// New anniversary, `YYYY-MM-DD`.
        date: Date,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("load config `{}`", cli.config.display()))?;
    if let Some(name) = &cli.timezone {
        config.timezone = config::parse_timezone(name)?;
    }
    let mut store = FileStore::new(&config.store);

    match cli.command {
        Command::Show => cmd_show(&config, &store),
        Command::Watch { ticks } => cmd_watch(&config, &store, ticks),
        Command::Get => cmd_get(&store),
        Command::Set { date } => cmd_set(&mut store, date),
    }
}

fn cmd_show(config: &Config, store: &FileStore) -> Result<()> {
    let board = board(config, anniversary_or_default(store))?;
    println!("{}", board.snapshot(&chrono::Utc::now()).render());
    Ok(())
}

fn cmd_watch(config: &Config, store: &FileStore, ticks: Option<u64>) -> Result<()> {
    let mut current = anniversary_or_default(store);
    let mut board = board(config, current)?;
    let mut stdout = io::stdout().lock();
    let mut count = 0;
    let mut failure = None;

    tick::run(&mut board, &SystemClock, tick::PERIOD, |board, snapshot| {
        // Clear the screen and home the cursor before each frame.
        if let Err(e) = writeln!(stdout, "\x1b[2J\x1b[H{}", snapshot.render())
            .and_then(|()| stdout.flush())
        {
            failure = Some(e);
            return ControlFlow::Break(());
        }
        count += 1;
        if ticks.is_some_and(|limit| count >= limit) {
            return ControlFlow::Break(());
        }
        // Pick up `anniversary set` from another terminal.
        let stored = anniversary_or_default(store);
        if stored != current {
            match zone::start_of_day(&config.timezone, stored) {
                Some(reference) => {
                    board.set_reference(reference);
                    current = stored;
                }
                None => warn!(date = %stored, "stored anniversary out of range, ignoring"),
            }
        }
        ControlFlow::Continue(())
    });

    match failure {
        Some(e) => Err(e).context("write to stdout"),
        None => Ok(()),
    }
}

fn cmd_get(store: &FileStore) -> Result<()> {
    let date = store::load_anniversary(store)
        .with_context(|| format!("read store `{}`", store.path().display()))?;
    println!("{date}");
    Ok(())
}

fn cmd_set(store: &mut FileStore, date: Date) -> Result<()> {
    store::save_anniversary(store, date)
        .with_context(|| format!("write store `{}`", store.path().display()))?;
    info!(%date, "anniversary saved");
    println!("{date}");
    Ok(())
}

/// Reads the stored anniversary; an unreadable value is reported and replaced
/// by the default so the countdown always renders.
fn anniversary_or_default<S: Store>(store: &S) -> Date {
    store::load_anniversary(store).unwrap_or_else(|e| {
        warn!(error = %e, default = %store::DEFAULT_ANNIVERSARY, "falling back to default anniversary");
        store::DEFAULT_ANNIVERSARY
    })
}

fn board(config: &Config, date: Date) -> Result<Board<Tz>> {
    Board::from_date(&config.timezone, date, config.milestones.clone())
        .with_context(|| format!("anniversary {date} is out of range"))
}
