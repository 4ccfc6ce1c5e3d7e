//! Terminal Chroma Flood runner (default binary).
//!
//! Line-oriented: the board is redrawn after every move and the next color is
//! read from stdin by palette number or name. `--auto` plays the solver's hints.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Metadata, Record};

use chroma_flood::cli::{parse_args, CliConfig, Command, USAGE};
use chroma_flood::core::GameSession;
use chroma_flood::engine::{
    campaign_level, generate_level, load_progress, save_progress, CalendarDate, DailyChallenge,
    DailyResult,
};
use chroma_flood::store::FileStore;
use chroma_flood::term::{draw_session, outcome_line};
use chroma_flood::types::{Color, GameStatus};

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(verbose: bool) {
    // Only fails if a logger is already installed.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
}

/// What the finished session counts toward
enum Mode {
    Campaign(usize),
    Daily(CalendarDate),
    Free,
}

enum Input {
    Color(Color),
    Hint,
    Quit,
    Invalid,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = parse_args(&args)?;
    init_logger(config.verbose);
    run(&config)
}

fn run(config: &CliConfig) -> Result<()> {
    let (mut session, title, mode) = match &config.command {
        Command::Level { index } => {
            let level = campaign_level(*index);
            (
                level.session(),
                format!("Level {}", index + 1),
                Mode::Campaign(*index),
            )
        }
        Command::Daily { date } => {
            let date = match date {
                Some(d) => *d,
                None => today()?,
            };
            let challenge = DailyChallenge::for_date(date);
            (
                challenge.level.session(),
                format!("Daily #{} ({})", challenge.number, date),
                Mode::Daily(date),
            )
        }
        Command::Play { seed, difficulty } => {
            let seed = seed.unwrap_or_else(time_seed);
            let level = generate_level(*difficulty, seed);
            (
                level.session(),
                format!("Free play, {} (seed {})", difficulty.as_str(), seed),
                Mode::Free,
            )
        }
    };

    println!("{}", title);
    play(&mut session, config.auto)?;
    finish(&mut session);

    if let Some(dir) = &config.save_dir {
        record_progress(dir, &mode, &session)?;
    }
    Ok(())
}

fn play(session: &mut GameSession, auto: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while session.status() == GameStatus::Playing {
        draw_session(session)?;

        let color = if auto {
            match session.hint() {
                Some(c) => c,
                None => break,
            }
        } else {
            print!("color> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            match parse_input(line?.trim(), session.palette()) {
                Input::Color(c) => c,
                Input::Hint => {
                    match session.hint() {
                        Some(c) => println!("hint: {}", c.as_str()),
                        None => println!("no hint available"),
                    }
                    continue;
                }
                Input::Quit => break,
                Input::Invalid => {
                    println!("enter a palette number or color name, 'hint' or 'quit'");
                    continue;
                }
            }
        };

        match session.perform_move(color) {
            Some(outcome) => println!("{}", outcome_line(&outcome)),
            None => println!("{} does not change the board", color.as_str()),
        }
    }

    draw_session(session)
}

fn parse_input(input: &str, palette: &[Color]) -> Input {
    match input {
        "q" | "quit" => return Input::Quit,
        "h" | "hint" => return Input::Hint,
        _ => {}
    }
    if let Ok(n) = input.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| palette.get(i)) {
            Some(&c) => Input::Color(c),
            None => Input::Invalid,
        };
    }
    match Color::from_str(input) {
        Some(c) => Input::Color(c),
        None => Input::Invalid,
    }
}

fn finish(session: &mut GameSession) {
    match session.status() {
        GameStatus::Won => {
            let remaining = session.moves_remaining();
            let mut total = session.score().total_score();
            while let Some(t) = session.apply_tally_tick() {
                total = t;
            }
            if remaining > 0 {
                println!("{} moves left over: score {}", remaining, total);
            }
            if session.apply_perfect_bonus() {
                println!("perfect finish: score {}", session.score().total_score());
            }
            let stars = session.stars().unwrap_or(0);
            println!(
                "solved in {} moves (solver: {}) {}",
                session.moves_made(),
                session.optimal_moves(),
                "*".repeat(stars as usize)
            );
        }
        GameStatus::Lost => println!("out of moves"),
        GameStatus::Playing => println!("game abandoned"),
    }
}

fn record_progress(dir: &Path, mode: &Mode, session: &GameSession) -> Result<()> {
    if !session.status().is_terminal() {
        return Ok(());
    }

    let mut store =
        FileStore::open(dir).with_context(|| format!("opening save dir {}", dir.display()))?;
    let mut progress = load_progress(&store)?;

    match mode {
        Mode::Campaign(index) => {
            let Some(stars) = session.stars() else {
                return Ok(());
            };
            if progress.record_level(*index, stars, session.score().total_score()) {
                println!("new best for level {}", index + 1);
            }
        }
        Mode::Daily(date) => {
            let result = DailyResult {
                date: date.to_string(),
                moves_used: session.moves_made(),
                move_budget: session.total_moves(),
                stars: session.stars().unwrap_or(0),
                colors_used: session.color_history().to_vec(),
            };
            if !progress.record_daily(result)? {
                println!("{} was already played; keeping the first result", date);
            }
            println!(
                "daily streak {} (best {})",
                progress.streak.current, progress.streak.best
            );
        }
        Mode::Free => return Ok(()),
    }

    save_progress(&mut store, &progress)?;
    Ok(())
}

fn today() -> Result<CalendarDate> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?
        .as_secs();
    Ok(CalendarDate::from_unix_days((secs / 86_400) as i64)?)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
