//! Command-line parsing for the `chroma-flood` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::engine::CalendarDate;
use crate::types::{Difficulty, LEVEL_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Campaign level, 0-based
    Level { index: usize },
    /// Daily challenge; `None` means today
    Daily { date: Option<CalendarDate> },
    /// Free play; `None` seed means time-derived
    Play {
        seed: Option<u64>,
        difficulty: Difficulty,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub command: Command,
    pub verbose: bool,
    /// Play the solver's hints instead of reading moves from stdin
    pub auto: bool,
    /// Directory holding saved progress; progress is not persisted when unset
    pub save_dir: Option<PathBuf>,
}

pub const USAGE: &str = "\
usage: chroma-flood [--verbose] [--auto] [--save DIR] <command>

commands:
  level <1-100>                       play a campaign level
  daily [YYYY-MM-DD]                  play the daily challenge (default: today)
  play [--seed N] [--difficulty D]    free play (easy, medium, hard, expert)";

/// Parse arguments (program name excluded). No command means `play`.
pub fn parse_args(args: &[String]) -> Result<CliConfig> {
    let mut verbose = false;
    let mut auto = false;
    let mut save_dir = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-v" | "--verbose" => verbose = true,
            "--auto" => auto = true,
            "--save" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --save"))?;
                save_dir = Some(PathBuf::from(v));
            }
            other => rest.push(other),
        }
        i += 1;
    }

    let command = match rest.split_first() {
        None => Command::Play {
            seed: None,
            difficulty: Difficulty::Medium,
        },
        Some((&"level", tail)) => parse_level(tail)?,
        Some((&"daily", tail)) => parse_daily(tail)?,
        Some((&"play", tail)) => parse_play(tail)?,
        Some((other, _)) => return Err(anyhow!("unknown command: {}\n\n{}", other, USAGE)),
    };

    Ok(CliConfig {
        command,
        verbose,
        auto,
        save_dir,
    })
}

fn parse_level(args: &[&str]) -> Result<Command> {
    let [n] = args else {
        return Err(anyhow!("level: expected exactly one level number"));
    };
    let number: usize = n
        .parse()
        .map_err(|_| anyhow!("level: invalid level number: {}", n))?;
    if !(1..=LEVEL_COUNT).contains(&number) {
        return Err(anyhow!("level: number must be in 1..={}", LEVEL_COUNT));
    }
    Ok(Command::Level { index: number - 1 })
}

fn parse_daily(args: &[&str]) -> Result<Command> {
    match args {
        [] => Ok(Command::Daily { date: None }),
        [d] => Ok(Command::Daily {
            date: Some(d.parse()?),
        }),
        _ => Err(anyhow!("daily: unexpected arguments: {}", args.join(" "))),
    }
}

fn parse_play(args: &[&str]) -> Result<Command> {
    let mut seed = None;
    let mut difficulty = Difficulty::Medium;
    let mut i = 0usize;
    while i < args.len() {
        match args[i] {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("play: missing value for --seed"))?;
                seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("play: invalid --seed value: {}", v))?,
                );
            }
            "--difficulty" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("play: missing value for --difficulty"))?;
                difficulty = Difficulty::from_str(v)
                    .ok_or_else(|| anyhow!("play: invalid --difficulty value: {}", v))?;
            }
            other => return Err(anyhow!("play: unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Command::Play { seed, difficulty })
}
