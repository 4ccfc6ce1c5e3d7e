//! Player progress: best results per level, the daily streak, and daily results
//!
//! Progress is a plain serde value. Persistence goes through [`KeyValueStore`]
//! as a single JSON document, so any string key-value backend will do.

use std::collections::{BTreeMap, HashMap};
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::daily::{CalendarDate, DateError};
use crate::types::Color;

/// Store key holding the serialized [`PlayerProgress`]
pub const PROGRESS_KEY: &str = "chroma_flood.progress";

/// Best result for one campaign level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelRecord {
    pub best_stars: u8,
    pub best_score: u32,
}

/// Consecutive-day daily challenge wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakCounters {
    pub current: u32,
    pub best: u32,
    /// Date of the most recent win counted in `current`
    pub last_date: Option<CalendarDate>,
}

impl StreakCounters {
    /// Count a win on `date`. Returns false if that day was already counted
    /// or lies before the last counted day.
    pub fn record_win(&mut self, date: CalendarDate) -> bool {
        match self.last_date {
            Some(last) if date <= last => return false,
            Some(last) if last.days_until(&date) == 1 => self.current += 1,
            _ => self.current = 1,
        }
        self.last_date = Some(date);
        self.best = self.best.max(self.current);
        true
    }
}

/// Result of one daily challenge attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    /// `YYYY-MM-DD`
    pub date: String,
    pub moves_used: u32,
    pub move_budget: u32,
    /// 0 for a loss
    pub stars: u8,
    pub colors_used: Vec<Color>,
}

/// Everything remembered about a player
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    pub levels: BTreeMap<usize, LevelRecord>,
    pub streak: StreakCounters,
    /// Keyed by date string
    pub daily: BTreeMap<String, DailyResult>,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a level result into the best record.
    ///
    /// Stars and score are kept independently. Returns true if either improved.
    pub fn record_level(&mut self, index: usize, stars: u8, score: u32) -> bool {
        let record = self.levels.entry(index).or_default();
        let improved = stars > record.best_stars || score > record.best_score;
        record.best_stars = record.best_stars.max(stars);
        record.best_score = record.best_score.max(score);
        improved
    }

    pub fn level(&self, index: usize) -> Option<&LevelRecord> {
        self.levels.get(&index)
    }

    /// Levels with at least one star
    pub fn levels_cleared(&self) -> usize {
        self.levels.values().filter(|r| r.best_stars > 0).count()
    }

    pub fn total_stars(&self) -> u32 {
        self.levels.values().map(|r| u32::from(r.best_stars)).sum()
    }

    /// Store the first result for a day; a win also extends the streak.
    ///
    /// Returns `Ok(false)` when the day already has a result.
    pub fn record_daily(&mut self, result: DailyResult) -> Result<bool, DateError> {
        let date: CalendarDate = result.date.parse()?;
        let key = date.to_string();
        if self.daily.contains_key(&key) {
            return Ok(false);
        }
        if result.stars > 0 {
            self.streak.record_win(date);
        }
        self.daily.insert(key, result);
        Ok(true)
    }

    pub fn daily_result(&self, date: &CalendarDate) -> Option<&DailyResult> {
        self.daily.get(&date.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("stored progress is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("progress store failed: {0}")]
    Io(#[from] io::Error),
}

/// String key-value persistence backend.
///
/// `get` returns `Ok(None)` only for a missing key; a value that exists but
/// cannot be read is an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn put(&mut self, key: &str, value: String) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-process store, used by tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    progress: &PlayerProgress,
) -> Result<(), ProgressError> {
    let json = serde_json::to_string(progress)?;
    store.put(PROGRESS_KEY, json)?;
    Ok(())
}

/// Load progress, or a fresh record when nothing is stored yet.
///
/// Store failures are returned, never read as an empty record.
pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S) -> Result<PlayerProgress, ProgressError> {
    match store.get(PROGRESS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => {
            log::debug!("no stored progress; starting fresh");
            Ok(PlayerProgress::default())
        }
    }
}
