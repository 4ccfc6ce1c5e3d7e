//! Content engine: levels, obstacles, daily challenges and player progress
//!
//! Everything here builds on the pure rules in `chroma-flood-core`:
//!
//! - [`obstacles`]: solver-verified obstacle placement with graceful degradation
//! - [`level`]: difficulty-based levels and the fixed campaign table
//! - [`daily`]: calendar dates and the date-seeded daily challenge
//! - [`progress`]: best results, streaks, and JSON persistence
//!
//! # Example
//!
//! ```
//! use chroma_flood_engine::daily::{CalendarDate, DailyChallenge};
//!
//! let date: CalendarDate = "2026-03-15".parse().unwrap();
//! let challenge = DailyChallenge::for_date(date);
//! let session = challenge.level.session();
//! assert_eq!(session.moves_remaining(), challenge.level.move_budget);
//! ```

pub mod daily;
pub mod level;
pub mod obstacles;
pub mod progress;

pub use chroma_flood_core as core;
pub use chroma_flood_types as types;

pub use daily::{challenge_number, daily_seed, CalendarDate, DailyChallenge, DateError};
pub use level::{build_level, campaign_level, generate_level, Level, LevelParams, LevelTable};
pub use obstacles::{place_obstacles, ObstacleConfig, ObstacleRequest, PlacementResult};
pub use progress::{
    load_progress, save_progress, DailyResult, KeyValueStore, LevelRecord, MemoryStore,
    PlayerProgress, ProgressError, StreakCounters,
};
