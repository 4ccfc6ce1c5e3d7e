//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the flood-fill puzzle rules: the board model, the
//! flood and wave computations, the greedy solver and session scoring.
//! It performs no I/O and holds no global state, making it:
//!
//! - **Deterministic**: Same seed produces identical boards on every platform
//! - **Testable**: Every rule is a plain function or method on owned data
//! - **Portable**: Can run behind any presentation layer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: grid of colors and obstacle tags, flood region, flood, wave preview
//! - [`game_state`]: one play session: move budget, combos, win/loss
//! - [`hash`]: FNV-1a hashing for seeds and board fingerprints
//! - [`rng`]: SplitMix64 stream used by every generator
//! - [`scoring`]: move score, cascades, end bonus tally, star rating
//! - [`snapshot`]: serializable session view
//! - [`solver`]: greedy move-budget estimator
//!
//! # Game Rules
//!
//! - The player repeatedly recolors the region connected to the origin `(0, 0)`
//! - Traversable neighbors already matching the new color are absorbed
//! - Stone and Void cells never join; Ice joins only after losing all layers
//! - The board is complete when every traversable cell shares one color
//!
//! # Example
//!
//! ```
//! use chroma_flood_core::{solve, Board, GameSession};
//! use chroma_flood_core::types::{Color, GameStatus};
//!
//! let palette = Color::palette(5);
//! let board = Board::generate(9, palette, 42);
//! let budget = solve(&board, palette).move_count() as u32;
//! let mut session = GameSession::new(board, palette, budget);
//!
//! // Follow the solver's hints until the board is done.
//! while let Some(color) = session.hint() {
//!     session.perform_move(color);
//! }
//! assert_eq!(session.status(), GameStatus::Won);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod hash;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod solver;

pub use chroma_flood_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FloodReport, Wave};
pub use error::BoardError;
pub use game_state::{GameSession, MoveOutcome};
pub use rng::SplitMix64;
pub use scoring::{calculate_end_bonus, calculate_move_score, star_rating, ScoreState};
pub use snapshot::{board_hash, SessionSnapshot};
pub use solver::{solve, Solution};
