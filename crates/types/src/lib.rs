//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are plain data with no game logic attached beyond small helpers,
//! making them usable in any context (rules engine, generators, presentation,
//! persisted records).
//!
//! # Board Geometry
//!
//! - Boards are square, `grid_size x grid_size`, indexed by `(row, col)`
//! - The flood origin is always `(0, 0)`
//! - Adjacency is 4-directional (north, south, east, west)
//!
//! # Tunable Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 9 | Board size used by levels and daily challenges |
//! | `MAX_GRID_SIZE` | 20 | Largest board accepted by constructors |
//! | `DEFAULT_COLOR_COUNT` | 5 | Palette size used when none is given |
//! | `POINTS_PER_CELL` | 20 | Base points for each absorbed cell |
//! | `COMBO_CELL_THRESHOLD` | 4 | Cells a move must absorb to extend a combo |
//! | `CASCADE_BASE` | 1.5 | Multiplier applied per wave beyond the first |
//! | `BONUS_PER_REMAINING_MOVE` | 50 | End bonus for every unused move |
//! | `PERFECT_BONUS` | 500 | Flat bonus for finishing within optimal + 1 |
//! | `OBSTACLE_RETRY_LIMIT` | 10 | Placement attempts before falling back |
//! | `LEVEL_COUNT` | 100 | Entries in the fixed level table |
//!
//! # Examples
//!
//! ```
//! use chroma_flood_types::{Color, Direction, Position};
//!
//! let palette = Color::palette(5);
//! assert_eq!(palette.len(), 5);
//! assert_eq!(palette[0], Color::Coral);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Color::from_str("Amber"), Some(Color::Amber));
//!
//! // Step across the grid
//! let origin = Position::ORIGIN;
//! assert_eq!(origin.step(Direction::South, 9), Some(Position::new(1, 0)));
//! assert_eq!(origin.step(Direction::North, 9), None);
//! ```

use serde::{Deserialize, Serialize};

/// Board size used by levels and daily challenges
pub const DEFAULT_GRID_SIZE: usize = 9;

/// Largest board accepted by constructors
pub const MAX_GRID_SIZE: usize = 20;

/// Palette size used when none is given
pub const DEFAULT_COLOR_COUNT: usize = 5;

/// Number of distinct colors in the fixed palette
pub const MAX_COLOR_COUNT: usize = 8;

/// Base points per absorbed cell
pub const POINTS_PER_CELL: u32 = 20;

/// A move must absorb at least this many cells to extend the combo chain
pub const COMBO_CELL_THRESHOLD: usize = 4;

/// The combo multiplier kicks in once the chain reaches this length
pub const COMBO_MIN_MULTIPLIER: u32 = 2;

/// Score multiplier applied once per wave beyond the first
pub const CASCADE_BASE: f64 = 1.5;

/// End-of-game bonus per unused move
pub const BONUS_PER_REMAINING_MOVE: u32 = 50;

/// Flat bonus for finishing within `optimal + 1` moves
pub const PERFECT_BONUS: u32 = 500;

/// Obstacle placement attempts before falling back to a void-only layout
pub const OBSTACLE_RETRY_LIMIT: u32 = 10;

/// Mixed into the board seed so obstacle randomness is an independent stream
pub const OBSTACLE_SEED_SALT: u64 = 0x5DEE_CE66_D1CE_B00C;

/// Entries in the fixed level table
pub const LEVEL_COUNT: usize = 100;

/// Per-index level seed is `index * LEVEL_SEED_MULTIPLIER + LEVEL_SEED_OFFSET`
pub const LEVEL_SEED_MULTIPLIER: u64 = 31;

/// See [`LEVEL_SEED_MULTIPLIER`]
pub const LEVEL_SEED_OFFSET: u64 = 7;

/// First daily challenge date (challenge number 1), as `(year, month, day)`
pub const DAILY_EPOCH: (i32, u8, u8) = (2025, 1, 1);

/// Tile colors
///
/// The palette is a small closed set; equality is identity of the variant.
/// Declaration order is the palette order, which the greedy solver uses to
/// break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Coral,
    Amber,
    Emerald,
    Sapphire,
    Violet,
    Rose,
    Teal,
    Slate,
}

impl Color {
    /// Every color, in palette order
    pub const ALL: [Color; MAX_COLOR_COUNT] = [
        Color::Coral,
        Color::Amber,
        Color::Emerald,
        Color::Sapphire,
        Color::Violet,
        Color::Rose,
        Color::Teal,
        Color::Slate,
    ];

    /// The first `count` colors of the palette.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0 or larger than [`MAX_COLOR_COUNT`].
    pub fn palette(count: usize) -> &'static [Color] {
        assert!(
            (1..=MAX_COLOR_COUNT).contains(&count),
            "palette size must be in 1..={}, got {}",
            MAX_COLOR_COUNT,
            count
        );
        &Self::ALL[..count]
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use chroma_flood_types::Color;
    ///
    /// assert_eq!(Color::from_str("coral"), Some(Color::Coral));
    /// assert_eq!(Color::from_str("VIOLET"), Some(Color::Violet));
    /// assert_eq!(Color::from_str("mauve"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Coral => "coral",
            Color::Amber => "amber",
            Color::Emerald => "emerald",
            Color::Sapphire => "sapphire",
            Color::Violet => "violet",
            Color::Rose => "rose",
            Color::Teal => "teal",
            Color::Slate => "slate",
        }
    }

    /// Position of this color in the palette
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A cell coordinate, 0-indexed `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The flood origin
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor in `dir`, or `None` if it falls outside a `size x size` grid
    pub fn step(self, dir: Direction, size: usize) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

/// Grid directions
///
/// [`Direction::ALL`] is the canonical neighbor visiting order; all BFS
/// routines iterate neighbors in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// # Examples
    ///
    /// ```
    /// use chroma_flood_types::Direction;
    ///
    /// assert_eq!(Direction::North.opposite(), Direction::South);
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit `(d_row, d_col)` step
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }
}

/// Per-cell obstacle tag
///
/// - **Normal**: ordinary cell
/// - **Stone**: impassable, never absorbed, ignored by the completion check
/// - **Void**: not part of the board shape at all
/// - **Ice**: blocks the flood while `layers > 0`; loses a layer whenever a move
///   absorbs a neighboring cell
/// - **Countdown**: timer ticked down once per move
/// - **Portal**: links two cells sharing `pair_id`
/// - **Bonus**: scoring multiplier marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellTag {
    #[default]
    Normal,
    Stone,
    Void,
    Ice { layers: u8 },
    Countdown { moves_left: u8 },
    Portal { pair_id: u8 },
    Bonus { multiplier: u8 },
}

impl CellTag {
    /// False only for Stone and Void
    pub fn is_playable(&self) -> bool {
        !matches!(self, CellTag::Stone | CellTag::Void)
    }

    /// Whether the flood may enter this cell
    pub fn can_flood_traverse(&self) -> bool {
        match self {
            CellTag::Stone | CellTag::Void => false,
            CellTag::Ice { layers } => *layers == 0,
            CellTag::Normal
            | CellTag::Countdown { .. }
            | CellTag::Portal { .. }
            | CellTag::Bonus { .. } => true,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        !matches!(self, CellTag::Normal)
    }
}

/// A blocked edge between `pos` and its neighbor in `dir`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallEdge {
    pub pos: Position,
    pub dir: Direction,
}

impl WallEdge {
    pub const fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Level difficulty, expressed as extra moves granted over the solver estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn extra_moves(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 4,
            Difficulty::Hard => 2,
            Difficulty::Expert => 0,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_constants() {
        assert_eq!(POINTS_PER_CELL, 20);
        assert_eq!(COMBO_CELL_THRESHOLD, 4);
        assert_eq!(BONUS_PER_REMAINING_MOVE, 50);
        assert_eq!(PERFECT_BONUS, 500);
        assert_eq!(OBSTACLE_RETRY_LIMIT, 10);
    }

    #[test]
    fn palette_prefix_in_declaration_order() {
        assert_eq!(
            Color::palette(5),
            &[
                Color::Coral,
                Color::Amber,
                Color::Emerald,
                Color::Sapphire,
                Color::Violet
            ]
        );
        for (i, c) in Color::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Color::from_str(c.as_str()), Some(*c));
        }
    }

    #[test]
    #[should_panic]
    fn empty_palette_panics() {
        Color::palette(0);
    }

    #[test]
    fn step_stays_in_bounds() {
        let corner = Position::new(2, 2);
        assert_eq!(corner.step(Direction::East, 3), None);
        assert_eq!(corner.step(Direction::South, 3), None);
        assert_eq!(corner.step(Direction::West, 3), Some(Position::new(2, 1)));
        assert_eq!(corner.step(Direction::North, 3), Some(Position::new(1, 2)));
    }

    #[test]
    fn opposite_cancels_delta() {
        for dir in Direction::ALL {
            let (a, b) = dir.delta();
            let (c, d) = dir.opposite().delta();
            assert_eq!((a + c, b + d), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn tag_traversal_rules() {
        assert!(CellTag::Normal.can_flood_traverse());
        assert!(!CellTag::Stone.can_flood_traverse());
        assert!(!CellTag::Void.can_flood_traverse());
        assert!(!CellTag::Ice { layers: 2 }.can_flood_traverse());
        assert!(CellTag::Ice { layers: 0 }.can_flood_traverse());
        assert!(CellTag::Countdown { moves_left: 3 }.can_flood_traverse());
        assert!(CellTag::Portal { pair_id: 1 }.can_flood_traverse());
        assert!(CellTag::Bonus { multiplier: 2 }.can_flood_traverse());

        assert!(CellTag::Ice { layers: 2 }.is_playable());
        assert!(!CellTag::Stone.is_playable());
        assert!(!CellTag::Void.is_playable());
    }

    #[test]
    fn difficulty_extra_moves() {
        assert_eq!(Difficulty::Easy.extra_moves(), 8);
        assert_eq!(Difficulty::Medium.extra_moves(), 4);
        assert_eq!(Difficulty::Hard.extra_moves(), 2);
        assert_eq!(Difficulty::Expert.extra_moves(), 0);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    }
}
