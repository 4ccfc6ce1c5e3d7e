//! Level generation
//!
//! A level is a generated board, an optional obstacle layout, and a move budget
//! of the greedy solver estimate plus a fixed allowance. `generate_level` builds
//! free-play levels from a [`Difficulty`]; [`LevelTable`] holds the fixed
//! campaign, whose seeds and parameters are derived from the level index.

use serde::{Deserialize, Serialize};

use crate::core::{solve, Board, GameSession};
use crate::obstacles::{place_obstacles, ObstacleConfig, ObstacleRequest};
use crate::types::{
    Color, Difficulty, DEFAULT_COLOR_COUNT, DEFAULT_GRID_SIZE, LEVEL_COUNT, LEVEL_SEED_MULTIPLIER,
    LEVEL_SEED_OFFSET,
};

/// Inputs for building one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    pub grid_size: usize,
    pub color_count: usize,
    /// Moves granted on top of the solver estimate
    pub extra_moves: u32,
    pub obstacles: ObstacleRequest,
}

impl LevelParams {
    /// Default-sized, obstacle-free level for a difficulty
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            color_count: DEFAULT_COLOR_COUNT,
            extra_moves: difficulty.extra_moves(),
            obstacles: ObstacleRequest::default(),
        }
    }
}

/// A ready-to-play level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub seed: u64,
    pub board: Board,
    pub palette: &'static [Color],
    /// Greedy solver estimate for `board`
    pub optimal_moves: u32,
    pub move_budget: u32,
    pub obstacles: ObstacleConfig,
}

impl Level {
    /// Start a fresh session on a copy of this level's board
    pub fn session(&self) -> GameSession {
        GameSession::with_optimal(
            self.board.clone(),
            self.palette,
            self.move_budget,
            self.optimal_moves,
        )
    }
}

/// Build a default-sized level for `difficulty`
pub fn generate_level(difficulty: Difficulty, seed: u64) -> Level {
    build_level(seed, &LevelParams::for_difficulty(difficulty))
}

/// Build a level from explicit parameters. Deterministic in `(seed, params)`.
///
/// # Panics
///
/// Panics if the grid size or color count is out of range.
pub fn build_level(seed: u64, params: &LevelParams) -> Level {
    let palette = Color::palette(params.color_count);
    let mut board = Board::generate(params.grid_size, palette, seed);

    let obstacles = if params.obstacles.is_empty() {
        ObstacleConfig::default()
    } else {
        place_obstacles(params.grid_size, params.color_count, seed, &params.obstacles).config
    };
    obstacles.apply_to(&mut board);

    let optimal_moves = solve(&board, palette).move_count() as u32;
    let move_budget = optimal_moves + params.extra_moves;
    log::debug!(
        "level seed {}: {}x{}, {} colors, optimal {}, budget {}",
        seed,
        params.grid_size,
        params.grid_size,
        params.color_count,
        optimal_moves,
        move_budget
    );

    Level {
        seed,
        board,
        palette,
        optimal_moves,
        move_budget,
        obstacles,
    }
}

/// Seed of campaign level `index` (0-based)
pub fn level_seed(index: usize) -> u64 {
    index as u64 * LEVEL_SEED_MULTIPLIER + LEVEL_SEED_OFFSET
}

/// Campaign parameters for level `index`, in tiers of 20 levels.
///
/// Later tiers get bigger boards, more colors, more obstacles and a smaller
/// move allowance.
pub fn tier_params(index: usize) -> LevelParams {
    let tier = index / 20;
    let (grid_size, color_count, extra_moves) = match tier {
        0 => (7, 4, 8),
        1 => (8, 5, 6),
        2 => (9, 5, 4),
        3 => (9, 6, 3),
        _ => (10, 6, 2),
    };

    let obstacles = match tier {
        0 => ObstacleRequest::default(),
        1 => ObstacleRequest {
            stone_count: 2,
            ..ObstacleRequest::default()
        },
        2 => ObstacleRequest {
            stone_count: 3,
            ice_count: 2,
            ..ObstacleRequest::default()
        },
        3 => ObstacleRequest {
            stone_count: 4,
            ice_count: 3,
            ice_layers: 2,
            countdown_count: 1,
            wall_count: 4,
            ..ObstacleRequest::default()
        },
        _ => ObstacleRequest {
            stone_count: 5,
            ice_count: 4,
            ice_layers: 2,
            countdown_count: 2,
            wall_count: 6,
            portal_pair_count: 1,
            bonus_count: 2,
            ..ObstacleRequest::default()
        },
    };

    LevelParams {
        grid_size,
        color_count,
        extra_moves,
        obstacles,
    }
}

/// Build campaign level `index`
pub fn campaign_level(index: usize) -> Level {
    build_level(level_seed(index), &tier_params(index))
}

/// The fixed campaign of [`LEVEL_COUNT`] levels
#[derive(Debug, Clone)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self {
            levels: (0..LEVEL_COUNT).map(campaign_level).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;

    #[test]
    fn test_generate_level_is_deterministic() {
        let a = generate_level(Difficulty::Medium, 42);
        let b = generate_level(Difficulty::Medium, 42);
        assert_eq!(a, b);
        assert_ne!(a.board, generate_level(Difficulty::Medium, 43).board);
    }

    #[test]
    fn test_budget_is_optimal_plus_allowance() {
        for difficulty in [Difficulty::Easy, Difficulty::Hard, Difficulty::Expert] {
            let level = generate_level(difficulty, 5);
            assert_eq!(
                level.move_budget,
                level.optimal_moves + difficulty.extra_moves()
            );
        }
    }

    #[test]
    fn test_level_seeds() {
        assert_eq!(level_seed(0), 7);
        assert_eq!(level_seed(1), 38);
        assert_eq!(level_seed(99), 99 * 31 + 7);
    }

    #[test]
    fn test_extra_moves_never_increase() {
        let mut prev = u32::MAX;
        for index in 0..LEVEL_COUNT {
            let extra = tier_params(index).extra_moves;
            assert!(extra <= prev, "level {} raised the allowance", index);
            prev = extra;
        }
        assert_eq!(tier_params(0).extra_moves, 8);
        assert_eq!(tier_params(LEVEL_COUNT - 1).extra_moves, 2);
    }

    #[test]
    fn test_first_tier_has_no_obstacles() {
        for index in 0..20 {
            assert!(tier_params(index).obstacles.is_empty());
        }
        assert!(!tier_params(20).obstacles.is_empty());
    }

    #[test]
    fn test_level_session_starts_fresh() {
        let level = campaign_level(3);
        let session = level.session();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.moves_remaining(), level.move_budget);
        assert_eq!(session.optimal_moves(), level.optimal_moves);
        assert_eq!(session.board(), &level.board);
    }

    #[test]
    fn test_level_is_winnable_by_following_hints() {
        let level = campaign_level(65);
        let mut session = level.session();
        while let Some(color) = session.hint() {
            if session.perform_move(color).is_none() {
                break;
            }
        }
        assert_eq!(session.status(), GameStatus::Won);
    }
}
