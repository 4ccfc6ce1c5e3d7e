//! Obstacle placement: sample, verify with the solver, degrade on failure.
//!
//! A layout is sampled from a PRNG stream derived from the board seed, applied
//! to the board that seed generates, and accepted only if the greedy solver
//! finishes it in fewer than `size * size` moves. After half the retry budget
//! is spent, each retry shrinks the stone, ice, countdown and wall counts by
//! one. If every attempt fails the result holds only the requested voids.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{solve, Board, SplitMix64};
use crate::types::{
    CellTag, Color, Direction, Position, WallEdge, OBSTACLE_RETRY_LIMIT, OBSTACLE_SEED_SALT,
};

/// Desired obstacle counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleRequest {
    pub stone_count: usize,
    pub ice_count: usize,
    pub ice_layers: u8,
    pub countdown_count: usize,
    pub countdown_moves: u8,
    pub wall_count: usize,
    pub portal_pair_count: usize,
    pub bonus_count: usize,
    pub bonus_multiplier: u8,
    /// Carved out of the board as-is; never sampled
    pub void_positions: Vec<Position>,
}

impl Default for ObstacleRequest {
    fn default() -> Self {
        Self {
            stone_count: 0,
            ice_count: 0,
            ice_layers: 1,
            countdown_count: 0,
            countdown_moves: 5,
            wall_count: 0,
            portal_pair_count: 0,
            bonus_count: 0,
            bonus_multiplier: 2,
            void_positions: Vec::new(),
        }
    }
}

impl ObstacleRequest {
    /// True when nothing at all is requested
    pub fn is_empty(&self) -> bool {
        self.stone_count == 0
            && self.ice_count == 0
            && self.countdown_count == 0
            && self.wall_count == 0
            && self.portal_pair_count == 0
            && self.bonus_count == 0
            && self.void_positions.is_empty()
    }

    fn shrink(&mut self) {
        self.stone_count = self.stone_count.saturating_sub(1);
        self.ice_count = self.ice_count.saturating_sub(1);
        self.countdown_count = self.countdown_count.saturating_sub(1);
        self.wall_count = self.wall_count.saturating_sub(1);
    }
}

/// A concrete obstacle layout, applied to a freshly generated board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub stones: Vec<Position>,
    pub ice: Vec<(Position, u8)>,
    pub countdowns: Vec<(Position, u8)>,
    pub portals: Vec<(Position, Position)>,
    pub bonuses: Vec<(Position, u8)>,
    pub walls: Vec<WallEdge>,
    pub voids: Vec<Position>,
}

impl ObstacleConfig {
    pub fn voids_only(voids: Vec<Position>) -> Self {
        Self {
            voids,
            ..Self::default()
        }
    }

    /// Tag cells and add walls on `board`
    pub fn apply_to(&self, board: &mut Board) {
        for &pos in &self.voids {
            board.set_tag(pos, CellTag::Void);
        }
        for &pos in &self.stones {
            board.set_tag(pos, CellTag::Stone);
        }
        for &(pos, layers) in &self.ice {
            board.set_tag(pos, CellTag::Ice { layers });
        }
        for &(pos, moves_left) in &self.countdowns {
            board.set_tag(pos, CellTag::Countdown { moves_left });
        }
        for (pair_id, &(a, b)) in self.portals.iter().enumerate() {
            let pair_id = u8::try_from(pair_id).unwrap_or(u8::MAX);
            board.set_tag(a, CellTag::Portal { pair_id });
            board.set_tag(b, CellTag::Portal { pair_id });
        }
        for &(pos, multiplier) in &self.bonuses {
            board.set_tag(pos, CellTag::Bonus { multiplier });
        }
        for wall in &self.walls {
            board.add_wall(wall.pos, wall.dir);
        }
    }

    /// Cells tagged plus walls placed, voids excluded
    pub fn obstacle_count(&self) -> usize {
        self.stones.len()
            + self.ice.len()
            + self.countdowns.len()
            + self.portals.len() * 2
            + self.bonuses.len()
            + self.walls.len()
    }
}

/// Result of an obstacle placement run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementResult {
    pub config: ObstacleConfig,
    /// Layouts sampled, including the accepted one
    pub attempts: u32,
    /// True when no sampled layout passed and the void-only layout was returned
    pub fell_back: bool,
}

/// Find a solvable obstacle layout for the board generated from `seed`.
///
/// Always returns a usable layout; see the module docs for the degrade rules.
pub fn place_obstacles(
    grid_size: usize,
    color_count: usize,
    seed: u64,
    request: &ObstacleRequest,
) -> PlacementResult {
    let palette = Color::palette(color_count);
    let base = Board::generate(grid_size, palette, seed);
    let mut rng = SplitMix64::derive(seed, OBSTACLE_SEED_SALT);

    let voids: BTreeSet<Position> = request
        .void_positions
        .iter()
        .copied()
        .filter(|&p| p.in_bounds(grid_size) && p != Position::ORIGIN)
        .collect();

    let mut counts = request.clone();
    let move_cap = grid_size * grid_size;

    for attempt in 0..OBSTACLE_RETRY_LIMIT {
        if attempt >= OBSTACLE_RETRY_LIMIT / 2 {
            counts.shrink();
        }

        let config = sample_layout(grid_size, &voids, &counts, &mut rng);
        let mut board = base.clone();
        config.apply_to(&mut board);

        let solution = solve(&board, palette);
        if board.is_playable(Position::ORIGIN)
            && solution.complete
            && solution.move_count() < move_cap
        {
            log::debug!(
                "obstacles placed on attempt {} ({} obstacles, solver {} moves)",
                attempt + 1,
                config.obstacle_count(),
                solution.move_count()
            );
            return PlacementResult {
                config,
                attempts: attempt + 1,
                fell_back: false,
            };
        }

        log::debug!(
            "rejected obstacle layout on attempt {} (solver complete: {}, {} moves)",
            attempt + 1,
            solution.complete,
            solution.move_count()
        );
    }

    log::warn!(
        "no solvable obstacle layout for seed {} after {} attempts; using voids only",
        seed,
        OBSTACLE_RETRY_LIMIT
    );
    PlacementResult {
        config: ObstacleConfig::voids_only(voids.into_iter().collect()),
        attempts: OBSTACLE_RETRY_LIMIT,
        fell_back: true,
    }
}

fn sample_layout(
    grid_size: usize,
    voids: &BTreeSet<Position>,
    counts: &ObstacleRequest,
    rng: &mut SplitMix64,
) -> ObstacleConfig {
    let mut pool: Vec<Position> = (0..grid_size)
        .flat_map(|row| (0..grid_size).map(move |col| Position::new(row, col)))
        .filter(|p| *p != Position::ORIGIN && !voids.contains(p))
        .collect();
    rng.shuffle(&mut pool);

    let mut cells = pool.into_iter();
    let stones = cells.by_ref().take(counts.stone_count).collect();
    let ice = cells
        .by_ref()
        .take(counts.ice_count)
        .map(|p| (p, counts.ice_layers.max(1)))
        .collect();
    let countdowns = cells
        .by_ref()
        .take(counts.countdown_count)
        .map(|p| (p, counts.countdown_moves))
        .collect();

    let mut portals = Vec::with_capacity(counts.portal_pair_count);
    for _ in 0..counts.portal_pair_count {
        match (cells.next(), cells.next()) {
            (Some(a), Some(b)) => portals.push((a, b)),
            _ => break,
        }
    }

    let bonuses = cells
        .by_ref()
        .take(counts.bonus_count)
        .map(|p| (p, counts.bonus_multiplier))
        .collect();

    let mut wall_pool = wall_candidates(grid_size, voids);
    rng.shuffle(&mut wall_pool);
    wall_pool.truncate(counts.wall_count);

    ObstacleConfig {
        stones,
        ice,
        countdowns,
        portals,
        bonuses,
        walls: wall_pool,
        voids: voids.iter().copied().collect(),
    }
}

/// Every interior edge between two non-void cells, origin edges excluded.
/// Each edge appears once, from its north or west cell.
fn wall_candidates(grid_size: usize, voids: &BTreeSet<Position>) -> Vec<WallEdge> {
    let mut edges = Vec::new();
    for row in 0..grid_size {
        for col in 0..grid_size {
            let pos = Position::new(row, col);
            if pos == Position::ORIGIN || voids.contains(&pos) {
                continue;
            }
            for dir in [Direction::South, Direction::East] {
                let Some(next) = pos.step(dir, grid_size) else {
                    continue;
                };
                if !voids.contains(&next) {
                    edges.push(WallEdge::new(pos, dir));
                }
            }
        }
    }
    edges
}
