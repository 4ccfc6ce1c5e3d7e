//! Scoring module - move scores, combos, cascades and the end-of-game tally
//!
//! Scoring rules:
//! - Each absorbed cell is worth `POINTS_PER_CELL`.
//! - A move that absorbs `COMBO_CELL_THRESHOLD` or more cells extends the combo
//!   chain; once the chain reaches 2 the move score is multiplied by its length.
//! - Every wave beyond the first multiplies the move score by `CASCADE_BASE`.
//! - Multipliers are applied in floating point and truncated once at the end.
//! - Winning stages a bonus of `BONUS_PER_REMAINING_MOVE` per unused move, plus
//!   `PERFECT_BONUS` when finishing within `optimal + 1` moves. The bonus is
//!   counted up one tick at a time so a presentation layer can animate it.

use crate::types::{
    BONUS_PER_REMAINING_MOVE, CASCADE_BASE, COMBO_MIN_MULTIPLIER, PERFECT_BONUS, POINTS_PER_CELL,
};

/// Score for one move, truncated to whole points
pub fn calculate_move_score(cells_absorbed: usize, multiplier: f64) -> u32 {
    let base = cells_absorbed as f64 * POINTS_PER_CELL as f64;
    (base * multiplier) as u32
}

/// Combo multiplier for a chain of `combo_count` qualifying moves
pub fn combo_multiplier(combo_count: u32) -> f64 {
    if combo_count >= COMBO_MIN_MULTIPLIER {
        combo_count as f64
    } else {
        1.0
    }
}

/// `CASCADE_BASE` raised to the number of waves beyond the first
pub fn cascade_multiplier(wave_count: usize) -> f64 {
    if wave_count > 1 {
        CASCADE_BASE.powi((wave_count - 1) as i32)
    } else {
        1.0
    }
}

/// End-of-game bonus for a win
pub fn calculate_end_bonus(moves_remaining: u32, is_optimal_plus_one: bool) -> u32 {
    let perfect = if is_optimal_plus_one { PERFECT_BONUS } else { 0 };
    moves_remaining
        .saturating_mul(BONUS_PER_REMAINING_MOVE)
        .saturating_add(perfect)
}

/// Stars for a win in `moves_used` moves against the solver estimate
///
/// - within `optimal + 1`: 3 stars
/// - within `optimal + 3`: 2 stars
/// - otherwise: 1 star
pub fn star_rating(moves_used: u32, optimal: u32) -> u8 {
    if moves_used <= optimal + 1 {
        3
    } else if moves_used <= optimal + 3 {
        2
    } else {
        1
    }
}

/// Running score for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    total_score: u32,
    last_move_score: u32,
    last_cells_absorbed: usize,
    /// Remaining-move ticks of the end bonus not yet counted
    pending_tally_ticks: u32,
    /// Whether the win earned the perfect bonus
    has_perfect_bonus: bool,
    perfect_bonus_applied: bool,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn last_move_score(&self) -> u32 {
        self.last_move_score
    }

    pub fn last_cells_absorbed(&self) -> usize {
        self.last_cells_absorbed
    }

    pub fn pending_tally_ticks(&self) -> u32 {
        self.pending_tally_ticks
    }

    pub fn has_perfect_bonus(&self) -> bool {
        self.has_perfect_bonus
    }

    /// Points staged by [`ScoreState::record_end_bonus`] but not yet applied
    pub fn pending_bonus(&self) -> u32 {
        let perfect = if self.has_perfect_bonus && !self.perfect_bonus_applied {
            PERFECT_BONUS
        } else {
            0
        };
        self.pending_tally_ticks * BONUS_PER_REMAINING_MOVE + perfect
    }

    /// Add a move's score and return it
    pub fn record_move(&mut self, cells_absorbed: usize, multiplier: f64) -> u32 {
        let score = calculate_move_score(cells_absorbed, multiplier);
        self.total_score = self.total_score.saturating_add(score);
        self.last_move_score = score;
        self.last_cells_absorbed = cells_absorbed;
        score
    }

    /// Stage the end bonus; nothing is added until ticks are consumed
    pub fn record_end_bonus(&mut self, moves_remaining: u32, is_optimal_plus_one: bool) {
        self.pending_tally_ticks = moves_remaining;
        self.has_perfect_bonus = is_optimal_plus_one;
        self.perfect_bonus_applied = false;
    }

    /// Count one remaining move into the total.
    ///
    /// Returns the new total, or `None` when no ticks are pending.
    pub fn apply_tally_tick(&mut self) -> Option<u32> {
        if self.pending_tally_ticks == 0 {
            return None;
        }
        self.pending_tally_ticks -= 1;
        self.total_score = self.total_score.saturating_add(BONUS_PER_REMAINING_MOVE);
        Some(self.total_score)
    }

    /// Add the perfect bonus once. Returns false if it was not earned or already added.
    pub fn apply_perfect_bonus(&mut self) -> bool {
        if !self.has_perfect_bonus || self.perfect_bonus_applied {
            return false;
        }
        self.perfect_bonus_applied = true;
        self.total_score = self.total_score.saturating_add(PERFECT_BONUS);
        true
    }

    /// Apply every pending tick and the perfect bonus at once
    pub fn settle(&mut self) -> u32 {
        while self.apply_tally_tick().is_some() {}
        self.apply_perfect_bonus();
        self.total_score
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
