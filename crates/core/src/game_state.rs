//! Game state module - one play session on one board
//!
//! Ties together the board, the solver estimate and scoring. The only input is
//! "the player selected color C"; everything else (move budget, combo chain,
//! win/loss, end bonus) follows from it.
//!
//! A move reads the absorption waves and the pre-move colors before the board
//! is flooded, since the flood is destructive and cannot be undone.

use crate::board::{Board, Wave};
use crate::scoring::{cascade_multiplier, combo_multiplier, star_rating, ScoreState};
use crate::snapshot::{board_hash, SessionSnapshot};
use crate::solver;
use crate::types::{Color, GameStatus, Position, COMBO_CELL_THRESHOLD};

/// Everything a presentation layer needs about one committed move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub color: Color,
    /// Absorbed cells grouped by BFS distance from the pre-move region
    pub waves: Vec<Wave>,
    /// Pre-move color of every cell the move recolored
    pub previous_colors: Vec<(Position, Color)>,
    pub cells_absorbed: usize,
    pub cracked_ice: Vec<Position>,
    pub move_score: u32,
    pub combo_count: u32,
    pub status: GameStatus,
}

/// A play session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    palette: Vec<Color>,
    moves_remaining: u32,
    moves_made: u32,
    /// Move budget, including any granted extra moves
    total_moves: u32,
    /// Greedy solver estimate for the starting board
    optimal_moves: u32,
    status: GameStatus,
    combo_count: u32,
    max_combo: u32,
    color_history: Vec<Color>,
    score: ScoreState,
}

impl GameSession {
    /// Start a session; the optimal move count is estimated with the greedy solver.
    ///
    /// # Panics
    ///
    /// Panics if `palette` is empty.
    pub fn new(board: Board, palette: &[Color], total_moves: u32) -> Self {
        let optimal_moves = solver::solve(&board, palette).move_count() as u32;
        Self::with_optimal(board, palette, total_moves, optimal_moves)
    }

    /// Start a session with a precomputed optimal move count
    ///
    /// # Panics
    ///
    /// Panics if `palette` is empty.
    pub fn with_optimal(
        board: Board,
        palette: &[Color],
        total_moves: u32,
        optimal_moves: u32,
    ) -> Self {
        assert!(!palette.is_empty(), "a session needs at least one color");
        Self {
            board,
            palette: palette.to_vec(),
            moves_remaining: total_moves,
            moves_made: 0,
            total_moves,
            optimal_moves,
            status: GameStatus::Playing,
            combo_count: 0,
            max_combo: 0,
            color_history: Vec::new(),
            score: ScoreState::new(),
        }
    }

    /// Replace the board and budget, discarding all progress
    pub fn reset(&mut self, board: Board, total_moves: u32) {
        let palette = std::mem::take(&mut self.palette);
        *self = Self::new(board, &palette, total_moves);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn optimal_moves(&self) -> u32 {
        self.optimal_moves
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn color_history(&self) -> &[Color] {
        &self.color_history
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Stars earned, available once the session is won
    pub fn stars(&self) -> Option<u8> {
        (self.status == GameStatus::Won).then(|| star_rating(self.moves_made, self.optimal_moves))
    }

    /// The greedy solver's pick for the current board
    pub fn hint(&self) -> Option<Color> {
        if self.status != GameStatus::Playing {
            return None;
        }
        solver::best_move(&self.board, &self.palette)
    }

    /// Play `color`.
    ///
    /// Returns `None` without consuming a move when the session is over, when
    /// `color` is already the region color, or when it is not in the palette.
    pub fn perform_move(&mut self, color: Color) -> Option<MoveOutcome> {
        if self.status != GameStatus::Playing
            || color == self.board.region_color()
            || !self.palette.contains(&color)
        {
            return None;
        }

        // Captured before the flood: the renderer diffs against these.
        let waves = self.board.cells_absorbed_by(color);
        let previous_colors: Vec<(Position, Color)> = self
            .board
            .flood_region()
            .into_iter()
            .map(|pos| (pos, self.board.color_at(pos)))
            .collect();

        let report = self.board.flood(color);
        self.board.tick_countdowns();

        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.moves_made += 1;
        self.color_history.push(color);

        let cells_absorbed: usize = waves.iter().map(Vec::len).sum();
        if cells_absorbed >= COMBO_CELL_THRESHOLD {
            self.combo_count += 1;
            self.max_combo = self.max_combo.max(self.combo_count);
        } else {
            self.combo_count = 0;
        }

        let multiplier = combo_multiplier(self.combo_count) * cascade_multiplier(waves.len());
        let move_score = self.score.record_move(cells_absorbed, multiplier);

        if self.board.is_complete() {
            self.status = GameStatus::Won;
            let perfect = self.moves_made <= self.optimal_moves + 1;
            self.score.record_end_bonus(self.moves_remaining, perfect);
        } else if self.moves_remaining == 0 {
            self.status = GameStatus::Lost;
        }

        log::trace!(
            "move {} {}: absorbed {} in {} waves, score {}, status {:?}",
            self.moves_made,
            color.as_str(),
            cells_absorbed,
            waves.len(),
            move_score,
            self.status
        );

        Some(MoveOutcome {
            color,
            waves,
            previous_colors,
            cells_absorbed,
            cracked_ice: report.cracked_ice,
            move_score,
            combo_count: self.combo_count,
            status: self.status,
        })
    }

    /// Add `n` moves to the budget; revives a lost session.
    ///
    /// Returns false (no change) for a won session or `n == 0`.
    pub fn grant_extra_moves(&mut self, n: u32) -> bool {
        if self.status == GameStatus::Won || n == 0 {
            return false;
        }
        self.moves_remaining = self.moves_remaining.saturating_add(n);
        self.total_moves = self.total_moves.saturating_add(n);
        self.status = GameStatus::Playing;
        true
    }

    /// Count one tick of the staged end bonus
    pub fn apply_tally_tick(&mut self) -> Option<u32> {
        self.score.apply_tally_tick()
    }

    pub fn apply_perfect_bonus(&mut self) -> bool {
        self.score.apply_perfect_bonus()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.colors = self.board.rows();
        out.tags = self.board.tag_rows();
        out.board_hash = board_hash(&self.board);
        out.moves_remaining = self.moves_remaining;
        out.moves_made = self.moves_made;
        out.total_moves = self.total_moves;
        out.optimal_moves = self.optimal_moves;
        out.status = self.status;
        out.score = self.score.total_score();
        out.combo_count = self.combo_count;
        out.max_combo = self.max_combo;
        out.color_history.clone_from(&self.color_history);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board;
    use crate::types::CellTag;

    fn session(rows: &[&str], total_moves: u32) -> GameSession {
        GameSession::new(board(rows), Color::palette(5), total_moves)
    }

    #[test]
    fn test_new_session() {
        let s = session(&["cae", "aes", "esv"], 10);
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.moves_remaining(), 10);
        assert_eq!(s.moves_made(), 0);
        assert_eq!(s.total_moves(), 10);
        assert!(s.optimal_moves() > 0);
        assert!(s.color_history().is_empty());
    }

    #[test]
    fn test_extra_moves_saturate() {
        let mut s = session(&["cae", "aes", "esv"], 3);
        assert!(s.grant_extra_moves(u32::MAX));
        assert_eq!(s.moves_remaining(), u32::MAX);
        assert_eq!(s.total_moves(), u32::MAX);
        assert!(s.grant_extra_moves(1));
        assert_eq!(s.moves_remaining(), u32::MAX);
    }

    #[test]
    fn test_thawed_matching_ice_wins_the_move() {
        let mut b = board(&["ca", "aa"]);
        b.set_tag(Position::new(0, 1), CellTag::Ice { layers: 1 });
        let mut s = GameSession::new(b, Color::palette(5), 5);
        let outcome = s.perform_move(Color::Amber).unwrap();
        assert_eq!(outcome.cells_absorbed, 2);
        assert_eq!(outcome.cracked_ice, vec![Position::new(0, 1)]);
        assert_eq!(s.status(), GameStatus::Won);
        assert!(s.board().flood_region().contains(&Position::new(0, 1)));
    }

    #[test]
    fn test_same_color_is_ignored() {
        let mut s = session(&["cae", "aes", "esv"], 10);
        assert!(s.perform_move(Color::Coral).is_none());
        assert_eq!(s.moves_made(), 0);
        assert_eq!(s.moves_remaining(), 10);
    }

    #[test]
    fn test_color_outside_palette_is_ignored() {
        let mut s = session(&["cae", "aes", "esv"], 10);
        assert!(s.perform_move(Color::Slate).is_none());
        assert_eq!(s.moves_made(), 0);
    }

    #[test]
    fn test_previous_colors_cover_region() {
        let mut s = session(&["cca", "aaa", "aaa"], 10);
        let outcome = s.perform_move(Color::Amber).unwrap();
        assert_eq!(
            outcome.previous_colors,
            vec![
                (Position::new(0, 0), Color::Coral),
                (Position::new(0, 1), Color::Coral)
            ]
        );
        assert_eq!(outcome.cells_absorbed, 7);
        assert_eq!(outcome.status, GameStatus::Won);
    }

    #[test]
    fn test_combo_builds_and_resets() {
        // Each step absorbs a full column of four cells, then a single cell.
        let mut s = session(&["caes", "caes", "caes", "caev"], 10);

        s.perform_move(Color::Amber).unwrap();
        assert_eq!(s.combo_count(), 1);
        let second = s.perform_move(Color::Emerald).unwrap();
        assert_eq!(s.combo_count(), 2);
        assert_eq!(second.move_score, 4 * 20 * 2);

        s.perform_move(Color::Violet).unwrap();
        assert_eq!(s.combo_count(), 0);
        assert_eq!(s.max_combo(), 2);
    }

    #[test]
    fn test_cascade_scores_extra_waves() {
        let mut s = session(&["caaa", "ceee", "cccc", "cccc"], 10);
        let outcome = s.perform_move(Color::Amber).unwrap();
        assert_eq!(outcome.waves.len(), 3);
        // 3 cells * 20 * 1.5^2
        assert_eq!(outcome.move_score, 135);
    }

    #[test]
    fn test_win_stages_end_bonus() {
        let mut s = GameSession::with_optimal(board(&["ca", "aa"]), Color::palette(5), 4, 1);
        s.perform_move(Color::Amber).unwrap();

        assert_eq!(s.status(), GameStatus::Won);
        // 3 cells over 2 waves: 3 * 20 * 1.5
        assert_eq!(s.score().total_score(), 90);
        assert_eq!(s.score().pending_bonus(), 3 * 50 + 500);
        assert_eq!(s.stars(), Some(3));

        assert_eq!(s.apply_tally_tick(), Some(140));
        assert!(s.apply_perfect_bonus());
    }

    #[test]
    fn test_no_perfect_bonus_when_over_optimal() {
        let mut s =
            GameSession::with_optimal(board(&["cae", "eee", "eee"]), Color::palette(5), 10, 0);
        s.perform_move(Color::Amber).unwrap();
        s.perform_move(Color::Emerald).unwrap();

        assert_eq!(s.status(), GameStatus::Won);
        assert!(!s.score().has_perfect_bonus());
        assert_eq!(s.score().pending_bonus(), 8 * 50);
        assert_eq!(s.stars(), Some(2));
    }

    #[test]
    fn test_loss_and_grant() {
        let mut s = session(&["ca", "es"], 1);
        s.perform_move(Color::Amber).unwrap();
        assert_eq!(s.status(), GameStatus::Lost);
        assert!(s.perform_move(Color::Emerald).is_none());
        assert!(s.hint().is_none());

        assert!(s.grant_extra_moves(2));
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.moves_remaining(), 2);
        assert_eq!(s.total_moves(), 3);
        assert!(s.perform_move(Color::Emerald).is_some());
    }

    #[test]
    fn test_grant_ignored_after_win() {
        let mut s = session(&["ca", "aa"], 3);
        s.perform_move(Color::Amber).unwrap();
        assert!(!s.grant_extra_moves(5));
        assert_eq!(s.total_moves(), 3);
    }

    #[test]
    fn test_move_ticks_countdowns() {
        let mut s = session(&["cae", "aes", "esv"], 10);
        s.board_mut()
            .set_tag(Position::new(2, 2), CellTag::Countdown { moves_left: 2 });
        s.perform_move(Color::Amber).unwrap();
        assert_eq!(
            s.board().tag_at(Position::new(2, 2)),
            CellTag::Countdown { moves_left: 1 }
        );
    }

    #[test]
    fn test_hint_is_greedy_choice() {
        let s = session(&["cae", "eee", "aee"], 10);
        assert_eq!(s.hint(), Some(Color::Emerald));
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut s = session(&["cae", "aes", "esv"], 10);
        s.perform_move(Color::Amber).unwrap();
        s.reset(board(&["ca", "es"]), 5);
        assert_eq!(s.moves_made(), 0);
        assert_eq!(s.moves_remaining(), 5);
        assert_eq!(s.score().total_score(), 0);
        assert_eq!(s.palette(), Color::palette(5));
        assert_eq!(s.board().size(), 2);
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut s = session(&["cae", "aes", "esv"], 10);
        let before = s.snapshot();
        s.perform_move(Color::Amber).unwrap();
        let after = s.snapshot();

        assert_ne!(before.board_hash, after.board_hash);
        assert_eq!(after.moves_made, 1);
        assert_eq!(after.color_history, vec![Color::Amber]);
        assert_eq!(after.colors[0][0], Color::Amber);
        assert!(after.playable());
    }
}
