//! Greedy solver - move budget estimation
//!
//! Repeatedly picks the palette color that absorbs the most cells right now
//! and commits it on a private copy of the board. The result is an upper-bound
//! estimate used for difficulty calibration and star thresholds, not an
//! optimal solution.

use crate::board::Board;
use crate::types::Color;

/// Outcome of a greedy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Chosen colors, in play order
    pub moves: Vec<Color>,
    /// False when the safety cap stopped the run before the board was complete
    pub complete: bool,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Best next color for `board`, or `None` when the palette offers no color
/// other than the region color.
///
/// Ties go to the color listed first in `palette`.
pub fn best_move(board: &Board, palette: &[Color]) -> Option<Color> {
    let current = board.region_color();
    let mut best: Option<(Color, usize)> = None;

    for &color in palette.iter().filter(|&&c| c != current) {
        let gain: usize = board.cells_absorbed_by(color).iter().map(Vec::len).sum();
        match best {
            Some((_, best_gain)) if gain <= best_gain => {}
            _ => best = Some((color, gain)),
        }
    }

    best.map(|(color, _)| color)
}

/// Play `board` to completion with the greedy heuristic.
///
/// Stops after `size * size` moves even if the board is still incomplete, which
/// bounds degenerate inputs such as void-separated islands.
pub fn solve(board: &Board, palette: &[Color]) -> Solution {
    let mut scratch = board.clone();
    let cap = board.size() * board.size();
    let mut moves = Vec::new();

    while !scratch.is_complete() && moves.len() < cap {
        let Some(color) = best_move(&scratch, palette) else {
            break;
        };
        scratch.flood(color);
        moves.push(color);
    }

    let complete = scratch.is_complete();
    if !complete {
        log::warn!(
            "greedy solver stopped after {} moves on an incomplete {}x{} board",
            moves.len(),
            board.size(),
            board.size()
        );
    }

    Solution { moves, complete }
}

/// Replay `moves` on a copy of `board` and report whether it ends complete
pub fn replay_completes(board: &Board, moves: &[Color]) -> bool {
    let mut scratch = board.clone();
    for &color in moves {
        scratch.flood(color);
    }
    scratch.is_complete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board;
    use crate::types::{CellTag, Position};

    #[test]
    fn test_solved_board_needs_no_moves() {
        let b = board(&["cc", "cc"]);
        let solution = solve(&b, Color::palette(5));
        assert!(solution.complete);
        assert_eq!(solution.move_count(), 0);
    }

    #[test]
    fn test_best_move_maximizes_absorption() {
        let b = board(&["cae", "eee", "aee"]);
        assert_eq!(best_move(&b, Color::palette(5)), Some(Color::Emerald));
    }

    #[test]
    fn test_best_move_tie_breaks_on_palette_order() {
        // Amber and Emerald each absorb one cell.
        let b = board(&["ca", "es"]);
        assert_eq!(best_move(&b, Color::palette(5)), Some(Color::Amber));

        let reordered = [Color::Emerald, Color::Amber, Color::Sapphire];
        assert_eq!(best_move(&b, &reordered), Some(Color::Emerald));
    }

    #[test]
    fn test_best_move_none_for_single_color_palette() {
        let b = board(&["ca", "aa"]);
        assert_eq!(best_move(&b, &[Color::Coral]), None);
    }

    #[test]
    fn test_solve_does_not_touch_input() {
        let b = Board::generate(6, Color::palette(4), 11);
        let before = b.clone();
        let solution = solve(&b, Color::palette(4));
        assert_eq!(b, before);
        assert!(solution.complete);
        assert!(replay_completes(&b, &solution.moves));
    }

    #[test]
    fn test_solve_caps_unreachable_board() {
        // Two void-separated islands of different colors can never match the origin.
        let mut b = board(&["csa", "sss", "sse"]);
        for pos in [(0, 1), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)] {
            b.set_tag(Position::new(pos.0, pos.1), CellTag::Void);
        }

        let solution = solve(&b, Color::palette(3));
        assert!(!solution.complete);
        assert_eq!(solution.move_count(), 9);
    }

    #[test]
    fn test_ice_is_cracked_by_zero_gain_moves() {
        // Ice walls the origin in; the first move cracks it even though it absorbs nothing.
        let mut b = board(&["ca", "aa"]);
        b.set_tag(Position::new(0, 1), CellTag::Ice { layers: 2 });
        b.set_tag(Position::new(1, 0), CellTag::Ice { layers: 2 });

        let solution = solve(&b, Color::palette(2));
        assert!(solution.complete);
        assert!(replay_completes(&b, &solution.moves));
    }
}
