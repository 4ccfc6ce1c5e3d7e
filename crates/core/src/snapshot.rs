use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::hash::fnv1a64_bytes;
use crate::types::{CellTag, Color, GameStatus};

/// Serializable view of a session, handed to presentation and persistence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub colors: Vec<Vec<Color>>,
    pub tags: Vec<Vec<CellTag>>,
    /// FNV-1a of colors and tags; changes whenever the board does
    pub board_hash: u64,
    pub moves_remaining: u32,
    pub moves_made: u32,
    pub total_moves: u32,
    pub optimal_moves: u32,
    pub status: GameStatus,
    pub score: u32,
    pub combo_count: u32,
    pub max_combo: u32,
    pub color_history: Vec<Color>,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_terminal()
    }
}

fn tag_bytes(tag: CellTag) -> [u8; 2] {
    match tag {
        CellTag::Normal => [0, 0],
        CellTag::Stone => [1, 0],
        CellTag::Void => [2, 0],
        CellTag::Ice { layers } => [3, layers],
        CellTag::Countdown { moves_left } => [4, moves_left],
        CellTag::Portal { pair_id } => [5, pair_id],
        CellTag::Bonus { multiplier } => [6, multiplier],
    }
}

/// Hash of the board's colors and tags
pub fn board_hash(board: &Board) -> u64 {
    let colors = board.colors().iter().map(|c| c.index() as u8);
    let tags = board
        .positions()
        .flat_map(|pos| tag_bytes(board.tag_at(pos)));
    fnv1a64_bytes(colors.chain(tags))
}
