//! Board rendering for a line-oriented terminal.
//!
//! Rendering builds a byte buffer of crossterm commands without touching
//! stdout, so output can be inspected in tests and flushed in one write.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    QueueableCommand,
};

use crate::core::{Board, GameSession, MoveOutcome};
use crate::types::{CellTag, Color, GameStatus, Position};

/// Terminal color for a tile color
pub fn tile_rgb(color: Color) -> TermColor {
    let (r, g, b) = match color {
        Color::Coral => (240, 110, 90),
        Color::Amber => (240, 190, 60),
        Color::Emerald => (80, 200, 120),
        Color::Sapphire => (70, 120, 230),
        Color::Violet => (160, 100, 220),
        Color::Rose => (230, 110, 170),
        Color::Teal => (60, 190, 190),
        Color::Slate => (120, 130, 150),
    };
    TermColor::Rgb { r, g, b }
}

/// Two-column glyph drawn on top of a cell
pub fn tag_glyph(tag: CellTag) -> String {
    match tag {
        CellTag::Normal => "  ".to_string(),
        CellTag::Stone => "##".to_string(),
        CellTag::Void => "  ".to_string(),
        CellTag::Ice { layers } => format!("*{}", layers.min(9)),
        CellTag::Countdown { moves_left } => format!("{:>2}", moves_left.min(99)),
        CellTag::Portal { pair_id } => format!("@{}", pair_id % 10),
        CellTag::Bonus { multiplier } => format!("x{}", multiplier.min(9)),
    }
}

/// Encode the board, one terminal row per grid row.
///
/// Cells in the flood region are drawn bold; void cells are left blank.
pub fn render_board_into(board: &Board, out: &mut Vec<u8>) -> Result<()> {
    let region = board.flood_region();
    let stone_bg = TermColor::Rgb {
        r: 50,
        g: 50,
        b: 60,
    };

    for row in 0..board.size() {
        for col in 0..board.size() {
            let pos = Position::new(row, col);
            let tag = board.tag_at(pos);
            match tag {
                CellTag::Void => {
                    out.queue(ResetColor)?;
                }
                CellTag::Stone => {
                    out.queue(SetBackgroundColor(stone_bg))?;
                    out.queue(SetForegroundColor(TermColor::Grey))?;
                }
                _ => {
                    out.queue(SetBackgroundColor(tile_rgb(board.color_at(pos))))?;
                    out.queue(SetForegroundColor(TermColor::Black))?;
                }
            }
            if region.contains(&pos) {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            out.queue(Print(tag_glyph(tag)))?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        out.queue(ResetColor)?;
        out.queue(Print("\n"))?;
    }
    Ok(())
}

/// Encode the palette as numbered swatches, e.g. `1 coral  2 amber`
pub fn render_palette_into(palette: &[Color], out: &mut Vec<u8>) -> Result<()> {
    for (i, &color) in palette.iter().enumerate() {
        out.queue(SetBackgroundColor(tile_rgb(color)))?;
        out.queue(Print("  "))?;
        out.queue(ResetColor)?;
        out.queue(Print(format!(" {} {}  ", i + 1, color.as_str())))?;
    }
    out.queue(Print("\n"))?;
    Ok(())
}

/// One-line summary of a session
pub fn status_line(session: &GameSession) -> String {
    let state = match session.status() {
        GameStatus::Playing => "PLAY",
        GameStatus::Won => "WON",
        GameStatus::Lost => "LOST",
    };
    format!(
        "{} | moves {}/{} | score {} | combo {} (best {})",
        state,
        session.moves_made(),
        session.total_moves(),
        session.score().total_score(),
        session.combo_count(),
        session.max_combo()
    )
}

/// One-line summary of a committed move
pub fn outcome_line(outcome: &MoveOutcome) -> String {
    let mut line = format!(
        "{}: +{} cells in {} waves, +{} points",
        outcome.color.as_str(),
        outcome.cells_absorbed,
        outcome.waves.len(),
        outcome.move_score
    );
    if outcome.combo_count >= 2 {
        line.push_str(&format!(", combo x{}", outcome.combo_count));
    }
    if !outcome.cracked_ice.is_empty() {
        line.push_str(&format!(", cracked {} ice", outcome.cracked_ice.len()));
    }
    line
}

/// Render board, palette and status to stdout
pub fn draw_session(session: &GameSession) -> Result<()> {
    let mut buf = Vec::with_capacity(4 * 1024);
    render_board_into(session.board(), &mut buf)?;
    render_palette_into(session.palette(), &mut buf)?;
    buf.queue(Print(status_line(session)))?;
    buf.queue(Print("\n"))?;

    let mut stdout = io::stdout();
    stdout.write_all(&buf)?;
    stdout.flush()?;
    Ok(())
}
