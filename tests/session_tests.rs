use chroma_flood::core::{board_hash, Board, GameSession};
use chroma_flood::types::{CellTag, Color, GameStatus, Position};

use Color::{Amber as A, Coral as C, Emerald as E, Sapphire as S, Violet as V};

fn grid(rows: &[&[Color]]) -> Board {
    Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

#[test]
fn test_move_on_three_by_three() {
    let board = grid(&[&[C, A, E], &[A, E, S], &[E, S, V]]);
    let mut session = GameSession::new(board, Color::palette(5), 20);

    let outcome = session.perform_move(A).unwrap();
    assert_eq!(session.moves_made(), 1);
    assert_eq!(session.moves_remaining(), 19);
    assert_eq!(session.board().color_at(Position::ORIGIN), A);
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(outcome.cells_absorbed, 2);
    assert_eq!(outcome.previous_colors, vec![(Position::ORIGIN, C)]);
}

#[test]
fn test_winning_move() {
    let board = grid(&[&[C, A], &[A, A]]);
    let mut session = GameSession::new(board, Color::palette(5), 5);

    let outcome = session.perform_move(A).unwrap();
    assert_eq!(outcome.status, GameStatus::Won);
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.moves_made(), 1);
    assert_eq!(session.stars(), Some(3));
}

#[test]
fn test_losing_on_last_move() {
    let board = grid(&[&[C, A], &[E, S]]);
    let mut session = GameSession::new(board, Color::palette(5), 1);

    session.perform_move(A).unwrap();
    assert_eq!(session.moves_remaining(), 0);
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.stars(), None);
}

#[test]
fn test_terminal_session_ignores_moves() {
    let board = grid(&[&[C, A], &[E, S]]);
    let mut session = GameSession::new(board, Color::palette(5), 1);
    session.perform_move(A);

    let before = session.snapshot();
    assert!(session.perform_move(E).is_none());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_noop_moves_cost_nothing() {
    let board = grid(&[&[C, A], &[E, S]]);
    let mut session = GameSession::new(board, Color::palette(4), 5);

    // Current region color.
    assert!(session.perform_move(C).is_none());
    // Outside a 4-color palette.
    assert!(session.perform_move(V).is_none());
    assert_eq!(session.moves_made(), 0);
    assert_eq!(session.moves_remaining(), 5);
}

#[test]
fn test_extra_moves_revive_lost_session() {
    let board = grid(&[&[C, A], &[E, S]]);
    let mut session = GameSession::new(board, Color::palette(5), 1);
    session.perform_move(A);
    assert_eq!(session.status(), GameStatus::Lost);

    assert!(session.grant_extra_moves(3));
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.moves_remaining(), 3);
    assert_eq!(session.total_moves(), 4);

    session.perform_move(E).unwrap();
    session.perform_move(S).unwrap();
    assert_eq!(session.status(), GameStatus::Won);
    assert!(!session.grant_extra_moves(3));
}

#[test]
fn test_combo_chain_multiplies_score() {
    // Each move absorbs one full 4-cell row.
    let board = grid(&[&[C, C, C, C], &[A, A, A, A], &[E, E, E, E], &[S, S, S, S]]);
    let mut session = GameSession::with_optimal(board, Color::palette(5), 10, 3);

    let first = session.perform_move(A).unwrap();
    assert_eq!(first.combo_count, 1);
    assert_eq!(first.move_score, 80);

    let second = session.perform_move(E).unwrap();
    assert_eq!(second.combo_count, 2);
    assert_eq!(second.move_score, 160);

    let third = session.perform_move(S).unwrap();
    assert_eq!(third.combo_count, 3);
    assert_eq!(third.move_score, 240);
    assert_eq!(session.max_combo(), 3);
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn test_small_move_breaks_combo() {
    let board = grid(&[&[C, C, C, C], &[A, A, A, A], &[E, S, S, S], &[S, S, S, S]]);
    let mut session = GameSession::with_optimal(board, Color::palette(5), 10, 3);

    session.perform_move(A).unwrap();
    let small = session.perform_move(E).unwrap();
    assert_eq!(small.cells_absorbed, 1);
    assert_eq!(small.combo_count, 0);
    assert_eq!(small.move_score, 20);
    assert_eq!(session.max_combo(), 1);
}

#[test]
fn test_end_bonus_tally() {
    let board = grid(&[&[C, A], &[A, A]]);
    let mut session = GameSession::with_optimal(board, Color::palette(5), 4, 1);
    session.perform_move(A).unwrap();

    // 3 cells over two waves: 60 * 1.5.
    assert_eq!(session.score().total_score(), 90);
    assert_eq!(session.score().pending_bonus(), 3 * 50 + 500);

    let mut ticks = 0;
    while session.apply_tally_tick().is_some() {
        ticks += 1;
    }
    assert_eq!(ticks, 3);
    assert!(session.apply_perfect_bonus());
    assert_eq!(session.score().total_score(), 90 + 650);
}

#[test]
fn test_countdowns_tick_per_move() {
    let mut board = grid(&[&[C, A, E], &[A, E, S], &[E, S, V]]);
    board.set_tag(Position::new(2, 2), CellTag::Countdown { moves_left: 2 });
    let mut session = GameSession::new(board, Color::palette(5), 10);

    session.perform_move(A).unwrap();
    assert_eq!(
        session.board().tag_at(Position::new(2, 2)),
        CellTag::Countdown { moves_left: 1 }
    );
    session.perform_move(E).unwrap();
    session.perform_move(S).unwrap();
    assert_eq!(
        session.board().tag_at(Position::new(2, 2)),
        CellTag::Countdown { moves_left: 0 }
    );
    assert_eq!(session.status(), GameStatus::Playing);
}

#[test]
fn test_snapshot_tracks_board() {
    let board = Board::generate(6, Color::palette(4), 8);
    let mut session = GameSession::new(board, Color::palette(4), 30);

    let start = session.snapshot();
    assert_eq!(start.board_hash, board_hash(session.board()));
    assert!(start.playable());

    let color = session.hint().unwrap();
    session.perform_move(color).unwrap();
    let after = session.snapshot();
    assert_ne!(after.board_hash, start.board_hash);
    assert_eq!(after.color_history, vec![color]);
    assert_eq!(after.moves_made, 1);

    let json = serde_json::to_string(&after).unwrap();
    let back: chroma_flood::core::SessionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, after);
}

#[test]
fn test_hints_win_within_solver_budget() {
    for seed in 0..20 {
        let board = Board::generate(9, Color::palette(5), seed);
        let mut session = GameSession::new(board, Color::palette(5), 81);
        let budget = session.optimal_moves();

        while let Some(color) = session.hint() {
            session.perform_move(color).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Won, "seed {}", seed);
        assert_eq!(session.moves_made(), budget, "seed {}", seed);
        assert_eq!(session.stars(), Some(3));
    }
}
