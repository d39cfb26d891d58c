use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_axis() {
    assert_eq!(Stone::Black.axis(), Some(Axis::Vertical));
    assert_eq!(Stone::White.axis(), Some(Axis::Horizontal));
    assert_eq!(Stone::Empty.axis(), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.to_index(), 7 * 19 + 7);
    assert_eq!(Pos::from_index(pos.to_index()), pos);
}

#[test]
fn test_pos_try_new() {
    assert_eq!(Pos::try_new(3, 4), Some(Pos::new(3, 4)));
    assert_eq!(Pos::try_new(-1, 0), None);
    assert_eq!(Pos::try_new(0, 19), None);
}

#[test]
fn test_pos_offset_and_delta() {
    let a = Pos::new(5, 5);
    let b = a.offset(2, 1).unwrap();
    assert_eq!(b, Pos::new(7, 6));
    assert_eq!(a.delta(b), (2, 1));
    assert_eq!(a.chebyshev(b), 2);
    assert!(Pos::new(0, 0).offset(-1, 0).is_none());
}

#[test]
fn test_board_defaults() {
    let board = Board::new();
    assert_eq!(board.size(), BOARD_SIZE);
    assert_eq!(board.move_count(), 0);
    assert!(board.is_board_empty());
}

#[test]
fn test_board_size_clamped() {
    assert_eq!(Board::with_size(3).size(), 5);
    assert_eq!(Board::with_size(40).size(), MAX_BOARD_SIZE);
}

#[test]
fn test_valid_position_respects_size() {
    let board = Board::with_size(9);
    assert!(board.is_valid_position(8, 8));
    assert!(!board.is_valid_position(9, 0));
    assert!(!board.is_valid_position(0, -1));
}

#[test]
fn test_make_move_rejects_occupied() {
    let mut board = Board::new();
    let pos = Pos::new(7, 7);
    assert!(board.make_move(pos, Stone::Black).success);
    let second = board.make_move(pos, Stone::White);
    assert!(!second.success);
    assert_eq!(board.move_count(), 1);
    assert_eq!(board.get(pos), Stone::Black);
}

#[test]
fn test_make_move_rejects_out_of_board() {
    let mut board = Board::with_size(9);
    assert!(!board.make_move(Pos::new(10, 2), Stone::Black).success);
    assert_eq!(board.move_count(), 0);
}

#[test]
fn test_player_positions_row_major() {
    let mut board = Board::new();
    board.place_stone(Pos::new(9, 1), Stone::White);
    board.place_stone(Pos::new(2, 3), Stone::White);
    board.place_stone(Pos::new(4, 4), Stone::Black);
    assert_eq!(
        board.player_positions(Stone::White),
        vec![Pos::new(2, 3), Pos::new(9, 1)]
    );
    assert_eq!(board.stone_count(Stone::Black), 1);
    assert_eq!(board.history().len(), 3);
}

#[test]
fn test_vertical_line_wins_for_black() {
    let mut board = Board::with_size(7);
    let mut last = None;
    for r in 0..7u8 {
        last = Some(board.make_move(Pos::new(r, 3), Stone::Black));
    }
    let outcome = last.unwrap();
    assert!(outcome.game_over);
    assert_eq!(outcome.winner, Some(Stone::Black));
    assert!(!board.check_win(Stone::White).is_win);
}

#[test]
fn test_board_positions_iter() {
    let board = Board::with_size(5);
    assert_eq!(board.positions().count(), 25);
}
