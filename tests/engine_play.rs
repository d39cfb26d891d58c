//! End-to-end play through the public engine API

use bridges::engine::ThreatStatus;
use bridges::geometry::{classify, PatternClass};
use bridges::rules::{has_connection, would_cross_opponent_diagonal};
use bridges::{AIEngine, Board, MoveType, Personality, Pos, Stone};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn place(board: &mut Board, stones: &[((u8, u8), Stone)]) {
    for &((r, c), s) in stones {
        board.place_stone(Pos::new(r, c), s);
    }
}

fn attacker() -> Personality {
    let mut p = Personality::aggressive();
    p.strategy.attack_probability = 1.0;
    p.strategy.attack_threshold = 0;
    p
}

/// Black L gap (5,5)-(7,6) and two quiet white stones; White to move
fn attack_position() -> Board {
    let mut board = Board::new();
    place(
        &mut board,
        &[
            ((5, 5), Stone::Black),
            ((12, 2), Stone::White),
            ((7, 6), Stone::Black),
            ((12, 4), Stone::White),
        ],
    );
    board
}

fn other_fill_cell(played: Pos) -> Pos {
    if played == Pos::new(6, 5) {
        Pos::new(6, 6)
    } else {
        Pos::new(6, 5)
    }
}

#[test]
fn test_first_move_lands_in_starting_area() {
    let personality = Personality::default();
    for seed in 0..20 {
        for player in [Stone::Black, Stone::White] {
            let mut engine = AIEngine::with_seed(player, personality.clone(), seed);
            let mv = engine.get_next_move(&Board::new()).unwrap();
            assert_eq!(mv.move_type, MoveType::Initial);
            assert!(
                personality.starting_area.contains(mv.row, mv.col, 15),
                "seed {seed}: ({}, {}) outside starting area",
                mv.row,
                mv.col
            );
        }
    }
}

#[test]
fn test_second_move_forms_pattern_with_first() {
    for seed in 0..10 {
        let mut board = Board::new();
        let mut engine = AIEngine::with_seed(Stone::Black, Personality::default(), seed);

        let first = engine.get_next_move(&board).unwrap();
        assert!(board.make_move(first.pos(), Stone::Black).success);
        assert!(board.make_move(Pos::new(14, 0), Stone::White).success);

        let second = engine.get_next_move(&board).unwrap();
        assert_eq!(second.move_type, MoveType::Second);
        let (dr, dc) = first.pos().delta(second.pos());
        assert!(matches!(
            classify(dr, dc),
            Some(PatternClass::L) | Some(PatternClass::D)
        ));
        assert_eq!(second.from_head, Some(first.pos()));
    }
}

#[test]
fn test_threat_follow_through_completes_unanswered_attack() {
    let mut board = attack_position();
    let mut white = AIEngine::with_seed(Stone::White, attacker(), 3);

    let attack = white.get_next_move(&board).unwrap();
    assert_eq!(attack.move_type, MoveType::Attack);
    assert!(white.threat().is_some());
    assert!(board.make_move(attack.pos(), Stone::White).success);

    // Black plays elsewhere
    assert!(board.make_move(Pos::new(1, 12), Stone::Black).success);

    let follow = white.get_next_move(&board).unwrap();
    assert_eq!(follow.move_type, MoveType::ThreatFollowUp);
    assert_eq!(follow.pos(), other_fill_cell(attack.pos()));
    assert_eq!(white.stats().threat, Some(ThreatStatus::Fulfilled));
}

#[test]
fn test_threat_follow_through_abandons_answered_attack() {
    let mut board = attack_position();
    let mut white = AIEngine::with_seed(Stone::White, attacker(), 3);

    let attack = white.get_next_move(&board).unwrap();
    assert_eq!(attack.move_type, MoveType::Attack);
    assert!(board.make_move(attack.pos(), Stone::White).success);

    // Black saves the gap
    let saved = other_fill_cell(attack.pos());
    assert!(board.make_move(saved, Stone::Black).success);

    let next = white.get_next_move(&board).unwrap();
    assert_ne!(next.move_type, MoveType::ThreatFollowUp);
    assert_ne!(next.pos(), saved);
    assert_eq!(white.stats().threat, Some(ThreatStatus::Abandoned));
}

#[test]
fn test_move_noise_changes_attack_cell() {
    let board = attack_position();
    let mut cells = Vec::new();
    for noise in [0.0, 1.0] {
        let mut personality = attacker();
        personality.randomization.move_noise = noise;
        let mut white = AIEngine::with_seed(Stone::White, personality, 3);
        let mv = white.get_next_move(&board).unwrap();
        assert_eq!(mv.move_type, MoveType::Attack);
        cells.push(mv.pos());
    }
    assert_ne!(cells[0], cells[1]);
    for cell in cells {
        assert!(cell == Pos::new(6, 5) || cell == Pos::new(6, 6));
    }
}

#[test]
fn test_plays_without_collaborators() {
    let mut board = Board::new();
    let mut black = AIEngine::with_collaborators(
        Stone::Black,
        Personality::default(),
        StdRng::seed_from_u64(5),
        None,
        None,
    );
    let mut white = AIEngine::with_seed(Stone::White, Personality::default(), 6);

    for _ in 0..6 {
        let mv = black.get_next_move(&board).unwrap();
        assert!(board.make_move(mv.pos(), Stone::Black).success);
        let mv = white.get_next_move(&board).unwrap();
        assert!(board.make_move(mv.pos(), Stone::White).success);
    }
    let stats = black.stats();
    assert_eq!(stats.fragments, 0);
    assert_eq!(stats.gap_stats.active, 0);
    assert_eq!(stats.moves_played, 6);
}

#[test]
fn test_reset_starts_a_new_game() {
    let mut board = Board::new();
    let mut engine = AIEngine::with_seed(Stone::White, Personality::defensive(), 9);
    for i in 0..3u8 {
        assert!(board.make_move(Pos::new(2 + 4 * i, 7), Stone::Black).success);
        let mv = engine.get_next_move(&board).unwrap();
        assert!(board.make_move(mv.pos(), Stone::White).success);
    }
    assert_eq!(engine.stats().moves_played, 3);

    engine.reset();
    assert_eq!(engine.stats().moves_played, 0);
    let mv = engine.get_next_move(&Board::new()).unwrap();
    assert_eq!(mv.move_type, MoveType::Initial);
}

#[test]
fn test_self_play_respects_crossing_rule() {
    let mut board = Board::new();
    let mut engines = [
        AIEngine::with_seed(Stone::Black, Personality::default(), 21),
        AIEngine::with_seed(Stone::White, Personality::aggressive(), 22),
    ];

    let mut played = 0;
    'game: while played < board.size() * board.size() {
        for engine in engines.iter_mut() {
            let player = engine.player();
            let Some(mv) = engine.get_next_move(&board) else {
                break 'game;
            };
            let pos = mv.pos();
            assert!(board.is_empty(pos), "{pos} already occupied");
            if mv.move_type != MoveType::ThreatDefense {
                assert!(
                    !would_cross_opponent_diagonal(&board, pos, player),
                    "{} move at {pos} crosses",
                    mv.move_type.name()
                );
            }
            let outcome = board.make_move(pos, player);
            assert!(outcome.success);
            played += 1;
            if outcome.game_over {
                assert!(has_connection(&board, player));
                break 'game;
            }
        }
    }
    assert!(played >= 8, "game stalled after {played} moves");
}

#[test]
fn test_stats_serialize_to_json() {
    let mut board = Board::new();
    let mut engine = AIEngine::with_seed(Stone::Black, Personality::default(), 4);
    let mv = engine.get_next_move(&board).unwrap();
    board.make_move(mv.pos(), Stone::Black);

    let stats = serde_json::to_value(engine.stats()).unwrap();
    assert_eq!(stats["personality"], "balanced");
    assert_eq!(stats["last_move_type"], "Initial");
    assert!(stats["gap_stats"].is_object());

    let descriptor = serde_json::to_value(&mv).unwrap();
    assert_eq!(descriptor["move_type"], "Initial");
}

#[test]
fn test_missing_personality_file_falls_back() {
    let p = Personality::load_or_default("/nonexistent/personality.json");
    assert_eq!(p.name, Personality::default().name);
}
