//! Engine tests - full game scenarios through the public API

use tetrix::core::{Board, Engine, EngineConfig, PieceGenerator, SequenceGenerator, Tetromino};
use tetrix::types::{GameStatus, InputCommand, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

fn board_with_rows_except(rows: std::ops::Range<usize>, gap: i32) -> Board {
    let mut board = Board::new();
    for y in rows {
        for x in 0..BOARD_WIDTH as i32 {
            if x != gap {
                board.set(Position::new(x, y as i32), Some(PieceKind::J));
            }
        }
    }
    board
}

fn instant_engine(kinds: &[PieceKind], board: Board) -> Engine<SequenceGenerator> {
    Engine::with_board(
        EngineConfig::default().without_clear_animation(),
        SequenceGenerator::new(kinds.to_vec()),
        board,
    )
}

#[test]
fn test_seeded_games_are_reproducible() {
    let mut a = Engine::new(777);
    let mut b = Engine::new(777);
    for step in 0..500 {
        let command = InputCommand::ALL[step % 5];
        a.apply(command);
        b.apply(command);
        a.update(16);
        b.update(16);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_hard_drop_into_empty_board() {
    // Spawned O hard-dropped on an empty board: 18 rows down, 36 points
    let mut engine = instant_engine(&[PieceKind::O, PieceKind::T], Board::new());
    assert_eq!(engine.hard_drop(), 18);
    assert_eq!(engine.score(), 36);

    for pos in [
        Position::new(4, 18),
        Position::new(5, 18),
        Position::new(4, 19),
        Position::new(5, 19),
    ] {
        assert_eq!(engine.board().cell(pos), Some(PieceKind::O));
    }
    let current = engine.current_piece().unwrap();
    assert_eq!(current.kind(), PieceKind::T);
    assert_eq!(current.position(), Position::new(4, 0));
}

#[test]
fn test_tetris_with_hard_drop() {
    let board = board_with_rows_except(16..20, 5);
    let mut engine = instant_engine(&[PieceKind::I, PieceKind::O], board);

    assert!(engine.rotate());
    let distance = engine.hard_drop();
    assert_eq!(distance, 17);
    assert_eq!(engine.lines_cleared(), 4);
    assert_eq!(engine.score(), 800 + 2 * 17);
    assert_eq!(engine.board().filled_count(), 0);
}

#[test]
fn test_score_only_changes_by_known_amounts() {
    let mut engine = Engine::with_generator(
        EngineConfig::default().without_clear_animation(),
        SequenceGenerator::new([PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::L]),
    );
    let mut prev = engine.score();
    for step in 0..2_000u32 {
        let level = engine.level();
        match step % 7 {
            0 | 3 => {
                engine.move_left();
            }
            1 => {
                engine.move_right();
            }
            2 | 5 => {
                engine.rotate();
            }
            4 => {
                let rows = engine.hard_drop();
                let delta = engine.score() - prev;
                let line_part = delta - 2 * rows;
                assert!(
                    [0, 100, 300, 500, 800].iter().any(|base| base * level == line_part),
                    "unexpected delta {} at level {}",
                    delta,
                    level
                );
                prev = engine.score();
            }
            _ => {
                engine.move_down();
            }
        }
        let delta = engine.score() - prev;
        assert!(
            [0, 100, 300, 500, 800].iter().any(|base| base * level == delta),
            "unexpected delta {} at level {}",
            delta,
            level
        );
        prev = engine.score();
        assert_eq!(engine.level(), engine.lines_cleared() / 10 + 1);

        if engine.status() == GameStatus::GameOver {
            engine.reset();
            prev = 0;
        }
    }
}

#[test]
fn test_game_over_state_is_frozen() {
    let mut board = Board::new();
    board.set(Position::new(4, 0), Some(PieceKind::S));
    let mut engine = instant_engine(&[PieceKind::O], board);
    assert_eq!(engine.status(), GameStatus::GameOver);

    let before = engine.snapshot();
    for command in [
        InputCommand::MoveLeft,
        InputCommand::MoveRight,
        InputCommand::MoveDown,
        InputCommand::Rotate,
        InputCommand::HardDrop,
        InputCommand::Pause,
    ] {
        assert!(!engine.apply(command));
    }
    assert!(!engine.update(60_000));
    assert_eq!(engine.snapshot(), before);

    engine.reset();
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.board().filled_count(), 0);
}

#[test]
fn test_line_clear_hold_then_spawn() {
    let board = board_with_rows_except(19..20, 5);
    let mut engine = Engine::with_board(
        EngineConfig::default(),
        SequenceGenerator::new([PieceKind::I, PieceKind::S]),
        board,
    );
    engine.rotate();
    engine.hard_drop();

    assert_eq!(engine.clearing_rows(), &[19]);
    assert_eq!(engine.current_piece(), None);
    assert_eq!(engine.lines_cleared(), 0);

    // Sixteen-millisecond ticks until the 600ms hold is over
    let mut ticks = 0;
    while !engine.clearing_rows().is_empty() {
        engine.update(16);
        ticks += 1;
        assert!(ticks <= 38);
    }
    assert_eq!(ticks, 38);
    assert_eq!(engine.lines_cleared(), 1);
    assert_eq!(engine.current_piece().unwrap().kind(), PieceKind::S);
}

#[test]
fn test_custom_clear_timing() {
    let board = board_with_rows_except(19..20, 5);
    let config = EngineConfig::new().with_clear_flash_ms(100).with_clear_fade_ms(50);
    assert_eq!(config.clear_total_ms(), 150);
    let mut engine = Engine::with_board(config, SequenceGenerator::repeat(PieceKind::I), board);
    engine.rotate();
    engine.hard_drop();

    assert!(!engine.update(149));
    assert!(engine.update(1));
    assert!(engine.clearing_rows().is_empty());
}

#[test]
fn test_gravity_speeds_up_with_level() {
    // Twelve rows with a well in column 5: three upright I pieces clear them all
    let board = board_with_rows_except((BOARD_HEIGHT - 12)..BOARD_HEIGHT, 5);
    let mut engine = instant_engine(&[PieceKind::I], board);
    assert_eq!(engine.drop_interval_ms(), 910);

    for _ in 0..3 {
        engine.rotate();
        engine.hard_drop();
    }
    assert_eq!(engine.lines_cleared(), 12);
    assert_eq!(engine.board().filled_count(), 0);
    assert_eq!(engine.level(), 2);
    assert_eq!(engine.drop_interval_ms(), 820);
}

#[test]
fn test_boxed_generator() {
    struct Alternating(bool);
    impl PieceGenerator for Alternating {
        fn next_kind(&mut self) -> PieceKind {
            self.0 = !self.0;
            if self.0 {
                PieceKind::S
            } else {
                PieceKind::Z
            }
        }
    }

    let generator: Box<dyn PieceGenerator + Send> = Box::new(Alternating(false));
    let engine = Engine::with_generator(EngineConfig::default(), generator);
    assert_eq!(engine.current_piece().map(|p| p.kind()), Some(PieceKind::S));
    assert_eq!(engine.next_piece().kind(), PieceKind::Z);
    assert_eq!(engine.next_next_piece(), Tetromino::new(PieceKind::S));
}
