//! Integration tests for the session lifecycle and the tick pipeline

use tetris_max::core::{GameState, Motion, Phase, Piece};
use tetris_max::types::{Key, Shape, SoundEvent, ROWS, SPAWN_HEIGHT, SPAWN_OFFSET};

fn feed(state: &mut GameState, total_ms: u32, chunk_ms: u32) {
    let mut left = total_ms;
    while left > 0 {
        let d = chunk_ms.min(left);
        state.tick(d);
        left -= d;
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert_eq!(*state.phase(), Phase::Idle);

    state.start(1);
    assert!(state.started());
    assert!(state.current().is_some());
    assert!(state.next().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());

    state.stop();
    assert!(!state.started());
    assert!(state.current().is_none());
}

#[test]
fn test_accessors_before_start_are_neutral() {
    let state = GameState::new(7);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert!(state.board().is_empty());
    assert!(state.current().is_none());
    assert!(state.next().is_none());
    assert!(state.clearing_rows().is_empty());
    assert!(!state.game_over());
}

#[test]
fn test_line_piece_end_to_end() {
    let mut state = GameState::new(12345);
    state.start(1);
    // row 0 full except the line's four columns, one color; a stray block
    // above keeps the board from ending empty
    state.board_mut().fill_row(0, Shape::T.cell(), &[3, 4, 5, 6]);
    state.board_mut().set(9, 1, Shape::T.cell());
    state.set_current(Piece::new(Shape::Line));
    state.take_events();

    state.handle_key_down(Key::HardDrop);
    // 19 rows down, a blocked step, then the 10-tick flash
    feed(&mut state, 1000, 16);

    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 100 + 19);
    assert_eq!(state.level(), 1);
    assert_eq!(state.board().get(9, 0), Some(Shape::T.cell()));
    assert_eq!(state.board().filled_count(), 1);

    let events = state.take_events();
    assert_eq!(
        &events[..3],
        &[SoundEvent::Drop, SoundEvent::Stick, SoundEvent::Clear(1)]
    );
    assert!(!events.contains(&SoundEvent::NewLevel));
}

#[test]
fn test_frame_rate_does_not_change_the_game() {
    let run = |chunk: u32| {
        let mut state = GameState::new(4242);
        state.start(5);
        feed(&mut state, 3000, chunk);
        state.snapshot()
    };
    let reference = run(1000);
    assert_eq!(reference.tick, 180);
    for chunk in [1, 7, 16, 33, 250] {
        assert_eq!(run(chunk), reference, "chunk {} ms", chunk);
    }
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    a.start(1);
    b.start(1);
    for _ in 0..50 {
        assert_eq!(a.current(), b.current());
        assert_eq!(a.next(), b.next());
        a.spawn_piece();
        b.spawn_piece();
    }
}

#[test]
fn test_spawn_distribution_is_roughly_uniform() {
    let mut state = GameState::new(99);
    state.start(1);
    for _ in 0..6999 {
        state.spawn_piece();
    }
    let counts = state.spawn_counts();
    assert_eq!(counts.iter().sum::<u32>(), 7000);
    for (shape, &n) in Shape::ALL.iter().zip(counts) {
        assert!((800..1200).contains(&n), "{:?} spawned {} times", shape, n);
    }
}

#[test]
fn test_four_line_clear_scores_flat_at_high_level() {
    let mut state = GameState::new(5);
    state.start(8);
    for row in 0..4 {
        state.board_mut().fill_row(row, Shape::J.cell(), &[0]);
    }
    state.board_mut().set(5, 4, Shape::S.cell());

    let mut line = Piece::new(Shape::Line);
    line.rotate_cw();
    line.offset = -1; // grid column 1 lands in board column 0
    state.set_current(line);
    state.handle_key_down(Key::HardDrop);
    feed(&mut state, 1000, 16);

    assert_eq!(state.lines(), 4);
    // vertical line spans grid rows 0..=3, bottom at height - 3; drops from 21 to 3
    assert_eq!(state.score(), 1000 + 18);
    assert_eq!(state.level(), 8);
    assert!(state.take_events().contains(&SoundEvent::Clear(4)));
}

#[test]
fn test_level_never_passes_ten() {
    let mut state = GameState::new(5);
    state.start(10);
    state.board_mut().fill_row(0, Shape::J.cell(), &[3, 4, 5, 6]);
    state.board_mut().set(9, 1, Shape::J.cell());
    state.set_current(Piece::new(Shape::Line));
    state.handle_key_down(Key::HardDrop);
    feed(&mut state, 1000, 16);
    assert_eq!(state.lines(), 1);
    assert_eq!(state.level(), 10);
}

#[test]
fn test_game_over_when_spawn_is_blocked() {
    let mut state = GameState::new(3);
    state.start(1);
    for row in 0..ROWS {
        state.board_mut().fill_row(row, Shape::Z.cell(), &[row % 2]);
    }
    assert!(!state.spawn_piece());
    assert!(state.game_over());
    assert_eq!(*state.phase(), Phase::GameOver);
    assert_eq!(state.take_events().last(), Some(&SoundEvent::GameOver));

    // a finished session ignores time and keys
    let tick = state.tick_count();
    state.handle_key_down(Key::MoveLeft);
    assert_eq!(state.tick(5000), 0);
    assert_eq!(state.tick_count(), tick);
}

#[test]
fn test_game_over_on_overflowing_lock() {
    let mut state = GameState::new(3);
    state.start(1);
    // stack up to row 18 under the spawn columns
    for row in 0..19 {
        state.board_mut().fill_row(row, Shape::Z.cell(), &[0]);
    }
    state.set_current(Piece::new(Shape::T));
    assert_eq!(state.current().unwrap().height, SPAWN_HEIGHT);

    // first gravity attempt is blocked, grace runs out, the T locks in rows 19-20
    feed(&mut state, 1000, 16);
    assert!(state.game_over());
    assert_eq!(state.take_events().last(), Some(&SoundEvent::GameOver));
}

#[test]
fn test_pause_toggle() {
    let mut state = GameState::new(1);
    state.start(1);
    state.toggle_pause();
    assert!(state.paused());
    assert_eq!(state.tick(1000), 0);
    assert!(!state.snapshot().playable());

    state.toggle_pause();
    assert!(!state.paused());
    assert_eq!(state.tick(1000), 60);
}

#[test]
fn test_freefall_hold_and_release() {
    let mut state = GameState::new(1);
    state.start(1);
    state.set_current(Piece::new(Shape::S));

    state.handle_key_down(Key::Freefall);
    assert_eq!(state.motion(), Motion::Freefall);
    for _ in 0..10 {
        state.step();
    }
    assert_eq!(state.current().unwrap().height, SPAWN_HEIGHT - 5);
    assert_eq!(state.pending_drop_score(), 5);

    state.handle_key_up(Key::Freefall);
    assert_eq!(state.motion(), Motion::Gravity);
    assert_eq!(state.current().unwrap().offset, SPAWN_OFFSET);
}
