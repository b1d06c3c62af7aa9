//! Session integration tests.
//!
//! These drive the engine the way a renderer does: start a game, click,
//! read snapshots, and advance time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use memory_match::{
    BoardLayout, ClickOutcome, Deck, Engine, EngineConfig, IgnoreReason, ImageId, SessionHandle,
    TileId,
};

fn t(id: u16) -> TileId {
    TileId::new(id)
}

fn win_counter(engine: &mut Engine, session: SessionHandle) -> Rc<Cell<u32>> {
    let calls = Rc::new(Cell::new(0));
    let handle = Rc::clone(&calls);
    engine
        .on_win(session, move || handle.set(handle.get() + 1))
        .unwrap();
    calls
}

/// Click every tile alongside an unmatched partner until the board is done.
fn solve(engine: &mut Engine, session: SessionHandle) {
    let deck = engine.deck(session).unwrap().clone();
    for tile in TileId::all(deck.len()) {
        let snapshot = engine.snapshot(session).unwrap();
        if snapshot.matched.contains(&tile) {
            continue;
        }
        let partner = deck
            .partners(tile)
            .find(|p| !snapshot.matched.contains(p))
            .unwrap();
        assert_eq!(engine.click(session, tile), ClickOutcome::Selected(tile));
        assert_eq!(
            engine.click(session, partner),
            ClickOutcome::Matched { first: tile, second: partner }
        );
    }
}

// =============================================================================
// End-to-end
// =============================================================================

/// One image, one pair: two clicks win the game.
#[test]
fn test_single_pair_scenario() {
    let mut engine = Engine::new(EngineConfig::new(1));
    let session = engine
        .start_game(&[ImageId::new(1)], BoardLayout::strip(2).unwrap())
        .unwrap();
    let wins = win_counter(&mut engine, session);

    engine.click(session, t(0));
    let snapshot = engine.snapshot(session).unwrap();
    assert_eq!(snapshot.selected.as_slice(), &[t(0)]);
    assert!(snapshot.matched.is_empty());

    engine.click(session, t(1));
    let snapshot = engine.snapshot(session).unwrap();
    assert_eq!(snapshot.matched_tiles(), vec![t(0), t(1)]);
    assert!(snapshot.selected.is_empty());
    assert!(snapshot.won);
    assert_eq!(wins.get(), 1);
}

/// Full heart board with the shipped 18-image pool.
#[test]
fn test_heart_game_wins_once() {
    let mut engine = Engine::new(EngineConfig::new(2024));
    let session = engine
        .start_game(&ImageId::sequence(18), BoardLayout::heart())
        .unwrap();
    let wins = win_counter(&mut engine, session);

    solve(&mut engine, session);

    let snapshot = engine.snapshot(session).unwrap();
    assert_eq!(snapshot.matched.len(), 46);
    assert!(snapshot.won);
    assert_eq!(wins.get(), 1);

    // Further clicks and time are no-ops and never re-fire.
    for id in 0..50 {
        engine.click(session, t(id));
    }
    engine.advance(Duration::from_secs(10));
    assert_eq!(wins.get(), 1);
}

#[test]
fn test_win_not_signalled_early() {
    let mut engine = Engine::new(EngineConfig::new(5));
    let session = engine
        .start_game(&ImageId::sequence(18), BoardLayout::heart())
        .unwrap();
    let wins = win_counter(&mut engine, session);
    let deck = engine.deck(session).unwrap().clone();

    // Match 22 of the 23 pairs.
    let mut matched = 0;
    for tile in TileId::all(deck.len()) {
        if matched == 22 {
            break;
        }
        let snapshot = engine.snapshot(session).unwrap();
        if snapshot.matched.contains(&tile) {
            continue;
        }
        let partner = deck.partners(tile).find(|p| !snapshot.matched.contains(p)).unwrap();
        engine.click(session, tile);
        engine.click(session, partner);
        matched += 1;
    }

    assert_eq!(engine.snapshot(session).unwrap().matched.len(), 44);
    assert!(!engine.has_won(session).unwrap());
    assert_eq!(wins.get(), 0);
}

// =============================================================================
// Click guards
// =============================================================================

/// Tiles 0/1 = image 1, 2/3 = image 2, 4/5 = image 3.
fn small_game() -> (Engine, SessionHandle) {
    let mut engine = Engine::default();
    let deck = Deck::from_images([1, 1, 2, 2, 3, 3].into_iter().map(ImageId::new).collect()).unwrap();
    let session = engine
        .start_game_with_deck(BoardLayout::strip(6).unwrap(), deck)
        .unwrap();
    (engine, session)
}

#[test]
fn test_non_playable_ignored() {
    let (mut engine, session) = small_game();
    let before = engine.snapshot(session).unwrap();

    assert_eq!(
        engine.click(session, t(6)),
        ClickOutcome::Ignored(IgnoreReason::NotPlayable)
    );
    assert_eq!(engine.snapshot(session).unwrap(), before);
}

#[test]
fn test_reselect_ignored() {
    let (mut engine, session) = small_game();
    engine.click(session, t(2));
    let before = engine.snapshot(session).unwrap();

    assert_eq!(
        engine.click(session, t(2)),
        ClickOutcome::Ignored(IgnoreReason::AlreadySelected)
    );
    assert_eq!(engine.snapshot(session).unwrap(), before);
}

#[test]
fn test_matched_tile_ignored() {
    let (mut engine, session) = small_game();
    engine.click(session, t(0));
    engine.click(session, t(1));
    let before = engine.snapshot(session).unwrap();

    assert_eq!(
        engine.click(session, t(1)),
        ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(engine.snapshot(session).unwrap(), before);
}

#[test]
fn test_clicks_blocked_during_mismatch() {
    let (mut engine, session) = small_game();
    engine.click(session, t(0));
    engine.click(session, t(2));
    let before = engine.snapshot(session).unwrap();
    assert!(before.resolving);

    for id in 0..6 {
        assert_eq!(
            engine.click(session, t(id)),
            ClickOutcome::Ignored(IgnoreReason::Resolving)
        );
    }
    assert_eq!(engine.snapshot(session).unwrap(), before);

    engine.advance(Duration::from_millis(1200));
    assert_eq!(engine.click(session, t(4)), ClickOutcome::Selected(t(4)));
}

#[test]
fn test_tile_views() {
    let (mut engine, session) = small_game();
    engine.click(session, t(0));
    engine.click(session, t(1));
    engine.click(session, t(2));
    engine.click(session, t(4));
    engine.advance(Duration::from_millis(700));

    let snapshot = engine.snapshot(session).unwrap();
    assert!(snapshot.tile(t(0)).matched);
    assert!(snapshot.tile(t(2)).face_up);
    assert!(snapshot.tile(t(2)).flagged);
    assert!(!snapshot.tile(t(3)).face_up);
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_new_game_resets_state() {
    let (mut engine, first) = small_game();
    engine.click(first, t(0));
    engine.click(first, t(1));

    let second = engine
        .start_game(&ImageId::sequence(3), BoardLayout::strip(6).unwrap())
        .unwrap();
    assert_ne!(first, second);

    let snapshot = engine.snapshot(second).unwrap();
    assert!(snapshot.matched.is_empty());
    assert!(snapshot.selected.is_empty());
    assert_eq!(
        engine.click(first, t(2)),
        ClickOutcome::Ignored(IgnoreReason::StaleSession)
    );
}

#[test]
fn test_win_callback_scoped_to_session() {
    let mut engine = Engine::default();
    let layout = BoardLayout::strip(2).unwrap();
    let first = engine.start_game(&[ImageId::new(1)], layout.clone()).unwrap();
    let first_wins = win_counter(&mut engine, first);

    let second = engine.start_game(&[ImageId::new(1)], layout).unwrap();
    let second_wins = win_counter(&mut engine, second);

    engine.click(second, t(0));
    engine.click(second, t(1));

    assert_eq!(first_wins.get(), 0);
    assert_eq!(second_wins.get(), 1);
}

#[test]
fn test_on_win_after_win_fires_immediately() {
    let mut engine = Engine::default();
    let session = engine
        .start_game(&[ImageId::new(1)], BoardLayout::strip(2).unwrap())
        .unwrap();
    engine.click(session, t(0));
    engine.click(session, t(1));

    let wins = win_counter(&mut engine, session);
    assert_eq!(wins.get(), 1);
}
