//! Deck generation and selection property tests.

use std::time::Duration;

use proptest::prelude::*;

use memory_match::deck::shuffle;
use memory_match::{
    BoardLayout, ClickOutcome, DeckGenerator, Engine, EngineConfig, GameRng, ImageId,
    ScriptedSource, TileId,
};

// =============================================================================
// Generation
// =============================================================================

/// The shipped configuration: 18 images over 46 tiles.
#[test]
fn test_heart_deck_counts() {
    let layout = BoardLayout::heart();
    let generator = DeckGenerator::new(layout.playable_count());
    let mut rng = GameRng::new(7);
    let deck = generator
        .generate(&ImageId::sequence(18), layout.pairs_needed(), &mut rng)
        .unwrap();

    let counts = deck.pair_counts();
    assert_eq!(deck.len(), 46);
    assert_eq!(counts.len(), 18);
    for (image, count) in counts {
        let expected = if image.raw() < 5 { 4 } else { 2 };
        assert_eq!(count, expected, "{image}");
    }
}

#[test]
fn test_same_source_same_deck() {
    let pool = ImageId::sequence(30);
    let generator = DeckGenerator::new(46);

    let a = generator.generate(&pool, 23, &mut GameRng::new(99)).unwrap();
    let b = generator.generate(&pool, 23, &mut GameRng::new(99)).unwrap();
    assert_eq!(a, b);

    let script = vec![5, 17, 2, 40, 11];
    let c = generator.generate(&pool, 23, &mut ScriptedSource::new(script.clone())).unwrap();
    let d = generator.generate(&pool, 23, &mut ScriptedSource::new(script)).unwrap();
    assert_eq!(c, d);
}

#[test]
fn test_shuffle_draws_once_per_position() {
    let mut source = ScriptedSource::new(vec![0]);
    let mut items: Vec<u32> = (0..46).collect();
    shuffle(&mut items, &mut source);
    assert_eq!(source.draws_taken(), 45);
}

/// Each position should be equally likely to receive any given item.
#[test]
fn test_shuffle_is_not_positionally_biased() {
    const ROUNDS: usize = 4000;
    const LEN: usize = 8;

    let mut rng = GameRng::new(2024);
    let mut landed = [0usize; LEN];
    for _ in 0..ROUNDS {
        let mut items: Vec<usize> = (0..LEN).collect();
        shuffle(&mut items, &mut rng);
        let position = items.iter().position(|&item| item == 0).unwrap();
        landed[position] += 1;
    }

    // Expected 500 per position with a standard deviation near 21.
    for (position, &count) in landed.iter().enumerate() {
        assert!((350..=650).contains(&count), "position {position}: {count}");
    }
}

/// Different seeds should not produce the same arrangement.
#[test]
fn test_seeds_diverge() {
    let pool = ImageId::sequence(23);
    let generator = DeckGenerator::new(46);
    let first = generator.generate(&pool, 23, &mut GameRng::new(1)).unwrap();

    let identical = (2..50)
        .filter(|&seed| generator.generate(&pool, 23, &mut GameRng::new(seed)).unwrap() == first)
        .count();
    assert_eq!(identical, 0);
}

proptest! {
    #[test]
    fn deck_images_fill_whole_pairs(
        pool_size in 1u32..40,
        pairs in 1usize..40,
        seed in any::<u64>(),
    ) {
        let pool = ImageId::sequence(pool_size);
        let deck = DeckGenerator::new(pairs * 2)
            .generate(&pool, pairs, &mut GameRng::new(seed))
            .unwrap();

        prop_assert_eq!(deck.len(), pairs * 2);
        prop_assert!(deck.validate().is_ok());

        let counts = deck.pair_counts();
        for (image, count) in counts {
            let k = image.raw() as usize;
            prop_assert!(k < pool.len());
            // Pool entry k is chosen once per pass that reaches it.
            let passes = (0..pairs).filter(|i| i % pool.len() == k).count();
            prop_assert_eq!(count, passes * 2);
        }
    }

    #[test]
    fn every_tile_has_a_partner(pool_size in 1u32..30, pairs in 1usize..30, seed in any::<u64>()) {
        let deck = DeckGenerator::new(pairs * 2)
            .generate(&ImageId::sequence(pool_size), pairs, &mut GameRng::new(seed))
            .unwrap();

        for tile in TileId::all(deck.len()) {
            prop_assert!(deck.partners(tile).next().is_some());
        }
    }
}

// =============================================================================
// Selection invariants under arbitrary play
// =============================================================================

proptest! {
    #[test]
    fn selection_invariants_hold(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u16..14, 0u64..1500), 1..80),
    ) {
        let mut engine = Engine::new(EngineConfig::new(seed));
        let session = engine
            .start_game(&ImageId::sequence(4), BoardLayout::strip(12).unwrap())
            .unwrap();

        for (tile, wait) in steps {
            let before = engine.snapshot(session).unwrap();
            let outcome = engine.click(session, TileId::new(tile));
            let after = engine.snapshot(session).unwrap();

            if let ClickOutcome::Ignored(_) = outcome {
                prop_assert_eq!(&before, &after);
            }
            if tile >= 12 {
                prop_assert!(!outcome.has_update());
            }

            engine.advance(Duration::from_millis(wait));
            let state = engine.snapshot(session).unwrap();

            prop_assert!(state.selected.len() <= 2);
            prop_assert!(state.selected.iter().all(|t| !state.matched.contains(t)));
            prop_assert_eq!(state.matched.len() % 2, 0);
            prop_assert!(state.incorrect.is_empty() || state.incorrect == state.selected);
            prop_assert_eq!(state.resolving, state.selected.len() == 2);
            prop_assert_eq!(state.won, state.matched.len() == 12);
        }
    }
}
