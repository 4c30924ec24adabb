//! Properties of dealing and of the click state machine over every board size.

use std::collections::HashMap;

use memory_game::game::{ClickOutcome, GameSession, GridSize, TickOutcome};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn session(side: u8, seed: u64) -> GameSession {
    let size = GridSize::new(side as i64).unwrap();
    GameSession::new(size, &mut StdRng::seed_from_u64(seed))
}

proptest! {
    #[test]
    fn deal_fills_board_with_pairs(side in 2u8..=10, seed in any::<u64>()) {
        let session = session(side, seed);
        let cards = session.cards();
        let total = side as usize * side as usize;
        prop_assert_eq!(cards.len(), total);

        for (idx, card) in cards.iter().enumerate() {
            prop_assert_eq!(card.id, idx);
        }

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for card in cards {
            *counts.entry(card.number).or_insert(0) += 1;
        }
        let singles = counts.values().filter(|&&n| n == 1).count();
        prop_assert!(counts.values().all(|&n| n == 1 || n == 2));
        prop_assert_eq!(singles, total % 2);
    }

    #[test]
    fn fresh_clock_matches_table(side in 2u8..=10, seed in any::<u64>()) {
        let session = session(side, seed);
        let size = GridSize::new(side as i64).unwrap();
        prop_assert_eq!(session.time_left(), size.time_limit_secs());
        prop_assert!(session.flipped().is_empty());
        prop_assert!(session.solved().is_empty());
        prop_assert!(!session.is_paused());
    }

    #[test]
    fn random_play_keeps_invariants(
        side in 2u8..=6,
        seed in any::<u64>(),
        moves in prop::collection::vec((0usize..40, 0u8..4), 0..200),
    ) {
        let mut session = session(side, seed);
        for (target, action) in moves {
            match action {
                0 | 1 => {
                    let before = session.solved().len();
                    let outcome = session.click(target);
                    if let ClickOutcome::Unflipped(_) = outcome {
                        prop_assert_eq!(session.solved().len(), before);
                    }
                }
                2 => {
                    let before = session.time_left();
                    match session.tick() {
                        TickOutcome::Running(left) => prop_assert_eq!(left + 1, before),
                        TickOutcome::TimeUp => prop_assert_eq!(session.time_left(), 0),
                        TickOutcome::Stopped => prop_assert_eq!(session.time_left(), before),
                    }
                }
                _ => {
                    session.resolve_mismatch();
                }
            }

            prop_assert_eq!(session.solved().len() % 2, 0);
            prop_assert!(session.flipped().len() <= 2);
            if session.is_time_up() {
                prop_assert_eq!(session.time_left(), 0);
            }
            let pairable = session.cards().len() - session.cards().len() % 2;
            prop_assert_eq!(session.is_won(), session.solved().len() == pairable);
        }
    }
}
