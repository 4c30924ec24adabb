use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::GridSize;

/// One cell of the board. `id` is the card's position on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub number: u32,
}

/// Deals a shuffled board for `size`.
///
/// Every number in `1..=pair_count` is dealt twice. When the board has an
/// odd number of cells the last free cell gets a spare card numbered
/// `pair_count + 1`, which has no partner.
pub fn deal<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Vec<Card> {
    let total_cards = size.total_cards();
    let pair_count = size.pair_count() as u32;

    let mut numbers: Vec<u32> = (1..=pair_count).chain(1..=pair_count).collect();
    if numbers.len() < total_cards {
        numbers.push(pair_count + 1);
    }
    numbers.truncate(total_cards);
    numbers.shuffle(rng);

    numbers
        .into_iter()
        .enumerate()
        .map(|(id, number)| Card { id, number })
        .collect()
}

/// Number of cards on a board of `len` cards that can never be matched.
pub fn spare_count(len: usize) -> usize {
    len % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn counts(cards: &[Card]) -> HashMap<u32, usize> {
        let mut out = HashMap::new();
        for card in cards {
            *out.entry(card.number).or_insert(0) += 1;
        }
        out
    }

    #[test]
    fn ids_follow_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards = deal(GridSize::new(4).unwrap(), &mut rng);
        assert_eq!(cards.len(), 16);
        for (idx, card) in cards.iter().enumerate() {
            assert_eq!(card.id, idx);
        }
    }

    #[test]
    fn even_board_is_all_pairs() {
        let mut rng = StdRng::seed_from_u64(1);
        let cards = deal(GridSize::new(2).unwrap(), &mut rng);
        let counts = counts(&cards);
        assert_eq!(counts.len(), 2);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn odd_board_has_one_spare() {
        let mut rng = StdRng::seed_from_u64(3);
        let cards = deal(GridSize::new(3).unwrap(), &mut rng);
        assert_eq!(cards.len(), 9);
        let counts = counts(&cards);
        assert_eq!(counts.get(&5), Some(&1));
        for number in 1..=4 {
            assert_eq!(counts.get(&number), Some(&2), "number {number}");
        }
        assert_eq!(spare_count(cards.len()), 1);
    }

    #[test]
    fn same_seed_same_deal() {
        let size = GridSize::new(6).unwrap();
        let a = deal(size, &mut StdRng::seed_from_u64(99));
        let b = deal(size, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
