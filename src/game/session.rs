use rand::Rng;

use super::deck::{self, Card};
use super::grid::GridSize;

/// What a card cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Hidden,
    Flipped,
    Solved,
}

/// Where the click state machine currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneFlipped(usize),
    Evaluating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was dropped: input locked, game won, paused, or unknown id.
    Ignored,
    /// First card of a pair turned face up.
    Flipped(usize),
    /// The face-up card was clicked again and turned back down.
    Unflipped(usize),
    Matched { first: usize, second: usize, won: bool },
    /// Both cards stay face up until `resolve_mismatch` runs.
    Mismatched { first: usize, second: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running(u32),
    TimeUp,
    /// Nothing to count down: won, paused, or already at zero.
    Stopped,
}

/// One game from deal to win or time-up. A new game always gets a new
/// session; sessions are never recycled.
#[derive(Clone, Debug)]
pub struct GameSession {
    size: GridSize,
    cards: Vec<Card>,
    flipped: Vec<usize>,
    solved: Vec<usize>,
    disabled: bool,
    won: bool,
    time_left: u32,
    paused: bool,
    time_up: bool,
    lock_solved: bool,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Self {
        Self::from_cards(size, deck::deal(size, rng))
    }

    /// Builds a session around an already dealt board. `cards[i].id` must be `i`.
    pub fn from_cards(size: GridSize, cards: Vec<Card>) -> Self {
        debug_assert!(cards.iter().enumerate().all(|(idx, card)| card.id == idx));
        let mut session = GameSession {
            size,
            cards,
            flipped: Vec::with_capacity(2),
            solved: Vec::new(),
            disabled: false,
            won: false,
            time_left: size.time_limit_secs(),
            paused: false,
            time_up: false,
            lock_solved: false,
        };
        session.refresh_won();
        session
    }

    /// Drop clicks on cards that are already solved.
    pub fn with_solved_lock(mut self, lock: bool) -> Self {
        self.lock_solved = lock;
        self
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn solved(&self) -> &[usize] {
        &self.solved
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    pub fn phase(&self) -> Phase {
        if self.disabled {
            return Phase::Evaluating;
        }
        match self.flipped.as_slice() {
            [only] => Phase::OneFlipped(*only),
            _ => Phase::Idle,
        }
    }

    /// The countdown only advances while this holds.
    pub fn timer_active(&self) -> bool {
        self.time_left > 0 && !self.won && !self.paused
    }

    pub fn face(&self, id: usize) -> CardFace {
        if self.solved.contains(&id) {
            CardFace::Solved
        } else if self.flipped.contains(&id) {
            CardFace::Flipped
        } else {
            CardFace::Hidden
        }
    }

    /// Number shown on the card, or `None` while it is face down.
    /// Once the game is won the spare card of an odd board is shown too.
    pub fn visible_number(&self, id: usize) -> Option<u32> {
        let card = self.cards.get(id)?;
        match self.face(id) {
            CardFace::Hidden if !self.won => None,
            _ => Some(card.number),
        }
    }

    pub fn click(&mut self, id: usize) -> ClickOutcome {
        if id >= self.cards.len() || self.disabled || self.won || self.paused {
            return ClickOutcome::Ignored;
        }
        if self.lock_solved && self.solved.contains(&id) {
            return ClickOutcome::Ignored;
        }

        match self.flipped.len() {
            0 => {
                self.flipped.push(id);
                ClickOutcome::Flipped(id)
            }
            1 if self.flipped[0] == id => {
                self.flipped.clear();
                self.disabled = false;
                ClickOutcome::Unflipped(id)
            }
            1 => {
                let first = self.flipped[0];
                self.disabled = true;
                self.flipped.push(id);
                self.check_match(first, id)
            }
            _ => ClickOutcome::Ignored,
        }
    }

    fn check_match(&mut self, first: usize, second: usize) -> ClickOutcome {
        if self.cards[first].number != self.cards[second].number {
            return ClickOutcome::Mismatched { first, second };
        }

        for id in [first, second] {
            if !self.solved.contains(&id) {
                self.solved.push(id);
            }
        }
        self.flipped.clear();
        self.disabled = false;
        self.refresh_won();
        ClickOutcome::Matched {
            first,
            second,
            won: self.won,
        }
    }

    /// Turns a mismatched pair back face down and unlocks input.
    /// Returns false when no mismatch was pending.
    pub fn resolve_mismatch(&mut self) -> bool {
        if !self.disabled || self.flipped.len() != 2 {
            return false;
        }
        self.flipped.clear();
        self.disabled = false;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.timer_active() {
            return TickOutcome::Stopped;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            self.time_up = true;
            TickOutcome::TimeUp
        } else {
            TickOutcome::Running(self.time_left)
        }
    }

    /// Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    fn refresh_won(&mut self) {
        let pairable = self.cards.len() - deck::spare_count(self.cards.len());
        if !self.cards.is_empty() && self.solved.len() == pairable {
            self.won = true;
        }
    }
}
