use std::time::Duration;

use rand::Rng;

use super::grid::GridSize;
use super::session::{ClickOutcome, GameSession, TickOutcome};
use super::settings::Settings;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the live session and hands out the `game_id` that deferred
/// callbacks must present to touch it.
///
/// Every reinitialization bumps `game_id`, so a timer tick or mismatch
/// reset scheduled for an earlier game finds a different id and does nothing.
#[derive(Debug)]
pub struct Game {
    grid_size: GridSize,
    session: GameSession,
    game_id: u64,
    mismatch_delay: Duration,
    lock_solved: bool,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let grid_size = settings.grid_size();
        let mut game = Game {
            grid_size,
            session: GameSession::new(grid_size, rng),
            game_id: 0,
            mismatch_delay: settings.mismatch_delay(),
            lock_solved: settings.lock_solved_cards,
        };
        game.reset_with(rng);
        game
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    pub fn reset(&mut self) {
        self.reset_with(&mut rand::rng());
    }

    /// Deals a fresh board for the current grid size and replaces the session.
    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.game_id = self.game_id.wrapping_add(1);
        self.session = GameSession::new(self.grid_size, rng).with_solved_lock(self.lock_solved);
        log::info!(
            "game {} started: {} board, {}s on the clock",
            self.game_id,
            self.grid_size,
            self.session.time_left()
        );
    }

    /// Switches to `size` and starts over. Returns false when `size` is
    /// already the current grid size.
    pub fn set_grid_size(&mut self, size: GridSize) -> bool {
        self.set_grid_size_with(size, &mut rand::rng())
    }

    pub fn set_grid_size_with<R: Rng + ?Sized>(&mut self, size: GridSize, rng: &mut R) -> bool {
        if size == self.grid_size {
            return false;
        }
        self.grid_size = size;
        self.reset_with(rng);
        true
    }

    /// Applies text typed into the grid-size field. Invalid input leaves the
    /// game untouched.
    pub fn apply_grid_size_input(&mut self, raw: &str) -> bool {
        match GridSize::parse(raw) {
            Ok(size) => self.set_grid_size(size),
            Err(err) => {
                log::debug!("grid size input ignored: {err}");
                false
            }
        }
    }

    pub fn click(&mut self, id: usize) -> ClickOutcome {
        let outcome = self.session.click(id);
        match outcome {
            ClickOutcome::Ignored => log::trace!("click on card {id} ignored"),
            ClickOutcome::Flipped(id) => log::debug!("card {id} flipped"),
            ClickOutcome::Unflipped(id) => log::debug!("card {id} turned back"),
            ClickOutcome::Matched { first, second, won } => {
                log::debug!("cards {first} and {second} matched");
                if won {
                    log::info!(
                        "game {} won with {}s left",
                        self.game_id,
                        self.session.time_left()
                    );
                }
            }
            ClickOutcome::Mismatched { first, second } => {
                log::debug!("cards {first} and {second} do not match");
            }
        }
        outcome
    }

    /// Completes a pending mismatch for game `game_id`. Stale ids are ignored.
    pub fn resolve_mismatch(&mut self, game_id: u64) -> bool {
        if game_id != self.game_id {
            log::trace!("stale mismatch reset for game {game_id}");
            return false;
        }
        self.session.resolve_mismatch()
    }

    /// Advances the countdown of game `game_id` by one second.
    /// Returns `None` when `game_id` belongs to a superseded game.
    pub fn tick(&mut self, game_id: u64) -> Option<TickOutcome> {
        if game_id != self.game_id {
            log::trace!("stale tick for game {game_id}");
            return None;
        }
        let outcome = self.session.tick();
        if outcome == TickOutcome::TimeUp {
            log::info!("game {} ran out of time", self.game_id);
        }
        Some(outcome)
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.session.toggle_pause();
        log::debug!("game {} {}", self.game_id, if paused { "paused" } else { "resumed" });
        paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game {
        Game::with_rng(&Settings::default(), &mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn starts_with_configured_grid() {
        let settings = Settings {
            default_grid_size: 6,
            ..Settings::default()
        };
        let game = Game::with_rng(&settings, &mut StdRng::seed_from_u64(1));
        assert_eq!(game.grid_size().get(), 6);
        assert_eq!(game.session().cards().len(), 36);
        assert_eq!(game.session().time_left(), 100);
    }

    #[test]
    fn reset_bumps_game_id() {
        let mut game = game();
        let before = game.game_id();
        game.reset_with(&mut StdRng::seed_from_u64(2));
        assert_eq!(game.game_id(), before + 1);
    }

    #[test]
    fn invalid_grid_input_changes_nothing() {
        let mut game = game();
        let id = game.game_id();
        for raw in ["", "abc", "1", "11", "-3"] {
            assert!(!game.apply_grid_size_input(raw), "input {raw:?}");
        }
        assert_eq!(game.game_id(), id);
        assert_eq!(game.grid_size().get(), 4);
    }

    #[test]
    fn same_grid_size_keeps_session() {
        let mut game = game();
        let id = game.game_id();
        assert!(!game.apply_grid_size_input("4"));
        assert_eq!(game.game_id(), id);
    }

    #[test]
    fn new_grid_size_reinitializes() {
        let mut game = game();
        let id = game.game_id();
        assert!(game.set_grid_size_with(GridSize::new(2).unwrap(), &mut StdRng::seed_from_u64(9)));
        assert_eq!(game.game_id(), id + 1);
        assert_eq!(game.session().cards().len(), 4);
        assert_eq!(game.session().time_left(), 10);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut game = game();
        let old = game.game_id();
        game.reset_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(game.tick(old), None);
        assert_eq!(game.session().time_left(), 60);
        assert_eq!(game.tick(game.game_id()), Some(TickOutcome::Running(59)));
    }

    #[test]
    fn settings_lock_reaches_session() {
        let settings = Settings {
            default_grid_size: 2,
            lock_solved_cards: true,
            ..Settings::default()
        };
        let mut game = Game::with_rng(&settings, &mut StdRng::seed_from_u64(4));
        let cards = game.session().cards().to_vec();
        let first = cards[0];
        let partner = cards
            .iter()
            .find(|card| card.id != first.id && card.number == first.number)
            .copied()
            .unwrap();
        game.click(first.id);
        game.click(partner.id);
        assert_eq!(game.click(first.id), ClickOutcome::Ignored);
    }
}
