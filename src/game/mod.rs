//! Rules of the pairs game, free of any toolkit code.

pub mod controller;
pub mod deck;
pub mod grid;
pub mod session;
pub mod settings;

pub use controller::{Game, TICK_INTERVAL};
pub use deck::Card;
pub use grid::{GridSize, GridSizeError, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use session::{CardFace, ClickOutcome, GameSession, Phase, TickOutcome};
pub use settings::{Settings, SettingsError};
