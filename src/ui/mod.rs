mod app;
mod board;
mod dialogs;
mod hud;
mod scene;
mod state;

pub const APP_ID: &str = "io.github.memorygame.MemoryGame";

pub use app::run;
