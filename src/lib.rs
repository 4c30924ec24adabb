pub mod game;

#[cfg(feature = "gui")]
pub mod ui;
