use gtk4 as gtk;

use crate::game::{Game, Settings};

pub struct AppState {
    pub timer_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub won_banner: Option<gtk::Label>,
    pub time_up_banner: Option<gtk::Label>,
    pub reset_button: Option<gtk::Button>,
    pub pause_button: Option<gtk::Button>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,

    // Game state
    pub game: Game,
    pub card_buttons: Vec<gtk::Button>,
    pub timer_handle: Option<glib::SourceId>,
    pub mismatch_handle: Option<glib::SourceId>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        AppState {
            timer_label: None,
            board_container: None,
            won_banner: None,
            time_up_banner: None,
            reset_button: None,
            pause_button: None,
            dynamic_css_provider: None,
            game: Game::new(settings),
            card_buttons: Vec::new(),
            timer_handle: None,
            mismatch_handle: None,
        }
    }

    /// Drops any pending mismatch reset from the main loop.
    pub fn cancel_mismatch(&mut self) {
        if let Some(handle) = self.mismatch_handle.take() {
            handle.remove();
        }
    }
}
