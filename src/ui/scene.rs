use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{build_board_grid, sync_all_cards};
use super::hud::{update_controls, update_timer_label};
use super::state::AppState;

/// Replaces the card grid with one built for the current session.
pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let board_container = state.borrow().board_container.clone();
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

/// Banners and control labels.
pub(super) fn refresh_status(st: &AppState) {
    let session = st.game.session();
    if let Some(banner) = &st.won_banner {
        banner.set_visible(session.is_won());
    }
    if let Some(banner) = &st.time_up_banner {
        banner.set_visible(session.is_time_up() && !session.is_won());
    }
    if let Some(container) = &st.board_container {
        if session.is_paused() {
            container.add_css_class("paused");
        } else {
            container.remove_css_class("paused");
        }
    }
    update_controls(st);
}

pub(super) fn refresh_view(st: &AppState) {
    update_timer_label(st);
    sync_all_cards(st);
    refresh_status(st);
}
