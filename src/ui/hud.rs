use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;

use crate::game::{TICK_INTERVAL, TickOutcome};

use super::scene::refresh_status;
use super::state::AppState;

pub(super) fn update_timer_label(st: &AppState) {
    if let Some(label) = &st.timer_label {
        let text = gettext("Time Left: {} sec")
            .replace("{}", &st.game.session().time_left().to_string());
        label.set_text(&text);
    }
}

pub(super) fn update_controls(st: &AppState) {
    let session = st.game.session();
    if let Some(button) = &st.reset_button {
        button.set_label(&if session.is_won() {
            gettext("Play Again")
        } else {
            gettext("Reset")
        });
    }
    if let Some(button) = &st.pause_button {
        if session.is_paused() {
            button.set_label(&gettext("Start"));
            button.remove_css_class("pause-button");
            button.add_css_class("start-button");
        } else {
            button.set_label(&gettext("Pause"));
            button.remove_css_class("start-button");
            button.add_css_class("pause-button");
        }
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

/// (Re)starts the one-second countdown for the current game. Does nothing
/// when the session has nothing left to count.
pub(super) fn start_timer(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);
    if !st.game.session().timer_active() {
        return;
    }

    let game_id = st.game.game_id();
    let state_clone = state.clone();
    let handle = glib::timeout_add_local(TICK_INTERVAL, move || {
        let mut st = state_clone.borrow_mut();
        match st.game.tick(game_id) {
            None => glib::ControlFlow::Break,
            Some(TickOutcome::Running(_)) => {
                update_timer_label(&st);
                glib::ControlFlow::Continue
            }
            Some(TickOutcome::TimeUp) | Some(TickOutcome::Stopped) => {
                // The source is removed by returning Break.
                st.timer_handle = None;
                update_timer_label(&st);
                refresh_status(&st);
                glib::ControlFlow::Break
            }
        }
    });
    st.timer_handle = Some(handle);
}
