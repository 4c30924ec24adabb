use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use crate::game::{ClickOutcome, Settings, MAX_GRID_SIZE, MIN_GRID_SIZE};

use super::APP_ID;
use super::board::{sync_card_button, CONTENT_MARGIN};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{start_timer, stop_timer, update_timer_label};
use super::scene::{rebuild_board, refresh_status, refresh_view};
use super::state::AppState;

const STYLE_CSS: &str = include_str!("../../data/style.css");

#[derive(Clone, Copy, Default)]
struct OverlayPauseState {
    paused: bool,
    game_id: u64,
}

/// Pauses a running countdown while a dialog covers the board.
fn pause_game_for_overlay(state: &Rc<RefCell<AppState>>) -> OverlayPauseState {
    let (running, game_id) = {
        let st = state.borrow();
        (st.game.session().timer_active(), st.game.game_id())
    };
    if !running {
        return OverlayPauseState::default();
    }
    toggle_pause(state);
    OverlayPauseState {
        paused: true,
        game_id,
    }
}

fn resume_game_after_overlay(state: &Rc<RefCell<AppState>>, pause_state: OverlayPauseState) {
    if !pause_state.paused {
        return;
    }
    let should_resume = {
        let st = state.borrow();
        st.game.game_id() == pause_state.game_id && st.game.session().is_paused()
    };
    if should_resume {
        toggle_pause(state);
    }
}

fn toggle_pause(state: &Rc<RefCell<AppState>>) {
    let paused = {
        let mut st = state.borrow_mut();
        let paused = st.game.toggle_pause();
        if paused {
            stop_timer(&mut st);
        }
        refresh_status(&st);
        paused
    };
    if !paused {
        start_timer(state);
    }
}

/// Redraws everything for a freshly dealt session and starts its clock.
fn show_new_session(state: &Rc<RefCell<AppState>>) {
    rebuild_board(state);
    {
        let st = state.borrow();
        refresh_view(&st);
    }
    start_timer(state);
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        st.cancel_mismatch();
        st.game.reset();
    }
    show_new_session(state);
}

fn apply_grid_size_input(state: &Rc<RefCell<AppState>>, raw: &str) {
    let changed = {
        let mut st = state.borrow_mut();
        let changed = st.game.apply_grid_size_input(raw);
        if changed {
            stop_timer(&mut st);
            st.cancel_mismatch();
        }
        changed
    };
    if changed {
        show_new_session(state);
    }
}

fn schedule_mismatch_reset(state: &Rc<RefCell<AppState>>, st: &mut AppState, indices: [usize; 2]) {
    st.cancel_mismatch();
    let game_id = st.game.game_id();
    let state_clone = state.clone();
    let handle = glib::timeout_add_local_once(st.game.mismatch_delay(), move || {
        let mut st = state_clone.borrow_mut();
        if st.game.game_id() == game_id {
            st.mismatch_handle = None;
        }
        if !st.game.resolve_mismatch(game_id) {
            return;
        }
        for idx in indices {
            if let Some(button) = st.card_buttons.get(idx) {
                sync_card_button(button, st.game.session().face(idx));
            }
        }
    });
    st.mismatch_handle = Some(handle);
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();

    match st.game.click(index) {
        ClickOutcome::Ignored => {}
        ClickOutcome::Flipped(id) | ClickOutcome::Unflipped(id) => {
            if let Some(button) = st.card_buttons.get(id) {
                sync_card_button(button, st.game.session().face(id));
            }
        }
        ClickOutcome::Matched { first, second, won } => {
            if won {
                stop_timer(&mut st);
                refresh_view(&st);
                return;
            }
            for idx in [first, second] {
                if let Some(button) = st.card_buttons.get(idx) {
                    sync_card_button(button, st.game.session().face(idx));
                }
            }
        }
        ClickOutcome::Mismatched { first, second } => {
            for idx in [first, second] {
                if let Some(button) = st.card_buttons.get(idx) {
                    sync_card_button(button, st.game.session().face(idx));
                }
            }
            schedule_mismatch_reset(state, &mut st, [first, second]);
        }
    }
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| {
        if let Some(win) = app.active_window() {
            win.present();
            return;
        }
        load_css();

        let settings_path = Settings::path_in(&glib::user_config_dir());
        let settings = Settings::load_or_default(&settings_path);
        let state = Rc::new(RefCell::new(AppState::new(&settings)));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            let state = state.clone();
            move |_, _| {
                let pause_state = pause_game_for_overlay(&state);
                let dialog = show_instructions_dialog(&app);
                let state_resume = state.clone();
                dialog.connect_response(None, move |_, _| {
                    resume_game_after_overlay(&state_resume, pause_state);
                });
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            let state = state.clone();
            move |_, _| {
                let pause_state = pause_game_for_overlay(&state);
                let dialog = show_about_dialog(&app);
                let state_resume = state.clone();
                dialog.connect_closed(move |_| {
                    resume_game_after_overlay(&state_resume, pause_state);
                });
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }
        state.borrow_mut().dynamic_css_provider = Some(dynamic_css_provider);

        let title = gtk::Label::new(None);
        title.set_markup(&format!("<b>{}</b>", gettext("Memory Game")));
        title.set_halign(gtk::Align::Center);

        let header = adw::HeaderBar::builder()
            .title_widget(&title)
            .build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let menu_model = gio::Menu::new();
        menu_model.append(Some(gettext("Instructions").as_str()), Some("app.instructions"));
        menu_model.append(Some(gettext("About Memory Game").as_str()), Some("app.about"));
        menu_model.append(Some(gettext("Quit").as_str()), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();
        header.pack_end(&menu_button);

        let game_view = build_game_view(&state);

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&game_view));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title(gettext("Memory Game"))
            .default_width(640)
            .default_height(760)
            .content(&toolbar)
            .build();
        win.set_size_request(420, 600);
        win.add_css_class("app-window");

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            let app = app.clone();
            move |_, key, _, mods| {
                if mods.contains(gdk::ModifierType::CONTROL_MASK) {
                    if matches!(key, gdk::Key::r | gdk::Key::R) {
                        restart_game(&state);
                        return glib::Propagation::Stop;
                    }
                    return glib::Propagation::Proceed;
                }
                match key {
                    gdk::Key::space | gdk::Key::p | gdk::Key::P => {
                        toggle_pause(&state);
                        glib::Propagation::Stop
                    }
                    gdk::Key::F1 => {
                        app.activate_action("instructions", None);
                        glib::Propagation::Stop
                    }
                    _ => glib::Propagation::Proceed,
                }
            }
        });
        win.add_controller(global_key);

        show_new_session(&state);
        win.present();
    });

    app.run()
}

fn load_css() {
    let Some(display) = gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let heading = gtk::Label::new(Some(gettext("Memory Game").as_str()));
    heading.add_css_class("title-1");

    let timer_label = gtk::Label::new(None);
    timer_label.add_css_class("timer-label");
    timer_label.add_css_class("title-3");

    let size_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    size_row.set_halign(gtk::Align::Center);
    let size_text = gettext("Grid Size ({}-{}):")
        .replacen("{}", &MIN_GRID_SIZE.to_string(), 1)
        .replacen("{}", &MAX_GRID_SIZE.to_string(), 1);
    let size_label = gtk::Label::new(Some(size_text.as_str()));
    let size_spin = gtk::SpinButton::with_range(MIN_GRID_SIZE as f64, MAX_GRID_SIZE as f64, 1.0);
    size_spin.set_digits(0);
    size_spin.set_update_policy(gtk::SpinButtonUpdatePolicy::IfValid);
    size_spin.set_value(state.borrow().game.grid_size().get() as f64);
    size_spin.connect_changed({
        let state = state.clone();
        move |spin| {
            apply_grid_size_input(&state, &spin.text());
        }
    });
    size_row.append(&size_label);
    size_row.append(&size_spin);

    let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_container.set_halign(gtk::Align::Fill);
    board_container.set_valign(gtk::Align::Fill);
    board_container.set_hexpand(true);
    board_container.set_vexpand(true);
    board_container.add_css_class("memory-board-container");

    let won_banner = gtk::Label::new(Some(gettext("You Won!").as_str()));
    won_banner.add_css_class("won-banner");
    won_banner.add_css_class("title-1");
    won_banner.set_visible(false);

    let time_up_banner = gtk::Label::new(Some(gettext("Time's up!").as_str()));
    time_up_banner.add_css_class("time-up-banner");
    time_up_banner.add_css_class("title-2");
    time_up_banner.set_visible(false);

    let controls = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    controls.set_halign(gtk::Align::Center);

    let reset_button = gtk::Button::with_label(&gettext("Reset"));
    reset_button.add_css_class("reset-button");
    reset_button.add_css_class("pill");
    reset_button.connect_clicked({
        let state = state.clone();
        move |_| restart_game(&state)
    });

    let pause_button = gtk::Button::with_label(&gettext("Pause"));
    pause_button.add_css_class("pause-button");
    pause_button.add_css_class("pill");
    pause_button.connect_clicked({
        let state = state.clone();
        move |_| toggle_pause(&state)
    });

    controls.append(&reset_button);
    controls.append(&pause_button);

    root.append(&heading);
    root.append(&timer_label);
    root.append(&size_row);
    root.append(&board_container);
    root.append(&won_banner);
    root.append(&time_up_banner);
    root.append(&controls);

    {
        let mut st = state.borrow_mut();
        st.timer_label = Some(timer_label);
        st.board_container = Some(board_container);
        st.won_banner = Some(won_banner);
        st.time_up_banner = Some(time_up_banner);
        st.reset_button = Some(reset_button);
        st.pause_button = Some(pause_button);
        update_timer_label(&st);
    }

    root
}
