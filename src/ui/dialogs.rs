use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some(gettext("Instructions").as_str()),
        Some(
            gettext(
                "Flip two cards at a time and find every matching pair.\n\
Pick a grid size from 2 to 10; bigger boards get more time.\n\
Clear the board before the countdown reaches zero.",
            )
            .as_str(),
        ),
    );
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name(gettext("Memory Game"))
        .application_icon(super::APP_ID)
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Find every pair before the time runs out."))
        .build();
    dialog.add_legal_section(
        &gettext("Memory Game"),
        None,
        gtk::License::MitX11,
        None,
    );
    dialog.present(app.active_window().as_ref());
    dialog
}
