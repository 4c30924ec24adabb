use std::rc::Rc;
use std::cell::RefCell;
use gtk4 as gtk;
use gtk4::prelude::*;
use gtk4::pango;
use crate::game::CardFace;
use super::state::AppState;
use super::app::handle_card_click;

pub const CONTENT_MARGIN: i32 = 12;
pub const CARD_GAP: i32 = 8;
const CARD_MIN_EDGE: i32 = 30;

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("memory-board");
    grid.set_row_spacing(CARD_GAP as u32);
    grid.set_column_spacing(CARD_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let (css_provider, side, card_count) = {
        let st = state.borrow();
        let session = st.game.session();
        (
            st.dynamic_css_provider.clone(),
            session.size().get() as i32,
            session.cards().len(),
        )
    };
    grid.set_size_request(
        side * CARD_MIN_EDGE + (side - 1) * CARD_GAP,
        side * CARD_MIN_EDGE + (side - 1) * CARD_GAP,
    );

    let update_styles = {
        let css_provider = css_provider.clone();
        move |grid: &gtk::Grid| {
            let width = grid.width();
            let height = grid.height();
            if width > 0 && height > 0 {
                let cell_width = (width - (side - 1) * CARD_GAP) / side;
                let cell_height = (height - (side - 1) * CARD_GAP) / side;
                let min_dim = cell_width.min(cell_height);

                let card_radius = (min_dim as f64 * 0.14) as i32;

                if let Some(provider) = &css_provider {
                    provider.load_from_data(&format!(
                        ".memory-card {{ border-radius: {card_radius}px; }}"
                    ));
                }
            }
        }
    };

    let update_styles_clone = update_styles.clone();
    grid.connect_closure(
        "notify::width",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles_clone(&grid);
        }),
    );
    grid.connect_closure(
        "notify::height",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles(&grid);
        }),
    );

    let mut buttons = Vec::with_capacity(card_count);

    for index in 0..card_count {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["memory-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        drawing_area.add_css_class("memory-card-label");

        let state_draw = state.clone();
        drawing_area.set_draw_func(move |area, cr, width, height| {
            let st = state_draw.borrow();
            let number = st.game.session().visible_number(index);
            let text = match number {
                Some(number) => number.to_string(),
                None => "?".to_string(),
            };

            let min_dim = width.min(height) as f64;
            let font_size = if text.len() > 1 {
                min_dim * 0.32
            } else {
                min_dim * 0.40
            };

            cr.set_antialias(cairo::Antialias::Best);

            let layout = pangocairo::functions::create_layout(cr);
            let mut font_desc = pango::FontDescription::new();
            font_desc.set_family("Cantarell, Noto Sans, sans");
            font_desc.set_weight(pango::Weight::Bold);
            font_desc.set_size((font_size * pango::SCALE as f64) as i32);
            layout.set_font_description(Some(&font_desc));
            layout.set_text(&text);

            let fg = area.style_context().color();
            cr.set_source_rgba(
                fg.red() as f64,
                fg.green() as f64,
                fg.blue() as f64,
                fg.alpha() as f64,
            );

            let (text_width, text_height) = layout.pixel_size();
            cr.move_to(
                (width as f64 - text_width as f64) / 2.0,
                (height as f64 - text_height as f64) / 2.0,
            );

            pangocairo::functions::show_layout(cr, &layout);
        });

        button.set_child(Some(&drawing_area));
        sync_card_button(&button, state.borrow().game.session().face(index));

        let state_clone = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_clone, index);
        });

        aspect_frame.set_child(Some(&button));

        let x = index as i32 % side;
        let y = index as i32 / side;
        grid.attach(&aspect_frame, x, y, 1, 1);
        buttons.push(button);
    }

    state.borrow_mut().card_buttons = buttons;

    grid
}

/// Applies the colour class for `face` and repaints the card.
pub fn sync_card_button(button: &gtk::Button, face: CardFace) {
    button.remove_css_class("flipped");
    button.remove_css_class("solved");
    match face {
        CardFace::Solved => button.add_css_class("solved"),
        CardFace::Flipped => button.add_css_class("flipped"),
        CardFace::Hidden => (),
    }
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}

pub fn sync_all_cards(st: &AppState) {
    let session = st.game.session();
    for (index, button) in st.card_buttons.iter().enumerate() {
        sync_card_button(button, session.face(index));
    }
}
