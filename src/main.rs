use gettextrs::{LocaleCategory, setlocale, textdomain};

const GETTEXT_DOMAIN: &str = "memory-game";

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = textdomain(GETTEXT_DOMAIN) {
        log::warn!("could not set text domain {GETTEXT_DOMAIN}: {err}");
    }

    memory_game::ui::run()
}
