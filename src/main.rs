use log::info;

mod app;
mod config;
mod counter;
mod dom;
mod error;
mod frame;
mod loader;
mod menu;
mod observer;
mod reveal;
mod router;
mod effects {
    pub mod nav_scroll;
    pub mod parallax;
    pub mod particles;
    pub mod ripple;
    pub mod text_reveal;
    pub mod tilt;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site script");
    app::start();
}
