mod api;
mod app;
mod auth;
mod components;
mod config;
mod error;
mod format;
mod forms;
mod pages;
mod routes;
mod session;
mod state;
mod storage;
mod visa;

use leptos::prelude::*;

use app::App;
use config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    _ = console_log::init_with_level(config.log_level());
    log::info!(
        "VisaFlow starting, API at {}",
        if config.api_base_url.is_empty() { "same origin" } else { config.api_base_url.as_str() }
    );

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
