mod api;
mod app;
mod components;
mod config;
mod dashboard;
mod drafts;
mod models;
mod pages;
mod state;
mod storage;
mod telemetry;
mod util;

use crate::app::App;
use crate::config::AppConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    telemetry::init_logging(&config.log_level);
    if config.api_base_url.is_none() {
        tracing::warn!("no API base URL configured; every request will fail");
    }

    mount_to_body(move || view! { <App config=config /> });
}
