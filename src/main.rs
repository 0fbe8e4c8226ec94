//! Admin Console Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod models;
mod session;
mod store;

use app::App;
use leptos::prelude::*;
use rolling_logger::{LoggerConfig, Sink};
use tracing::Level;

const LOG_CAPACITY: usize = 500;

/// Mirror every log line to the browser console
fn console_sink() -> Sink {
    Box::new(|level: &Level, line: &str| {
        let line = wasm_bindgen::JsValue::from_str(line);
        if *level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if *level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else {
            web_sys::console::log_1(&line);
        }
    })
}

fn main() {
    console_error_panic_hook::set_once();

    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    let logger = LoggerConfig::new("admin-console")
        .with_capacity(LOG_CAPACITY)
        .with_max_level(max_level);
    if let Err(error) = rolling_logger::init_logger(logger, Some(console_sink())) {
        web_sys::console::warn_1(&format!("logger unavailable: {error}").into());
    }

    mount_to_body(App);
}
