//! # client
//!
//! Leptos + WASM frontend for the exam-prep app's session handling.
//!
//! Pages, route guards and the layout shell sit on top of the `session`
//! crate. This crate only supplies the browser side of its seams:
//! `localStorage` for persistence, `gloo-net` for HTTP, and a signal-driven
//! navigator that hands forced navigation to the router.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: mount `App` into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
