// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Browser entry points for the Pollboard display pages.
//!
//! The live page calls `start_live_display()` once; the completed-polls page
//! calls `start_completed_rotation(json)` or, when the poll list is embedded in
//! a `<script type="application/json" id="completed-polls">` element,
//! `start_completed_rotation_from_page()`. A socket client forwards its events
//! with `dispatch_push_event(name, payload)` or by dispatching `CustomEvent`s
//! on `window`.

use pollboard_core::{CompletedPoll, DisplayConfig};
use pollboard_error::PollboardError;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod console;
pub mod dom;
pub mod fetch;
pub mod push;

pub use app::DisplayHandle;

fn to_js(error: PollboardError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn load_config(config_toml: Option<String>) -> Result<DisplayConfig, JsValue> {
    DisplayConfig::from_overrides(config_toml.as_deref()).map_err(to_js)
}

/// Entry point called from JavaScript
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init_logging();

    tracing::info!("Pollboard display client loaded");

    Ok(())
}

/// Start polling the active poll's counts and listening for push events
#[wasm_bindgen]
pub fn start_live_display(config_toml: Option<String>) -> Result<DisplayHandle, JsValue> {
    let config = load_config(config_toml)?;
    app::start_live(&config).map_err(to_js)
}

/// Start rotating the completed polls given as a JSON array
#[wasm_bindgen]
pub fn start_completed_rotation(
    polls_json: &str,
    config_toml: Option<String>,
) -> Result<Option<DisplayHandle>, JsValue> {
    let config = load_config(config_toml)?;
    let polls = CompletedPoll::list_from_json(polls_json).map_err(to_js)?;
    app::start_rotation(polls, &config).map_err(to_js)
}

/// Start rotating the completed polls embedded in the page
#[wasm_bindgen]
pub fn start_completed_rotation_from_page(
    config_toml: Option<String>,
) -> Result<Option<DisplayHandle>, JsValue> {
    let config = load_config(config_toml)?;
    let polls = app::embedded_polls(&config).map_err(to_js)?;
    app::start_rotation(polls, &config).map_err(to_js)
}

/// Forward a push event from the socket client. Returns whether any running
/// live display accepted it.
#[wasm_bindgen]
pub fn dispatch_push_event(name: &str, payload_json: Option<String>) -> bool {
    push::dispatch(name, payload_json.as_deref())
}
