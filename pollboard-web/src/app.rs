// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use pollboard_core::{
    CompletedPoll, DisplayConfig, LiveUpdater, PageCursor, RotationController, RotationSettings,
};
use pollboard_error::{PollboardError, Result};
use pollboard_runtime::impls::wasm::WasmTimer;
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::dom::{DomCountsView, DomGridView, LocationReloader};
use crate::fetch::FetchDataSource;
use crate::push::{self, PushBridge, PushListeners};

pub type DomLiveUpdater = LiveUpdater<FetchDataSource, DomCountsView>;

/// A running display loop, returned to the host page.
///
/// `stop()` ends the loop and removes its push listeners. Freeing the handle
/// (`handle.free()` in JavaScript, or dropping it in Rust) does the same, so a
/// host page must keep the handle for as long as the display should run.
#[wasm_bindgen]
pub struct DisplayHandle {
    abort: AbortHandle,
    listeners: Option<PushListeners>,
    bridge_id: Option<u32>,
}

#[wasm_bindgen]
impl DisplayHandle {
    /// Stop the loop and detach any push listeners.
    pub fn stop(&mut self) {
        self.abort.abort();
        if let Some(mut listeners) = self.listeners.take() {
            listeners.detach();
        }
        if let Some(id) = self.bridge_id.take() {
            push::unregister(id);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        !self.abort.is_aborted()
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_abortable<F>(task: F) -> AbortHandle
where
    F: std::future::Future<Output = ()> + 'static,
{
    let (abort, registration) = AbortHandle::new_pair();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = Abortable::new(task, registration).await;
    });
    abort
}

pub(crate) fn browser() -> Result<(Window, Document)> {
    let window = web_sys::window().ok_or_else(|| PollboardError::dom_error("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| PollboardError::dom_error("No document object"))?;
    Ok((window, document))
}

/// Start the active-poll refresh loop and the push bridge.
///
/// # Errors
/// Fails on an invalid configuration or when the push listeners cannot be
/// attached.
pub fn start_live(config: &DisplayConfig) -> Result<DisplayHandle> {
    let (window, document) = browser()?;

    let source = FetchDataSource::new(window.clone(), config.live.endpoint.clone());
    let view = DomCountsView::new(document, &config.live);
    let updater: Rc<DomLiveUpdater> = Rc::new(LiveUpdater::new(source, view, &config.live));

    let bridge = Rc::new(PushBridge::new(
        Rc::clone(&updater),
        config.push.clone(),
        LocationReloader::new(window.clone()),
    ));
    let listeners = PushListeners::attach(&window, &bridge)?;
    let bridge_id = push::register(bridge);

    let abort = spawn_abortable(async move {
        updater.run(WasmTimer).await;
    });

    info!(
        "Live display started: polling {} every {:?}",
        config.live.endpoint,
        config.live.refresh_interval()
    );
    Ok(DisplayHandle {
        abort,
        listeners: Some(listeners),
        bridge_id: Some(bridge_id),
    })
}

/// Start rotating the completed-poll grid.
///
/// Returns `None` when the polls fit on one page or the grid elements are not
/// on the page; the latter is logged.
pub fn start_rotation(
    polls: Vec<CompletedPoll>,
    config: &DisplayConfig,
) -> Result<Option<DisplayHandle>> {
    if !PageCursor::new(polls.len(), config.rotation.polls_per_page).needs_rotation() {
        debug!("{} completed polls fit on one page, not rotating", polls.len());
        return Ok(None);
    }

    let (_, document) = browser()?;
    let view = match DomGridView::new(&document, &config.rotation) {
        Ok(view) => view,
        Err(e) => {
            error!("Required DOM elements not found for rotation: {}", e);
            return Ok(None);
        }
    };

    let Some(controller) =
        RotationController::new(polls, RotationSettings::from(&config.rotation), view)
    else {
        return Ok(None);
    };

    let abort = spawn_abortable(controller.run(WasmTimer));
    Ok(Some(DisplayHandle {
        abort,
        listeners: None,
        bridge_id: None,
    }))
}

/// Read the completed-poll JSON embedded in the page
///
/// # Errors
/// `MissingElement` when the data element is absent, `DecodeError` when its
/// text is not a poll list.
pub fn embedded_polls(config: &DisplayConfig) -> Result<Vec<CompletedPoll>> {
    let (_, document) = browser()?;
    let id = &config.rotation.polls_data_id;
    let text = document
        .get_element_by_id(id)
        .ok_or_else(|| PollboardError::missing_element(id.as_str()))?
        .text_content()
        .unwrap_or_default();
    CompletedPoll::list_from_json(&text)
}
