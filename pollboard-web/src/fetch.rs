// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use pollboard_core::{DisplayData, DisplayDataSource};
use pollboard_error::{PollboardError, Result, ResultExt};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::dom::JsResultExt;

/// `GET` of the display data endpoint through `window.fetch`
pub struct FetchDataSource {
    window: Window,
    endpoint: String,
}

impl FetchDataSource {
    pub fn new(window: Window, endpoint: impl Into<String>) -> Self {
        Self {
            window,
            endpoint: endpoint.into(),
        }
    }

    fn step(&self, what: &str) -> String {
        format!("{} {what}", self.endpoint)
    }
}

#[async_trait(?Send)]
impl DisplayDataSource for FetchDataSource {
    async fn fetch_display_data(&self) -> Result<DisplayData> {
        let response = JsFuture::from(self.window.fetch_with_str(&self.endpoint))
            .await
            .fetch_context(|| self.step("request failed"))?
            .dyn_into::<Response>()
            .fetch_context(|| self.step("returned a non-response"))?;

        if !response.ok() {
            let status = PollboardError::fetch_error(format!("HTTP {}", response.status()));
            return Err(status).with_context(|| self.step("returned"));
        }

        let body = response
            .text()
            .fetch_context(|| self.step("body unavailable"))?;
        let body = JsFuture::from(body)
            .await
            .fetch_context(|| self.step("body read failed"))?
            .as_string()
            .ok_or_else(|| PollboardError::decode_error("response body is not text"))
            .with_context(|| self.endpoint.clone())?;

        DisplayData::from_json(&body).with_context(|| self.endpoint.clone())
    }
}
