// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pollboard_core::{Answer, CountsView, GridView, LiveConfig, Reloader, RotationConfig};
use pollboard_error::{PollboardError, Result, ResultExt};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// Render a thrown JS value as text for error messages
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// Lifts a thrown JS value into a [`PollboardError`] with context
pub trait JsResultExt<T> {
    /// A failed DOM call, as `DomError` prefixed with the operation name
    ///
    /// # Errors
    /// Returns `DomError` when `self` holds a thrown value.
    fn dom_context(self, operation: &str) -> Result<T>;

    /// A failed request step, as `FetchError` with lazily built context
    ///
    /// # Errors
    /// Returns `FetchError` when `self` holds a thrown value.
    fn fetch_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn dom_context(self, operation: &str) -> Result<T> {
        self.map_err(|e| PollboardError::dom_error(describe_js(&e)))
            .context(operation)
    }

    fn fetch_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| PollboardError::fetch_error(describe_js(&e)))
            .with_context(f)
    }
}

fn required_element(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PollboardError::missing_element(id))
}

/// Count and bar elements of the live display, looked up on every write.
///
/// The page may re-render around the client, so nothing is cached. Elements
/// that are absent are skipped.
pub struct DomCountsView {
    document: Document,
    count_ids: [String; 2],
    bar_ids: [String; 2],
}

impl DomCountsView {
    pub fn new(document: Document, config: &LiveConfig) -> Self {
        Self {
            document,
            count_ids: [config.count_a_id.clone(), config.count_b_id.clone()],
            bar_ids: [config.bar_a_id.clone(), config.bar_b_id.clone()],
        }
    }

    const fn slot(answer: Answer) -> usize {
        match answer {
            Answer::A => 0,
            Answer::B => 1,
        }
    }
}

impl CountsView for DomCountsView {
    fn set_count(&self, answer: Answer, count: u64) -> Result<()> {
        if let Some(element) = self.document.get_element_by_id(&self.count_ids[Self::slot(answer)]) {
            element.set_text_content(Some(&count.to_string()));
        }
        Ok(())
    }

    fn set_bar_height(&self, answer: Answer, height: &str) -> Result<()> {
        let id = &self.bar_ids[Self::slot(answer)];
        let Some(element) = self.document.get_element_by_id(id) else {
            return Ok(());
        };
        let bar = element
            .dyn_into::<HtmlElement>()
            .map_err(|_| PollboardError::dom_error(format!("{id} is not an HTML element")))?;
        bar.style()
            .set_property("height", height)
            .dom_context("style.height")
    }
}

/// The completed-poll grid. Construction fails unless the grid container and
/// the current-page indicator are both on the page.
pub struct DomGridView {
    grid: Element,
    current_page: Element,
    total_pages: Option<Element>,
    card_selector: String,
    fade_out_class: String,
}

impl DomGridView {
    /// # Errors
    /// Returns `MissingElement` naming the first required element not found.
    pub fn new(document: &Document, config: &RotationConfig) -> Result<Self> {
        Ok(Self {
            grid: required_element(document, &config.grid_container_id)?,
            current_page: required_element(document, &config.current_page_id)?,
            total_pages: document.get_element_by_id(&config.total_pages_id),
            card_selector: config.card_selector.clone(),
            fade_out_class: config.fade_out_class.clone(),
        })
    }
}

impl GridView for DomGridView {
    fn fade_out_cards(&self) -> Result<()> {
        let cards = self
            .grid
            .query_selector_all(&self.card_selector)
            .dom_context("querySelectorAll")?;

        for index in 0..cards.length() {
            let Some(card) = cards.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            card.class_list()
                .add_1(&self.fade_out_class)
                .dom_context("classList.add")?;
        }
        Ok(())
    }

    fn replace_cards(&self, html: &str) -> Result<()> {
        self.grid.set_inner_html(html);
        Ok(())
    }

    fn set_current_page(&self, page_number: usize) -> Result<()> {
        self.current_page
            .set_text_content(Some(&page_number.to_string()));
        Ok(())
    }

    fn set_total_pages(&self, total: usize) -> Result<()> {
        if let Some(element) = &self.total_pages {
            element.set_text_content(Some(&total.to_string()));
        }
        Ok(())
    }
}

pub struct LocationReloader {
    window: Window,
}

impl LocationReloader {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Reloader for LocationReloader {
    fn reload(&self) -> Result<()> {
        self.window
            .location()
            .reload()
            .dom_context("location.reload")
    }
}
