// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use pollboard_core::{Answer, CountsView, DisplayData, DisplayDataSource, GridView, Reloader};
use pollboard_error::{PollboardError, Result};

/// Data source that replays scripted responses in order.
///
/// The last `Ok` response is repeated once the script runs out; with no
/// successful response at all, fetches fail.
#[derive(Default)]
pub struct ScriptedSource {
    responses: RefCell<VecDeque<Result<DisplayData>>>,
    last_ok: RefCell<Option<DisplayData>>,
    fetches: Cell<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(data: DisplayData) -> Self {
        let source = Self::new();
        source.push_ok(data);
        source
    }

    pub fn push_ok(&self, data: DisplayData) {
        self.responses.borrow_mut().push_back(Ok(data));
    }

    pub fn push_err(&self, error: PollboardError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl DisplayDataSource for ScriptedSource {
    async fn fetch_display_data(&self) -> Result<DisplayData> {
        self.fetches.set(self.fetches.get() + 1);
        let next = self.responses.borrow_mut().pop_front();
        match next {
            Some(Ok(data)) => {
                *self.last_ok.borrow_mut() = Some(data.clone());
                Ok(data)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last_ok
                .borrow()
                .clone()
                .ok_or_else(|| PollboardError::fetch_error("no scripted response")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountsWrite {
    Count(Answer, u64),
    BarHeight(Answer, String),
}

#[derive(Default)]
pub struct RecordingCountsView {
    writes: RefCell<Vec<CountsWrite>>,
    fail: Cell<bool>,
}

impl RecordingCountsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a DOM error
    pub fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn writes(&self) -> Vec<CountsWrite> {
        self.writes.borrow().clone()
    }

    pub fn count(&self, answer: Answer) -> Option<u64> {
        self.writes.borrow().iter().rev().find_map(|write| match write {
            CountsWrite::Count(a, value) if *a == answer => Some(*value),
            _ => None,
        })
    }

    pub fn bar_height(&self, answer: Answer) -> Option<String> {
        self.writes.borrow().iter().rev().find_map(|write| match write {
            CountsWrite::BarHeight(a, value) if *a == answer => Some(value.clone()),
            _ => None,
        })
    }

    fn record(&self, write: CountsWrite) -> Result<()> {
        if self.fail.get() {
            return Err(PollboardError::dom_error("counts view is detached"));
        }
        self.writes.borrow_mut().push(write);
        Ok(())
    }
}

impl CountsView for RecordingCountsView {
    fn set_count(&self, answer: Answer, count: u64) -> Result<()> {
        self.record(CountsWrite::Count(answer, count))
    }

    fn set_bar_height(&self, answer: Answer, height: &str) -> Result<()> {
        self.record(CountsWrite::BarHeight(answer, height.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCall {
    FadeOut,
    Replace(String),
    CurrentPage(usize),
    TotalPages(usize),
}

#[derive(Default)]
pub struct RecordingGridView {
    calls: RefCell<Vec<GridCall>>,
    fail_fade: Cell<bool>,
    fail_replace: Cell<bool>,
}

impl RecordingGridView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_fade(&self, fail: bool) {
        self.fail_fade.set(fail);
    }

    pub fn fail_replace(&self, fail: bool) {
        self.fail_replace.set(fail);
    }

    pub fn calls(&self) -> Vec<GridCall> {
        self.calls.borrow().clone()
    }

    /// Every 1-based page number written to the indicator, in order
    pub fn pages_shown(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GridCall::CurrentPage(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn last_html(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            GridCall::Replace(html) => Some(html.clone()),
            _ => None,
        })
    }

    pub fn fade_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == GridCall::FadeOut)
            .count()
    }
}

impl GridView for RecordingGridView {
    fn fade_out_cards(&self) -> Result<()> {
        if self.fail_fade.get() {
            return Err(PollboardError::dom_error("classList.add"));
        }
        self.calls.borrow_mut().push(GridCall::FadeOut);
        Ok(())
    }

    fn replace_cards(&self, html: &str) -> Result<()> {
        if self.fail_replace.get() {
            return Err(PollboardError::dom_error("innerHTML"));
        }
        self.calls
            .borrow_mut()
            .push(GridCall::Replace(html.to_string()));
        Ok(())
    }

    fn set_current_page(&self, page_number: usize) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(GridCall::CurrentPage(page_number));
        Ok(())
    }

    fn set_total_pages(&self, total: usize) -> Result<()> {
        self.calls.borrow_mut().push(GridCall::TotalPages(total));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReloader {
    reloads: Cell<usize>,
}

impl RecordingReloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.get()
    }
}

impl Reloader for RecordingReloader {
    fn reload(&self) -> Result<()> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }
}
