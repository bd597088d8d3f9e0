// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the Pollboard workspace.
//!
//! - [`fixtures`] builds poll records and display payloads
//! - [`fakes`] provides in-memory implementations of the view and source traits
//!   that record every call, so tests can assert on what the page would show
//!
//! The fakes are single-threaded (`RefCell`/`Cell`), matching the browser.
//! Share them with the code under test through `Rc`.

pub mod fakes;
pub mod fixtures;

pub use fakes::{
    CountsWrite, GridCall, RecordingCountsView, RecordingGridView, RecordingReloader,
    ScriptedSource,
};
