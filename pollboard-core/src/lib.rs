// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Display logic for a live polling screen.
//!
//! Two independent loops drive the page:
//!
//! - [`LiveUpdater`] polls the display data endpoint and writes the active
//!   poll's vote counts and bar heights. Pushed `vote_cast` events trigger an
//!   immediate refresh, `poll_activated` reloads the page.
//! - [`RotationController`] pages through the completed polls, fading the grid
//!   out and swapping in the next page of result cards on every tick.
//!
//! Both are generic over the [`view`] traits and a [`pollboard_runtime::Timer`],
//! so they run against the DOM in the browser and against fakes under tokio.

#![allow(clippy::multiple_crate_versions)]

#[macro_use]
#[allow(unused_macros)]
mod logging;

pub mod card;
pub mod config;
pub mod date;
pub mod live_updater;
pub mod model;
pub mod pages;
pub mod push;
pub mod rotation;
pub mod tally;
pub mod view;

pub use config::{DisplayConfig, LiveConfig, PushConfig, RotationConfig};
pub use live_updater::LiveUpdater;
pub use model::{ActivePoll, Answer, CompletedPoll, DisplayData, PollRecord};
pub use pages::PageCursor;
pub use push::PushEvent;
pub use rotation::{RotationController, RotationSettings};
pub use tally::Tally;
pub use view::{CountsView, DisplayDataSource, GridView, Reloader};
