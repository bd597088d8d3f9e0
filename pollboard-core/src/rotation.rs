// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use pollboard_error::Result;
use pollboard_runtime::{FixedRate, Timer};

use crate::card::render_page;
use crate::config::RotationConfig;
use crate::model::CompletedPoll;
use crate::pages::PageCursor;
use crate::view::GridView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSettings {
    pub polls_per_page: usize,
    pub rotation_interval: Duration,
    pub fade_duration: Duration,
    pub render_first_page: bool,
}

impl From<&RotationConfig> for RotationSettings {
    fn from(config: &RotationConfig) -> Self {
        Self {
            polls_per_page: config.polls_per_page,
            rotation_interval: config.rotation_interval(),
            fade_duration: config.fade_duration(),
            render_first_page: config.render_first_page,
        }
    }
}

/// Cycles the completed-poll grid through fixed-size pages.
///
/// Each step fades the visible cards out, waits for the fade to finish, then
/// swaps in the next page and updates the page number. The poll list is fixed
/// for the lifetime of the controller.
pub struct RotationController<V> {
    polls: Vec<CompletedPoll>,
    cursor: PageCursor,
    settings: RotationSettings,
    view: V,
}

impl<V: GridView> RotationController<V> {
    /// Returns `None` when every poll fits on a single page, or when the page
    /// size is zero.
    pub fn new(polls: Vec<CompletedPoll>, settings: RotationSettings, view: V) -> Option<Self> {
        if settings.polls_per_page == 0 {
            warn!("Not rotating {} polls: page size is zero", polls.len());
            return None;
        }
        let cursor = PageCursor::new(polls.len(), settings.polls_per_page);
        if !cursor.needs_rotation() {
            debug!(
                "No rotation needed: {} polls fit on one page of {}",
                polls.len(),
                settings.polls_per_page
            );
            return None;
        }

        Some(Self {
            polls,
            cursor,
            settings,
            view,
        })
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.cursor.current()
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.cursor.total_pages()
    }

    #[must_use]
    pub fn poll_count(&self) -> usize {
        self.polls.len()
    }

    /// Publish the page count and, if configured, draw the first page.
    ///
    /// # Errors
    /// Propagates view failures.
    pub fn start(&self) -> Result<()> {
        self.view.set_total_pages(self.total_pages())?;
        if self.settings.render_first_page {
            let page = self.cursor.current();
            self.view
                .replace_cards(&render_page(&self.polls, self.cursor.range(page)))?;
            self.view.set_current_page(page + 1)?;
        }
        Ok(())
    }

    /// Fade out, advance one page and draw it. Returns the new 0-based page.
    ///
    /// # Errors
    /// Propagates failures from swapping the cards or the indicator. A failed
    /// fade is logged and the swap goes ahead.
    pub async fn rotate_once<T: Timer>(&mut self, timer: &T) -> Result<usize> {
        if let Err(e) = self.view.fade_out_cards() {
            warn!("Could not fade out cards: {}", e);
        }
        timer.sleep_future(self.settings.fade_duration).await;

        let page = self.cursor.advance();
        let html = render_page(&self.polls, self.cursor.range(page));
        self.view.replace_cards(&html)?;
        self.view.set_current_page(page + 1)?;
        Ok(page)
    }

    /// Rotate forever, once per rotation interval.
    pub async fn run<T: Timer>(mut self, timer: T) {
        if let Err(e) = self.start() {
            warn!("Could not prepare rotation: {}", e);
        }
        info!(
            "Rotation enabled: {} polls, {} pages",
            self.poll_count(),
            self.total_pages()
        );

        let mut ticker = FixedRate::new(timer.clone(), self.settings.rotation_interval);
        loop {
            ticker.tick().await;
            match self.rotate_once(&timer).await {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => warn!("Error rotating completed polls: {}", e),
                Err(e) => error!("Error rotating completed polls: {}", e),
            }
        }
    }
}
