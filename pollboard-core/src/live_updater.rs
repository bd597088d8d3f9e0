// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use pollboard_error::Result;
use pollboard_runtime::{FixedRate, Timer};

use crate::config::LiveConfig;
use crate::model::Answer;
use crate::push::PushEvent;
use crate::tally::{css_percent, Tally};
use crate::view::{CountsView, DisplayDataSource, Reloader};

/// Keeps the active poll's counts on screen.
///
/// Refreshes on a fixed-rate timer and on demand when a vote is pushed. A
/// failed refresh is logged and skipped; the next tick tries again.
pub struct LiveUpdater<S, V> {
    source: S,
    view: V,
    refresh_interval: Duration,
}

impl<S, V> LiveUpdater<S, V>
where
    S: DisplayDataSource,
    V: CountsView,
{
    pub fn new(source: S, view: V, config: &LiveConfig) -> Self {
        Self {
            source,
            view,
            refresh_interval: config.refresh_interval(),
        }
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Fetch the current counts and write them to the view.
    ///
    /// Returns the tally shown, or `None` when no poll is active.
    ///
    /// # Errors
    /// Propagates fetch, decode and view failures.
    pub async fn refresh(&self) -> Result<Option<Tally>> {
        let data = self.source.fetch_display_data().await?;
        let Some(poll) = data.poll else {
            return Ok(None);
        };

        let tally = poll.tally();
        self.show(&tally)?;
        Ok(Some(tally))
    }

    /// [`refresh`](Self::refresh), logging instead of returning the error
    pub async fn refresh_logged(&self) -> Option<Tally> {
        match self.refresh().await {
            Ok(tally) => tally,
            Err(e) if e.is_recoverable() => {
                warn!("Error updating display: {}", e);
                None
            }
            Err(e) => {
                error!("Error updating display: {}", e);
                None
            }
        }
    }

    fn show(&self, tally: &Tally) -> Result<()> {
        for answer in [Answer::A, Answer::B] {
            self.view.set_count(answer, tally.count(answer))?;
        }
        for answer in [Answer::A, Answer::B] {
            self.view
                .set_bar_height(answer, &css_percent(tally.percent(answer)))?;
        }
        Ok(())
    }

    /// React to a push notification.
    ///
    /// A cast vote refreshes immediately. An activated poll reloads the page so
    /// the new question is rendered.
    ///
    /// # Errors
    /// Returns the reloader's error; refresh failures are only logged.
    pub async fn handle_push<R: Reloader + ?Sized>(
        &self,
        event: PushEvent,
        reloader: &R,
    ) -> Result<()> {
        match event {
            PushEvent::Connected => {
                info!("Connected to server");
            }
            PushEvent::VoteCast { .. } => {
                info!("Push received: {}", event);
                self.refresh_logged().await;
            }
            PushEvent::PollActivated { .. } => {
                info!("Push received: {}", event);
                reloader.reload()?;
            }
        }
        Ok(())
    }

    /// Refresh forever, once per refresh interval.
    pub async fn run<T: Timer>(&self, timer: T) {
        let mut ticker = FixedRate::new(timer, self.refresh_interval);
        loop {
            ticker.tick().await;
            self.refresh_logged().await;
        }
    }
}
