// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Seams between the display loops and the page they drive.
//!
//! The browser crate implements these over the DOM and `fetch`; tests use
//! recording fakes.

use async_trait::async_trait;
use pollboard_error::Result;

use crate::model::{Answer, DisplayData};

/// Source of the active poll's counts
#[async_trait(?Send)]
pub trait DisplayDataSource {
    async fn fetch_display_data(&self) -> Result<DisplayData>;
}

/// The two numeric displays and the optional proportional bars
pub trait CountsView {
    fn set_count(&self, answer: Answer, count: u64) -> Result<()>;

    /// `height` is a CSS length such as `62.5%`
    fn set_bar_height(&self, answer: Answer, height: &str) -> Result<()>;
}

/// The completed-poll grid and its page indicator
pub trait GridView {
    fn fade_out_cards(&self) -> Result<()>;

    fn replace_cards(&self, html: &str) -> Result<()>;

    /// `page_number` is 1-based
    fn set_current_page(&self, page_number: usize) -> Result<()>;

    fn set_total_pages(&self, total: usize) -> Result<()>;
}

/// Reloads the whole page, used when a different poll becomes active
pub trait Reloader {
    fn reload(&self) -> Result<()>;
}

impl<T: CountsView + ?Sized> CountsView for std::rc::Rc<T> {
    fn set_count(&self, answer: Answer, count: u64) -> Result<()> {
        (**self).set_count(answer, count)
    }

    fn set_bar_height(&self, answer: Answer, height: &str) -> Result<()> {
        (**self).set_bar_height(answer, height)
    }
}

impl<T: GridView + ?Sized> GridView for std::rc::Rc<T> {
    fn fade_out_cards(&self) -> Result<()> {
        (**self).fade_out_cards()
    }

    fn replace_cards(&self, html: &str) -> Result<()> {
        (**self).replace_cards(html)
    }

    fn set_current_page(&self, page_number: usize) -> Result<()> {
        (**self).set_current_page(page_number)
    }

    fn set_total_pages(&self, total: usize) -> Result<()> {
        (**self).set_total_pages(total)
    }
}

#[async_trait(?Send)]
impl<T: DisplayDataSource + ?Sized> DisplayDataSource for std::rc::Rc<T> {
    async fn fetch_display_data(&self) -> Result<DisplayData> {
        (**self).fetch_display_data().await
    }
}
