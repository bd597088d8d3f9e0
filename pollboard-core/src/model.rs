// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

use pollboard_error::{PollboardError, Result};
use serde::{Deserialize, Serialize};

use crate::tally::Tally;

/// One side of a two-answer poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    A,
    B,
}

impl Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The active poll as served by the display data endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePoll {
    pub id: u64,
    pub question: String,
    pub answer_a: String,
    pub answer_b: String,
    pub count_a: u64,
    pub count_b: u64,
}

impl ActivePoll {
    #[must_use]
    pub const fn tally(&self) -> Tally {
        Tally::new(self.count_a, self.count_b)
    }
}

/// Body of `GET /api/display/data`: `{"poll": {...}}` or `{"poll": null}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayData {
    #[serde(default)]
    pub poll: Option<ActivePoll>,
}

impl DisplayData {
    /// # Errors
    /// Returns `DecodeError` when the body is not a display data document.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| PollboardError::decode_error(format!("display data: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub question: String,
    pub answer_a: String,
    pub answer_b: String,
    pub created_at: String,
}

/// A finished poll with its final counts, as listed on the completed page.
///
/// The server may ship precomputed percentages; they are kept for
/// round-tripping but never trusted for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedPoll {
    pub poll: PollRecord,
    pub count_a: u64,
    pub count_b: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_b: Option<f64>,
}

impl CompletedPoll {
    #[must_use]
    pub const fn tally(&self) -> Tally {
        Tally::new(self.count_a, self.count_b)
    }

    /// Decode the JSON array embedded in the completed-polls page
    ///
    /// # Errors
    /// Returns `DecodeError` when the text is not an array of completed polls.
    pub fn list_from_json(text: &str) -> Result<Vec<Self>> {
        serde_json::from_str(text)
            .map_err(|e| PollboardError::decode_error(format!("completed polls: {e}")))
    }
}
