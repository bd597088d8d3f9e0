// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pollboard_core::{ActivePoll, CompletedPoll, DisplayData, PollRecord};

pub fn active_poll(count_a: u64, count_b: u64) -> ActivePoll {
    ActivePoll {
        id: 1,
        question: "Pineapple on pizza?".to_string(),
        answer_a: "Yes".to_string(),
        answer_b: "No".to_string(),
        count_a,
        count_b,
    }
}

pub fn display_data(count_a: u64, count_b: u64) -> DisplayData {
    DisplayData {
        poll: Some(active_poll(count_a, count_b)),
    }
}

pub fn no_active_poll() -> DisplayData {
    DisplayData { poll: None }
}

/// Completed poll number `n`, with question `Question n?` and `n`/`n + 1` votes
pub fn completed_poll(n: u64) -> CompletedPoll {
    CompletedPoll {
        poll: PollRecord {
            id: Some(n),
            question: format!("Question {n}?"),
            answer_a: format!("Answer {n}A"),
            answer_b: format!("Answer {n}B"),
            created_at: format!("2024-01-{:02}T09:00:00", n % 28 + 1),
        },
        count_a: n,
        count_b: n + 1,
        percent_a: None,
        percent_b: None,
    }
}

/// `count` completed polls numbered from 0
pub fn completed_polls(count: u64) -> Vec<CompletedPoll> {
    (0..count).map(completed_poll).collect()
}
