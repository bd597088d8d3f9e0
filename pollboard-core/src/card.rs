// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! HTML fragments for the completed-poll grid.
//!
//! The class names form the contract with the page stylesheet: `poll-card`,
//! `fade-in`, `answer-result`, `bar-a`/`bar-b` and `poll-date` must not change.

use std::fmt::Write;
use std::ops::Range;

use crate::date::format_long_date;
use crate::model::{Answer, CompletedPoll};
use crate::tally::{css_percent, Tally};

/// Escape text for use as element content.
///
/// Produces what serializing a text node yields: `&`, `<`, `>` and no-break
/// spaces are replaced, quotes are left alone.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn answer_block(out: &mut String, answer: Answer, label: &str, tally: &Tally) {
    let side = match answer {
        Answer::A => 'a',
        Answer::B => 'b',
    };
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"
        <div class="answer-result answer-{side}">
            <div class="answer-label">{label}</div>
            <div class="bar-container">
                <div class="bar bar-{side}" style="width: {width}"></div>
            </div>
            <div class="vote-count">{count} votes ({rounded}%)</div>
        </div>"#,
        label = escape_html(label),
        width = css_percent(tally.percent(answer)),
        count = tally.count(answer),
        rounded = tally.rounded_percent(answer),
    );
}

/// Render one result card; `index` is the poll's position in the full list.
#[must_use]
pub fn render_card(poll: &CompletedPoll, index: usize) -> String {
    let tally = poll.tally();
    let mut out = String::with_capacity(1024);

    let _ = write!(
        out,
        r#"
<div class="poll-card fade-in" data-poll-index="{index}">
    <div class="poll-question">
        <h2>{question}</h2>
    </div>

    <div class="poll-results">"#,
        question = escape_html(&poll.poll.question),
    );
    answer_block(&mut out, Answer::A, &poll.poll.answer_a, &tally);
    out.push('\n');
    answer_block(&mut out, Answer::B, &poll.poll.answer_b, &tally);
    let _ = write!(
        out,
        r#"
    </div>

    <div class="poll-date">
        {date}
    </div>
</div>
"#,
        date = format_long_date(&poll.poll.created_at),
    );

    out
}

/// Render the cards for `range`, numbering them by their position in `polls`.
#[must_use]
pub fn render_page(polls: &[CompletedPoll], range: Range<usize>) -> String {
    let start = range.start;
    polls
        .get(range)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(offset, poll)| render_card(poll, start + offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PollRecord;

    fn completed(question: &str, count_a: u64, count_b: u64) -> CompletedPoll {
        CompletedPoll {
            poll: PollRecord {
                id: None,
                question: question.to_string(),
                answer_a: "Yes".to_string(),
                answer_b: "No".to_string(),
                created_at: "2024-01-15T10:30:00".to_string(),
            },
            count_a,
            count_b,
            percent_a: None,
            percent_b: None,
        }
    }

    #[test]
    fn escape_covers_markup_but_not_quotes() {
        assert_eq!(
            escape_html(r#"<b>"Fish" & 'chips'</b>"#),
            r#"&lt;b&gt;"Fish" &amp; 'chips'&lt;/b&gt;"#
        );
        assert_eq!(escape_html("a\u{a0}b"), "a&nbsp;b");
    }

    #[test]
    fn card_carries_counts_widths_and_date() {
        let html = render_card(&completed("Tea or coffee?", 3, 1), 5);

        assert!(html.contains(r#"data-poll-index="5""#));
        assert!(html.contains("<h2>Tea or coffee?</h2>"));
        assert!(html.contains(r#"class="bar bar-a" style="width: 75%""#));
        assert!(html.contains(r#"class="bar bar-b" style="width: 25%""#));
        assert!(html.contains("3 votes (75%)"));
        assert!(html.contains("1 votes (25%)"));
        assert!(html.contains("January 15, 2024"));
    }

    #[test]
    fn card_escapes_question_and_answers() {
        let mut poll = completed("<script>alert(1)</script>", 0, 0);
        poll.poll.answer_b = "A & B".to_string();

        let html = render_card(&poll, 0);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn card_with_no_votes_shows_zero_percent() {
        let html = render_card(&completed("Anyone?", 0, 0), 0);

        assert!(html.contains(r#"style="width: 0%""#));
        assert!(html.contains("0 votes (0%)"));
    }

    #[test]
    fn stale_server_percentages_are_ignored() {
        let mut poll = completed("Recount", 1, 1);
        poll.percent_a = Some(90.0);

        let html = render_card(&poll, 0);

        assert!(html.contains(r#"style="width: 50%""#));
        assert!(!html.contains("90%"));
    }

    #[test]
    fn page_uses_global_indices() {
        let polls: Vec<CompletedPoll> = (0..6).map(|i| completed(&format!("Q{i}"), i, 1)).collect();

        let html = render_page(&polls, 4..6);

        assert_eq!(html.matches("poll-card fade-in").count(), 2);
        assert!(html.contains(r#"data-poll-index="4""#));
        assert!(html.contains(r#"data-poll-index="5""#));
        assert!(html.contains("<h2>Q4</h2>"));
        assert!(!html.contains("<h2>Q3</h2>"));
    }

    #[test]
    fn out_of_bounds_page_renders_nothing() {
        let polls = vec![completed("Only", 1, 0)];
        assert_eq!(render_page(&polls, 4..8), "");
    }
}
