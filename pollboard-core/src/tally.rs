// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::model::Answer;

/// Vote counts for both answers with their share of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub count_a: u64,
    pub count_b: u64,
}

impl Tally {
    #[must_use]
    pub const fn new(count_a: u64, count_b: u64) -> Self {
        Self { count_a, count_b }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.count_a.saturating_add(self.count_b)
    }

    #[must_use]
    pub const fn count(&self, answer: Answer) -> u64 {
        match answer {
            Answer::A => self.count_a,
            Answer::B => self.count_b,
        }
    }

    /// Share of the vote in percent, 0 when nobody has voted
    #[must_use]
    pub fn percent(&self, answer: Answer) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(answer) as f64 / total as f64 * 100.0
    }

    /// Percentage rounded half up, as shown next to vote counts
    #[must_use]
    pub fn rounded_percent(&self, answer: Answer) -> u64 {
        (self.percent(answer) + 0.5).floor() as u64
    }
}

/// Format a percentage as a CSS length, e.g. `50%` or `66.66666666666666%`
#[must_use]
pub fn css_percent(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_is_zero_not_nan() {
        let tally = Tally::new(0, 0);

        assert_eq!(tally.percent(Answer::A), 0.0);
        assert_eq!(tally.percent(Answer::B), 0.0);
        assert_eq!(tally.rounded_percent(Answer::A), 0);
        assert_eq!(css_percent(tally.percent(Answer::B)), "0%");
    }

    #[test]
    fn split_tally() {
        let tally = Tally::new(2, 1);

        assert_eq!(tally.total(), 3);
        assert_eq!(css_percent(tally.percent(Answer::A)), "66.66666666666666%");
        assert_eq!(tally.rounded_percent(Answer::A), 67);
        assert_eq!(tally.rounded_percent(Answer::B), 33);
    }

    #[test]
    fn half_rounds_up() {
        let tally = Tally::new(1, 7);

        assert_eq!(tally.percent(Answer::A), 12.5);
        assert_eq!(tally.rounded_percent(Answer::A), 13);
        assert_eq!(tally.rounded_percent(Answer::B), 88);
    }

    #[test]
    fn unanimous_tally_formats_without_fraction() {
        let tally = Tally::new(5, 0);

        assert_eq!(css_percent(tally.percent(Answer::A)), "100%");
        assert_eq!(css_percent(tally.percent(Answer::B)), "0%");
    }
}
