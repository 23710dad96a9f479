/// Final tally of a run, with the derived display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    score: u32,
    total: u32,
}

impl ScoreReport {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self { score, total }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `score / total * 100`; an empty subject divides by one.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        f64::from(self.score) / f64::from(self.total.max(1)) * 100.0
    }

    /// Percentage with two decimals and a trailing `%`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.2}%", self.percentage())
    }

    /// Placeholder percentile: the rounded percentage, capped at 100.
    ///
    /// There is no peer data behind this number. It is a heuristic derived
    /// from the raw score only and must be labeled as such wherever shown.
    #[must_use]
    pub fn percentile(&self) -> u8 {
        let rounded = self.percentage().round().clamp(0.0, 100.0);
        // Clamped to 0..=100 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = rounded as u8;
        value
    }
}
