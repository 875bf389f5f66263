pub const MEETS_LABEL: &str = "Meets Criteria";
pub const DOES_NOT_MEET_LABEL: &str = "Does Not Meet";

/// One scored (vendor, function) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub vendor: String,
    pub area: String,
    /// Function column header exactly as it appears in the vendor file.
    pub function: String,
    /// Normalized requirement level from the criteria file.
    pub requirement: String,
    /// Response cell exactly as it appears in the vendor file.
    pub response: String,
    /// response_score x 100, rounded to two decimals. Independent of the
    /// requirement weight, which cancels out of the per-line percentage.
    pub score_pct: f64,
    pub meets: bool,
}

impl DetailRecord {
    pub fn meets_label(&self) -> &'static str {
        if self.meets {
            MEETS_LABEL
        } else {
            DOES_NOT_MEET_LABEL
        }
    }
}

/// Per-vendor totals. Areas appear in the order the vendor's columns first
/// touched them; areas the vendor never touched are absent, not zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub vendor: String,
    pub total_pct: f64,
    pub area_pcts: Vec<(String, f64)>,
}

impl SummaryRow {
    pub fn area_pct(&self, area: &str) -> Option<f64> {
        self.area_pcts
            .iter()
            .find(|(name, _)| name == area)
            .map(|(_, pct)| *pct)
    }
}
