use crate::config::{RequirementWeights, ResponseScores, ScoringConfig};
use crate::criteria::CriteriaMap;
use crate::models::{DetailRecord, SummaryRow};
use crate::table::{Row, Table};
use anyhow::{Result, bail};

/// Normalized header of the vendor-identity column.
pub const VENDOR_COLUMN: &str = "vendor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementLevel {
    Critical,
    Important,
    Useful,
    NiceToHave,
    NotRequired,
}

impl RequirementLevel {
    /// Parses an already-normalized requirement string. Anything outside the
    /// fixed vocabulary is unrecognized and resolves to weight 0 downstream.
    pub fn parse(normalized: &str) -> Option<RequirementLevel> {
        match normalized {
            "critical" => Some(RequirementLevel::Critical),
            "important" => Some(RequirementLevel::Important),
            "useful" => Some(RequirementLevel::Useful),
            "nice to have" => Some(RequirementLevel::NiceToHave),
            "not required" => Some(RequirementLevel::NotRequired),
            _ => None,
        }
    }

    pub fn weight(self, weights: &RequirementWeights) -> f64 {
        match self {
            RequirementLevel::Critical => weights.critical,
            RequirementLevel::Important => weights.important,
            RequirementLevel::Useful => weights.useful,
            RequirementLevel::NiceToHave => weights.nice_to_have,
            RequirementLevel::NotRequired => weights.not_required,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
    NotProvided,
}

impl Response {
    pub fn parse(normalized: &str) -> Option<Response> {
        match normalized {
            "yes" => Some(Response::Yes),
            "no" => Some(Response::No),
            "not provided" => Some(Response::NotProvided),
            _ => None,
        }
    }

    pub fn score(self, scores: &ResponseScores) -> f64 {
        match self {
            Response::Yes => scores.yes,
            Response::No => scores.no,
            Response::NotProvided => scores.not_provided,
        }
    }
}

/// Counters for data-quality anomalies absorbed into neutral defaults. These
/// are reporting aids only; they never change a score.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Vendor columns with no entry in the criteria mapping, counted once
    /// per column regardless of how many vendor rows pass through them.
    pub unmatched_functions: usize,
    /// Vendor columns whose mapped requirement string is outside the fixed
    /// vocabulary, counted once per column.
    pub unrecognized_levels: usize,
    /// Vendor responses outside {yes, no, not provided}, scored as 0,
    /// counted once per cell.
    pub unrecognized_responses: usize,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.unmatched_functions == 0
            && self.unrecognized_levels == 0
            && self.unrecognized_responses == 0
    }
}

#[derive(Debug)]
pub struct ScoreOutput {
    pub summaries: Vec<SummaryRow>,
    pub details: Vec<DetailRecord>,
    pub diagnostics: Diagnostics,
}

/// Folds a vendor table into summary and detail records. The scoring tables
/// and the criteria lookups are injected, so tests can substitute either.
pub struct ScoringEngine<'a> {
    config: &'a ScoringConfig,
    criteria: &'a CriteriaMap,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(config: &'a ScoringConfig, criteria: &'a CriteriaMap) -> ScoringEngine<'a> {
        ScoringEngine { config, criteria }
    }

    pub fn score_table(&self, vendors: &Table) -> Result<ScoreOutput> {
        let Some(vendor_idx) = vendors.column(VENDOR_COLUMN) else {
            bail!("vendor file is missing required column '{VENDOR_COLUMN}'");
        };

        let mut diagnostics = Diagnostics::default();
        let columns = self.resolve_columns(vendors, vendor_idx, &mut diagnostics);

        let mut summaries = Vec::with_capacity(vendors.row_count());
        let mut details = Vec::new();
        for row in vendors.rows() {
            summaries.push(self.score_vendor(
                row,
                vendor_idx,
                &columns,
                &mut details,
                &mut diagnostics,
            ));
        }

        Ok(ScoreOutput {
            summaries,
            details,
            diagnostics,
        })
    }

    /// Column lookups are the same for every vendor row, so resolve them
    /// once per table. Skipped columns are counted here, once each.
    fn resolve_columns(
        &self,
        vendors: &Table,
        vendor_idx: usize,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ScoredColumn> {
        let mut columns = Vec::new();
        for (idx, header) in vendors.headers().iter().enumerate() {
            if idx == vendor_idx {
                continue;
            }
            let Some(requirement) = self.criteria.requirement(header) else {
                diagnostics.unmatched_functions += 1;
                continue;
            };
            let weight = match RequirementLevel::parse(requirement) {
                Some(level) => level.weight(&self.config.requirement_weights),
                None => {
                    diagnostics.unrecognized_levels += 1;
                    0.0
                }
            };
            if weight == 0.0 {
                // "not required" and unrecognized levels leave no trace in
                // any aggregate.
                continue;
            }
            let area = self
                .criteria
                .area(header)
                .unwrap_or(&self.config.fallback_area)
                .to_string();
            columns.push(ScoredColumn {
                index: idx,
                header: header.clone(),
                requirement: requirement.to_string(),
                weight,
                area,
            });
        }
        columns
    }

    fn score_vendor(
        &self,
        row: Row<'_>,
        vendor_idx: usize,
        columns: &[ScoredColumn],
        details: &mut Vec<DetailRecord>,
        diagnostics: &mut Diagnostics,
    ) -> SummaryRow {
        let vendor = row.cell(vendor_idx).as_str().to_string();
        let mut total_score = 0.0;
        let mut total_weight = 0.0;
        // First-touch order keeps the summary column set stable across runs.
        let mut areas: Vec<(String, AreaAcc)> = Vec::new();

        for column in columns {
            let cell = row.cell(column.index);
            let response_score = match Response::parse(&cell.normalized()) {
                Some(response) => response.score(&self.config.response_scores),
                None => {
                    diagnostics.unrecognized_responses += 1;
                    0.0
                }
            };
            let weighted_score = response_score * column.weight;
            total_score += weighted_score;
            total_weight += column.weight;

            match areas.iter_mut().find(|(name, _)| *name == column.area) {
                Some((_, acc)) => acc.add(weighted_score, column.weight),
                None => {
                    let mut acc = AreaAcc::default();
                    acc.add(weighted_score, column.weight);
                    areas.push((column.area.clone(), acc));
                }
            }

            let score_pct = percentage(weighted_score, column.weight);
            details.push(DetailRecord {
                vendor: vendor.clone(),
                area: column.area.clone(),
                function: column.header.clone(),
                requirement: column.requirement.clone(),
                response: cell.as_str().to_string(),
                score_pct,
                meets: score_pct >= self.config.meets_threshold,
            });
        }

        SummaryRow {
            vendor,
            total_pct: percentage(total_score, total_weight),
            area_pcts: areas
                .into_iter()
                .map(|(name, acc)| (name, percentage(acc.score, acc.weight)))
                .collect(),
        }
    }
}

/// A vendor column that survived criteria resolution, with its
/// row-invariant scoring inputs.
#[derive(Debug)]
struct ScoredColumn {
    index: usize,
    /// Header exactly as it appears in the vendor file.
    header: String,
    requirement: String,
    weight: f64,
    area: String,
}

#[derive(Debug, Default)]
struct AreaAcc {
    score: f64,
    weight: f64,
}

impl AreaAcc {
    fn add(&mut self, score: f64, weight: f64) {
        self.score += score;
        self.weight += weight;
    }
}

/// (score / weight) x 100, rounded to two decimals, 0 when the weight is 0.
fn percentage(score: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        round2(score / weight * 100.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
