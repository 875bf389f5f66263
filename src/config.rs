use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    pub vendors_csv: PathBuf,
    pub summary_csv: PathBuf,
    pub detailed_csv: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportConfig {
    pub top_vendors: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub paths: PathsConfig,
    pub report: ReportConfig,
}

/// Scoring tables and thresholds. Injected into the engine rather than read
/// from module constants so tests (and operators, via `scoring.json`) can
/// substitute alternate tables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoringConfig {
    pub requirement_weights: RequirementWeights,
    pub response_scores: ResponseScores,
    /// Per-line percentage at or above which a response meets criteria.
    pub meets_threshold: f64,
    /// Business area label used when a scored function has no area mapping.
    pub fallback_area: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RequirementWeights {
    pub critical: f64,
    pub important: f64,
    pub useful: f64,
    pub nice_to_have: f64,
    pub not_required: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResponseScores {
    pub yes: f64,
    pub no: f64,
    pub not_provided: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            requirement_weights: RequirementWeights {
                critical: 4.0,
                important: 3.0,
                useful: 2.0,
                nice_to_have: 1.0,
                not_required: 0.0,
            },
            response_scores: ResponseScores {
                yes: 1.0,
                no: 0.0,
                not_provided: 0.5,
            },
            meets_threshold: 75.0,
            fallback_area: "Unspecified".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    pub scoring: ScoringConfig,
    pub base_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        let base_dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&base_dir)?;

        let settings_path = base_dir.join("settings.json");
        let scoring_path = base_dir.join("scoring.json");

        let settings: Settings = load_or_write(&settings_path, default_settings())?;
        let scoring: ScoringConfig = load_or_write(&scoring_path, ScoringConfig::default())?;

        Ok(AppConfig {
            settings,
            scoring,
            base_dir,
        })
    }
}

fn load_or_write<T>(path: &Path, default: T) -> Result<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        let data = serde_json::to_string_pretty(&default)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        return Ok(default);
    }
    let bytes =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "example", "vendor_scorer")
        .context("Unable to determine platform data directory")
}

fn default_settings() -> Settings {
    Settings {
        paths: PathsConfig {
            vendors_csv: PathBuf::from("vendor_responses.csv"),
            summary_csv: PathBuf::from("vendor_scores_summary.csv"),
            detailed_csv: PathBuf::from("vendor_scores_detailed.csv"),
        },
        report: ReportConfig { top_vendors: 5 },
    }
}
