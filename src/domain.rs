use serde::{Deserialize, Deserializer, Serialize};

/// One row of the raw polling file. A poll usually spans several rows
/// (one per candidate, times questions/subgroups), all sharing a `poll_id`.
/// Read-only input, never mutated by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPollRecord {
    pub poll_id: u64,
    pub candidate_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub numeric_grade: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sample_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pollscore: Option<f64>,
}

/// Per-poll aggregate: one per distinct `poll_id`, even when both candidate
/// means are missing. A candidate with no rows in the poll yields `None`,
/// never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PollObservation {
    pub poll_id: u64,
    /// Mean pct over rows for the target candidate
    pub target_pct: Option<f64>,
    /// Mean pct over rows for the comparison candidate
    pub comparison_pct: Option<f64>,
    pub numeric_grade: Option<f64>,
    pub sample_size: Option<f64>,
    pub pollscore: Option<f64>,
}

/// Final analysis row. All four fields are defined, finite numbers; partial
/// rows never reach this type. Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedObservation {
    pub numeric_grade: f64,
    pub sample_size: f64,
    pub pollscore: f64,
    pub scaled_trump_pct: f64,
}

/// Parses a numeric cell, mapping blank or non-numeric content to `None`.
/// Raw polling exports routinely carry empty cells and stray text in the
/// quality columns; those become missing values, not parse failures.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}
