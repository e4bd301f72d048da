// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Integer encoding of (year, month) as `year*12 + month`. Gives O(1)
/// ordering and range checks without any calendar arithmetic.
pub type DateKey = i32;

pub fn date_key(year: i32, month: u32) -> DateKey {
    year * 12 + month as i32
}

/// One month's percentage price change for an instrument, as stored in
/// the fixture files (`{"year": 2020, "month": 1, "return": 2.5}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    pub year: i32,
    pub month: u32,
    #[serde(rename = "return")]
    pub return_pct: f64,
}

impl MonthlyReturn {
    pub fn date_key(&self) -> DateKey {
        date_key(self.year, self.month)
    }

    /// Chart label, e.g. "2020-03".
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

/// Metadata file accompanying a return series fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMetadata {
    pub last_updated: DateTime<Utc>,
    pub data_source: String,
    pub total_months: usize,
    pub date_range: DateRange,
}

/// One entry of the stock index fixture (`stocks/index.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    pub ticker: String,
    pub name: String,
}

/// Validated input to one simulation run. Amounts are non-negative and
/// at least one of them is positive; `start_key < end_key`. Construction
/// goes through the handler-side validation, never straight from user
/// input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRequest {
    pub starting_amount: f64,
    pub monthly_contribution: f64,
    pub start_key: DateKey,
    pub end_key: DateKey,
}

/// One month of the simulated trajectory: the portfolio value after that
/// month's return was applied, and the contributions paid in so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub label: String,
    pub portfolio_value: f64,
    pub cumulative_contributions: f64,
}

/// Full output of one simulation run. Owned by the caller; the engine
/// never retains or mutates it after returning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_gains: f64,
    pub total_return_pct: f64,
    pub trajectory: Vec<TrajectoryPoint>,
}
