// src/handlers/simulate.rs
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use warp::Rejection;

use super::error::ApiError;
use crate::models::{date_key, SimulationRequest, SimulationResult, TrajectoryPoint};
use crate::services::downsample::downsample;
use crate::services::simulator::{
    calendars_aligned, simulate, validate_request, SimulationError,
};
use crate::services::store::SeriesStore;

/// Chart point cap applied when the query does not ask for one.
const DEFAULT_MAX_POINTS: usize = 100;

/// Ticker reported for the benchmark series in responses.
const BENCHMARK_TICKER: &str = "^GSPC";

#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    pub starting_amount: f64,
    pub monthly_contribution: f64,
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
    /// Simulate this stock instead of the benchmark (or, for the
    /// comparison endpoint, alongside it).
    pub ticker: Option<String>,
    pub max_points: Option<usize>,
}

impl SimulateQuery {
    /// Validate the raw query into an engine request. All rejection of
    /// bad input happens here, before the simulator runs.
    fn to_request(&self) -> Result<SimulationRequest, SimulationError> {
        for (label, month) in [("start", self.start_month), ("end", self.end_month)] {
            if !(1..=12).contains(&month) {
                return Err(SimulationError::InvalidRequest(format!(
                    "{} month must be between 1 and 12",
                    label
                )));
            }
        }

        let request = SimulationRequest {
            starting_amount: self.starting_amount,
            monthly_contribution: self.monthly_contribution,
            start_key: date_key(self.start_year, self.start_month),
            end_key: date_key(self.end_year, self.end_month),
        };
        validate_request(&request)?;
        Ok(request)
    }

    fn max_points(&self) -> usize {
        self.max_points.unwrap_or(DEFAULT_MAX_POINTS).max(1)
    }
}

/// One simulated instrument, trajectory already thinned for charting.
#[derive(Debug, Serialize)]
pub struct InstrumentResult {
    pub ticker: String,
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_gains: f64,
    pub total_return_pct: f64,
    pub trajectory: Vec<TrajectoryPoint>,
}

impl InstrumentResult {
    fn new(ticker: &str, result: &SimulationResult, max_points: usize) -> Self {
        InstrumentResult {
            ticker: ticker.to_string(),
            final_value: result.final_value,
            total_contributions: result.total_contributions,
            total_gains: result.total_gains,
            total_return_pct: result.total_return_pct,
            trajectory: downsample(&result.trajectory, max_points),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonResult {
    pub benchmark: InstrumentResult,
    pub stock: InstrumentResult,
    /// Whether the two trajectories cover the exact same months. When
    /// false the caller must treat them as label-keyed series instead of
    /// overlaying them point-for-point.
    pub calendars_aligned: bool,
}

pub async fn get_simulation(
    query: SimulateQuery,
    store: Arc<SeriesStore>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling simulation request: {:?}", query);

    let request = query.to_request().map_err(reject)?;

    let (ticker, series) = match query.ticker.as_deref() {
        Some(ticker) => {
            let series = store
                .stock(ticker)
                .ok_or_else(|| reject(SimulationError::MissingSeries(ticker.to_string())))?;
            (ticker, series)
        }
        None => (BENCHMARK_TICKER, store.benchmark()),
    };

    let result = simulate(series, &request).map_err(reject)?;
    debug!(
        "Simulated {}: {} trajectory points, final value {}",
        ticker,
        result.trajectory.len(),
        result.final_value
    );

    Ok(warp::reply::json(&InstrumentResult::new(
        ticker,
        &result,
        query.max_points(),
    )))
}

/// Run the benchmark and one stock over the same request. Both runs use
/// identical contribution timing and window semantics, so the two
/// contribution totals are numerically identical; point-for-point
/// comparability still depends on `calendars_aligned`.
pub async fn get_comparison(
    query: SimulateQuery,
    store: Arc<SeriesStore>,
) -> Result<impl warp::Reply, Rejection> {
    info!("Handling comparison request: {:?}", query);

    let request = query.to_request().map_err(reject)?;

    let ticker = query.ticker.as_deref().ok_or_else(|| {
        reject(SimulationError::InvalidRequest(
            "ticker is required for comparison".to_string(),
        ))
    })?;
    let stock_series = store
        .stock(ticker)
        .ok_or_else(|| reject(SimulationError::MissingSeries(ticker.to_string())))?;

    let benchmark_result = simulate(store.benchmark(), &request).map_err(reject)?;
    let stock_result = simulate(stock_series, &request).map_err(reject)?;

    let aligned = calendars_aligned(&benchmark_result.trajectory, &stock_result.trajectory);
    debug!(
        "Compared {} against benchmark: aligned={}, {}/{} points",
        ticker,
        aligned,
        benchmark_result.trajectory.len(),
        stock_result.trajectory.len()
    );

    let max_points = query.max_points();
    Ok(warp::reply::json(&ComparisonResult {
        benchmark: InstrumentResult::new(BENCHMARK_TICKER, &benchmark_result, max_points),
        stock: InstrumentResult::new(ticker, &stock_result, max_points),
        calendars_aligned: aligned,
    }))
}

fn reject(err: SimulationError) -> Rejection {
    warp::reject::custom(ApiError::from(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> SimulateQuery {
        SimulateQuery {
            starting_amount: 10_000.0,
            monthly_contribution: 500.0,
            start_year: 2020,
            start_month: 1,
            end_year: 2023,
            end_month: 12,
            ticker: None,
            max_points: None,
        }
    }

    #[test]
    fn query_converts_to_request() {
        let request = query().to_request().unwrap();
        assert_eq!(request.start_key, date_key(2020, 1));
        assert_eq!(request.end_key, date_key(2023, 12));
        assert_eq!(request.starting_amount, 10_000.0);
    }

    #[test]
    fn out_of_range_month_rejected() {
        let mut q = query();
        q.start_month = 13;
        assert!(matches!(
            q.to_request(),
            Err(SimulationError::InvalidRequest(_))
        ));

        let mut q = query();
        q.end_month = 0;
        assert!(q.to_request().is_err());
    }

    #[test]
    fn max_points_floor_is_one() {
        let mut q = query();
        assert_eq!(q.max_points(), DEFAULT_MAX_POINTS);
        q.max_points = Some(0);
        assert_eq!(q.max_points(), 1);
    }
}
