// src/services/simulator.rs
use std::fmt;

use crate::models::{MonthlyReturn, SimulationRequest, SimulationResult, TrajectoryPoint};

/// Failure taxonomy of the simulation engine. All three are reported to
/// the immediate caller; the engine never retries or recovers internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Caller-supplied request failed validation. Always caught before
    /// `simulate` runs, never during it.
    InvalidRequest(String),
    /// The requested date window has no overlap with the series. A valid
    /// user-input outcome, not a defect.
    FilterEmpty,
    /// The requested instrument has no loaded return series.
    MissingSeries(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            SimulationError::FilterEmpty => {
                write!(f, "no data available for the selected date range")
            }
            SimulationError::MissingSeries(ticker) => {
                write!(f, "no data available for ticker {}", ticker)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Check the request invariants: non-negative amounts, at least one of
/// them positive, and a forward date window. Callers run this before
/// `simulate`; the simulator itself assumes a valid request.
pub fn validate_request(request: &SimulationRequest) -> Result<(), SimulationError> {
    if request.starting_amount < 0.0 || request.monthly_contribution < 0.0 {
        return Err(SimulationError::InvalidRequest(
            "amounts must not be negative".to_string(),
        ));
    }
    if request.starting_amount + request.monthly_contribution <= 0.0 {
        return Err(SimulationError::InvalidRequest(
            "starting amount and monthly contribution are both zero".to_string(),
        ));
    }
    if request.start_key >= request.end_key {
        return Err(SimulationError::InvalidRequest(
            "end date must be after start date".to_string(),
        ));
    }
    Ok(())
}

/// Compound the requested window of monthly returns into a portfolio
/// trajectory.
///
/// The window filter is inclusive on both ends in DateKey space. The
/// monthly contribution is added at the start of every month except the
/// first (the first month only holds the starting amount), then the
/// month's return is applied multiplicatively. One trajectory point is
/// produced per filtered observation, carrying the post-return value and
/// the running contribution total, so the trajectory always has exactly
/// as many points as filtered observations.
///
/// Everything stays in f64; no rounding happens here. A -100% month
/// drives the value to zero and it stays there, which is accepted
/// behavior.
pub fn simulate(
    series: &[MonthlyReturn],
    request: &SimulationRequest,
) -> Result<SimulationResult, SimulationError> {
    let window: Vec<&MonthlyReturn> = series
        .iter()
        .filter(|obs| {
            let key = obs.date_key();
            key >= request.start_key && key <= request.end_key
        })
        .collect();

    if window.is_empty() {
        return Err(SimulationError::FilterEmpty);
    }

    let mut portfolio_value = request.starting_amount;
    let mut total_contributions = request.starting_amount;
    let mut trajectory = Vec::with_capacity(window.len());

    for (i, obs) in window.iter().enumerate() {
        // Contribution lands at the start of every month except the first.
        if i > 0 {
            portfolio_value += request.monthly_contribution;
            total_contributions += request.monthly_contribution;
        }

        portfolio_value *= 1.0 + obs.return_pct / 100.0;

        trajectory.push(TrajectoryPoint {
            label: obs.label(),
            portfolio_value,
            cumulative_contributions: total_contributions,
        });
    }

    let total_gains = portfolio_value - total_contributions;
    let total_return_pct = if total_contributions > 0.0 {
        100.0 * total_gains / total_contributions
    } else {
        0.0
    };

    Ok(SimulationResult {
        final_value: portfolio_value,
        total_contributions,
        total_gains,
        total_return_pct,
        trajectory,
    })
}

/// Whether two trajectories cover the exact same months in the same
/// order. Two series simulated over the same request are point-for-point
/// comparable only when this holds; the engine never reconciles or
/// interpolates mismatched calendars.
pub fn calendars_aligned(a: &[TrajectoryPoint], b: &[TrajectoryPoint]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.label == y.label)
}
