// End-to-end tests over the warp routes, backed by the JSON fixtures in
// tests/fixtures (12 months of 2020 for the benchmark and AAPL, a short
// Jul-Dec series for TSLA).
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use growth_calc_backend::routes::routes;
use growth_calc_backend::services::store::SeriesStore;

/// Benchmark fixture returns, in order. Kept in sync with
/// tests/fixtures/sp500-data.json.
const SP500_2020: [f64; 12] = [
    -0.16, -8.41, -12.51, 12.68, 4.53, 1.84, 5.51, 7.01, -3.92, -2.77, 10.75, 3.71,
];

fn store() -> Arc<SeriesStore> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    Arc::new(SeriesStore::load(&dir).unwrap())
}

async fn get(path: &str) -> (u16, Value) {
    let api = routes(store());
    let resp = warp::test::request().method("GET").path(path).reply(&api).await;
    let status = resp.status().as_u16();
    let body: Value = serde_json::from_slice(resp.body()).unwrap();
    (status, body)
}

const FULL_2020: &str =
    "starting_amount=1000&monthly_contribution=0&start_year=2020&start_month=1&end_year=2020&end_month=12";

#[tokio::test]
async fn instruments_lists_loaded_stocks() {
    let (status, body) = get("/api/v1/instruments").await;
    assert_eq!(status, 200);

    let tickers: Vec<&str> = body["stocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["ticker"].as_str().unwrap())
        .collect();
    assert_eq!(tickers, ["AAPL", "TSLA"]);
    assert_eq!(body["benchmark"]["dateRange"]["start"]["year"], 2020);
}

#[tokio::test]
async fn metadata_is_served_verbatim() {
    let (status, body) = get("/api/v1/metadata").await;
    assert_eq!(status, 200);
    assert_eq!(body["dataSource"], "Yahoo Finance (^GSPC)");
    assert_eq!(body["totalMonths"], 12);
}

#[tokio::test]
async fn lump_sum_simulation_compounds_the_fixture_returns() {
    let (status, body) = get(&format!("/api/v1/simulate?{}", FULL_2020)).await;
    assert_eq!(status, 200);

    // Same fold the engine performs, in the same order.
    let mut expected = 1000.0;
    for pct in SP500_2020 {
        expected *= 1.0 + pct / 100.0;
    }

    assert_eq!(body["ticker"], "^GSPC");
    assert_eq!(body["final_value"].as_f64().unwrap(), expected);
    assert_eq!(body["total_contributions"].as_f64().unwrap(), 1000.0);
    assert_eq!(
        body["total_gains"].as_f64().unwrap(),
        expected - 1000.0
    );

    let trajectory = body["trajectory"].as_array().unwrap();
    assert_eq!(trajectory.len(), 12);
    assert_eq!(trajectory[0]["label"], "2020-01");
    assert_eq!(trajectory[11]["label"], "2020-12");
    assert_eq!(
        trajectory[11]["portfolio_value"].as_f64().unwrap(),
        expected
    );
}

#[tokio::test]
async fn monthly_contributions_accumulate() {
    let (status, body) = get(
        "/api/v1/simulate?starting_amount=0&monthly_contribution=100&start_year=2020&start_month=1&end_year=2020&end_month=12",
    )
    .await;
    assert_eq!(status, 200);
    // 11 funded months after the initial one.
    assert_eq!(body["total_contributions"].as_f64().unwrap(), 1100.0);
}

#[tokio::test]
async fn ticker_param_switches_the_series() {
    let (status, body) = get(&format!("/api/v1/simulate?{}&ticker=AAPL", FULL_2020)).await;
    assert_eq!(status, 200);
    assert_eq!(body["ticker"], "AAPL");
    // AAPL's 2020 fixture grew a lump sum; enough to tell the series apart.
    assert!(body["total_gains"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn downsampling_bounds_the_trajectory() {
    let (status, body) = get(&format!("/api/v1/simulate?{}&max_points=5", FULL_2020)).await;
    assert_eq!(status, 200);

    // step = ceil(12/5) = 3: indices 0, 3, 6, 9 plus the forced last.
    let trajectory = body["trajectory"].as_array().unwrap();
    let labels: Vec<&str> = trajectory
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["2020-01", "2020-04", "2020-07", "2020-10", "2020-12"]);

    // The displayed last point matches the summary.
    assert_eq!(
        trajectory.last().unwrap()["portfolio_value"],
        body["final_value"]
    );
}

#[tokio::test]
async fn zero_amounts_are_a_bad_request() {
    let (status, body) = get(
        "/api/v1/simulate?starting_amount=0&monthly_contribution=0&start_year=2020&start_month=1&end_year=2020&end_month=12",
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("zero"));
}

#[tokio::test]
async fn backwards_window_is_a_bad_request() {
    let (status, _) = get(
        "/api/v1/simulate?starting_amount=1000&monthly_contribution=0&start_year=2021&start_month=1&end_year=2020&end_month=1",
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn window_outside_the_data_is_unprocessable() {
    let (status, body) = get(
        "/api/v1/simulate?starting_amount=1000&monthly_contribution=0&start_year=2010&start_month=1&end_year=2010&end_month=12",
    )
    .await;
    assert_eq!(status, 422);
    assert!(body["error"].as_str().unwrap().contains("date range"));
}

#[tokio::test]
async fn unknown_ticker_is_not_found() {
    let (status, body) = get(&format!("/api/v1/simulate?{}&ticker=MSFT", FULL_2020)).await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("MSFT"));
}

#[tokio::test]
async fn missing_query_params_are_a_bad_request() {
    let (status, _) = get("/api/v1/simulate?starting_amount=1000").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn comparison_over_matching_calendars_is_aligned() {
    let (status, body) = get(&format!(
        "/api/v1/simulate/compare?{}&ticker=AAPL",
        FULL_2020
    ))
    .await;
    assert_eq!(status, 200);

    assert_eq!(body["calendars_aligned"], true);
    assert_eq!(body["benchmark"]["ticker"], "^GSPC");
    assert_eq!(body["stock"]["ticker"], "AAPL");
    // Identical contribution timing over identical calendars.
    assert_eq!(
        body["benchmark"]["total_contributions"],
        body["stock"]["total_contributions"]
    );
}

#[tokio::test]
async fn comparison_with_a_late_listing_is_misaligned() {
    let (status, body) = get(&format!(
        "/api/v1/simulate/compare?{}&ticker=TSLA",
        FULL_2020
    ))
    .await;
    assert_eq!(status, 200);

    // TSLA's fixture only covers Jul-Dec, so the trajectories are
    // label-keyed, not point-for-point comparable.
    assert_eq!(body["calendars_aligned"], false);
    assert_eq!(body["benchmark"]["trajectory"].as_array().unwrap().len(), 12);
    assert_eq!(body["stock"]["trajectory"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn comparison_requires_a_ticker() {
    let (status, _) = get(&format!("/api/v1/simulate/compare?{}", FULL_2020)).await;
    assert_eq!(status, 400);
}
