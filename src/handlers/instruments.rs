// src/handlers/instruments.rs
use std::sync::Arc;

use log::info;
use serde_json::json;
use warp::Rejection;

use crate::services::store::SeriesStore;

/// Everything the frontend needs to populate its pickers: the benchmark
/// date range and the list of comparison stocks with data on disk.
pub async fn get_instruments(store: Arc<SeriesStore>) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request for available instruments");

    let metadata = store.metadata();
    Ok(warp::reply::json(&json!({
        "benchmark": {
            "dataSource": metadata.data_source,
            "dateRange": metadata.date_range,
        },
        "stocks": store.stocks(),
    })))
}

pub async fn get_metadata(store: Arc<SeriesStore>) -> Result<impl warp::Reply, Rejection> {
    info!("Handling request for benchmark metadata");
    Ok(warp::reply::json(store.metadata()))
}
