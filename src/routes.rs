// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::instruments::{get_instruments, get_metadata};
use crate::handlers::simulate::{get_comparison, get_simulation};
use crate::services::store::SeriesStore;

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<SeriesStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let instruments_route = warp::path!("api" / "v1" / "instruments")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_instruments);

    let metadata_route = warp::path!("api" / "v1" / "metadata")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_metadata);

    let simulate_route = warp::path!("api" / "v1" / "simulate")
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(get_simulation);

    let compare_route = warp::path!("api" / "v1" / "simulate" / "compare")
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(get_comparison);

    info!("All routes configured successfully.");

    instruments_route
        .or(metadata_route)
        .or(compare_route)
        .or(simulate_route)
        .recover(handle_rejection)
}
