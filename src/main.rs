use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use dotenv::dotenv;
use log::{error, info, warn};
use warp::Filter;

use growth_calc_backend::routes;
use growth_calc_backend::services::store::SeriesStore;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    // Get port from environment, default to 3030
    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    // Fixtures directory with the return series, default to ./data
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| {
        warn!("$DATA_DIR not set, defaulting to ./data");
        "data".to_string()
    });

    let store = match SeriesStore::load(Path::new(&data_dir)) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to load return series fixtures: {:#}", e);
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    // Set up routes
    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
