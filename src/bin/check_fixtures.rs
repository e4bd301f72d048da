// src/bin/check_fixtures.rs
//
// Standalone sanity check for the return series fixtures: prints each
// series' month count and date range, and flags out-of-order or
// duplicate months in the raw files before the store normalizes them.
use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dotenv::dotenv;

use growth_calc_backend::models::{MonthlyReturn, StockInfo};

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data_dir = Path::new(&data_dir);
    println!("Checking fixtures in {:?}", data_dir);

    check_series(&data_dir.join("sp500-data.json"), "^GSPC")?;

    let index_path = data_dir.join("stocks/index.json");
    if !index_path.exists() {
        println!("No stock index at {:?}", index_path);
        return Ok(());
    }

    let stocks: Vec<StockInfo> = serde_json::from_str(
        &fs::read_to_string(&index_path).with_context(|| format!("reading {:?}", index_path))?,
    )
    .context("parsing stock index")?;
    println!("Stock index lists {} tickers", stocks.len());

    for stock in &stocks {
        let path = data_dir.join(format!("stocks/{}-data.json", stock.ticker));
        if let Err(e) = check_series(&path, &stock.ticker) {
            println!("  ✗ {}: {:#}", stock.ticker, e);
        }
    }

    Ok(())
}

fn check_series(path: &Path, name: &str) -> Result<()> {
    let series: Vec<MonthlyReturn> = serde_json::from_str(
        &fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?,
    )
    .with_context(|| format!("parsing {:?}", path))?;

    let first = series.first().context("series is empty")?;
    let last = series.last().context("series is empty")?;

    let out_of_order = series
        .windows(2)
        .filter(|w| w[0].date_key() > w[1].date_key())
        .count();
    let duplicates = series
        .windows(2)
        .filter(|w| w[0].date_key() == w[1].date_key())
        .count();

    print!(
        "  {} — {} months, {} to {}",
        name,
        series.len(),
        first.label(),
        last.label()
    );
    if out_of_order > 0 || duplicates > 0 {
        println!(
            "  [{} out-of-order, {} duplicate month(s)]",
            out_of_order, duplicates
        );
    } else {
        println!();
    }

    Ok(())
}
