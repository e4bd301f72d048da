// src/services/store.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::models::{MonthlyReturn, SeriesMetadata, StockInfo};

const BENCHMARK_DATA_FILE: &str = "sp500-data.json";
const BENCHMARK_METADATA_FILE: &str = "sp500-metadata.json";
const STOCKS_DIR: &str = "stocks";
const STOCK_INDEX_FILE: &str = "index.json";

/// Immutable snapshot of every return series the fixtures directory
/// provides: the S&P 500 benchmark plus one series per listed stock.
///
/// Loaded once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards, so the engine can borrow series straight out of it.
pub struct SeriesStore {
    benchmark: Vec<MonthlyReturn>,
    metadata: SeriesMetadata,
    stocks: Vec<StockInfo>,
    stock_series: HashMap<String, Vec<MonthlyReturn>>,
}

impl SeriesStore {
    /// Load all fixtures from `data_dir`.
    ///
    /// The benchmark data and metadata files are mandatory. The stock
    /// index is optional (no comparison instruments without it), and a
    /// listed stock whose data file is missing or unparsable is skipped
    /// with a warning and dropped from the served index.
    pub fn load(data_dir: &Path) -> Result<Self> {
        info!("Loading return series fixtures from {:?}", data_dir);

        let benchmark = load_series(&data_dir.join(BENCHMARK_DATA_FILE), "sp500")?;
        let metadata: SeriesMetadata = read_json(&data_dir.join(BENCHMARK_METADATA_FILE))
            .context("benchmark metadata")?;
        info!(
            "Loaded benchmark series: {} months ({} to {}), source: {}",
            benchmark.len(),
            benchmark.first().map(MonthlyReturn::label).unwrap_or_default(),
            benchmark.last().map(MonthlyReturn::label).unwrap_or_default(),
            metadata.data_source,
        );

        let stocks_dir = data_dir.join(STOCKS_DIR);
        let index_path = stocks_dir.join(STOCK_INDEX_FILE);
        let listed: Vec<StockInfo> = if index_path.exists() {
            read_json(&index_path).context("stock index")?
        } else {
            warn!("No stock index at {:?}, comparison disabled", index_path);
            Vec::new()
        };

        let mut stocks = Vec::with_capacity(listed.len());
        let mut stock_series = HashMap::new();
        for stock in listed {
            let path = stocks_dir.join(format!("{}-data.json", stock.ticker));
            match load_series(&path, &stock.ticker) {
                Ok(series) => {
                    stock_series.insert(stock.ticker.clone(), series);
                    stocks.push(stock);
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", stock.ticker, e);
                }
            }
        }
        info!("Loaded {} stock series", stocks.len());

        Ok(Self {
            benchmark,
            metadata,
            stocks,
            stock_series,
        })
    }

    pub fn benchmark(&self) -> &[MonthlyReturn] {
        &self.benchmark
    }

    pub fn metadata(&self) -> &SeriesMetadata {
        &self.metadata
    }

    /// The stocks that actually have a loaded series, in index order.
    pub fn stocks(&self) -> &[StockInfo] {
        &self.stocks
    }

    pub fn stock(&self, ticker: &str) -> Option<&[MonthlyReturn]> {
        self.stock_series.get(ticker).map(Vec::as_slice)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path))
}

/// Read one series file and establish the ordering the engine assumes:
/// sorted by date key, one observation per (year, month). The fixtures
/// are written sorted, so the sort is normally a no-op; duplicates are
/// dropped keeping the first occurrence.
fn load_series(path: &Path, name: &str) -> Result<Vec<MonthlyReturn>> {
    let mut series: Vec<MonthlyReturn> = read_json(path)?;

    if !series.windows(2).all(|w| w[0].date_key() < w[1].date_key()) {
        warn!("Series {} is not strictly ordered, normalizing", name);
        series.sort_by_key(MonthlyReturn::date_key);
        let before = series.len();
        series.dedup_by_key(|obs| obs.date_key());
        if series.len() < before {
            warn!(
                "Series {}: dropped {} duplicate month(s)",
                name,
                before - series.len()
            );
        }
    }

    Ok(series)
}
