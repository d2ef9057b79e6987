// src/main.rs
//! loadplan: 3D Container Loading Optimization Service
//!
//! A Rust service for solving the three-dimensional container loading
//! problem. Packs rectangular boxes into a container's voxel grid
//! considering:
//! - Weight limits and per-zone distribution
//! - Support/stability of stacked boxes
//! - Center-of-gravity balance

mod api;
mod config;
mod diagnostics;
mod driver;
mod engine;
mod evaluator;
mod formatter;
mod grid;
mod model;
mod ordering;
mod packer;
pub mod types;

use config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();
    let api_config = app_config.api.clone();
    let rch_config = app_config.rch.rch_config();

    println!("🚀 Packing Service starting...");
    api::start_api_server(api_config, rch_config).await;
}
