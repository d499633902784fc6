//! overhead-cli - operational cost tracking and HPP calculation
//!
//! Tracks the recurring monthly costs of a small food business, allocates
//! them over output as overhead per unit, and composes cost of goods (HPP)
//! and selling prices from material, labor and overhead.
//!
//! # Architecture
//!
//! - `engine`: pure calculations (aggregation, allocation, HPP, material cost, recompute)
//! - `models`: cost records, allocation settings, pricing rules, money
//! - `storage`: JSON file storage with atomic writes
//! - `services`: validation, persistence and audit on top of storage
//! - `audit`: append-only change log
//! - `config`: paths and user settings
//! - `export`, `display`, `cli`: outer surfaces
//!
//! # Example
//!
//! ```
//! use overhead_cli::engine::compose_hpp;
//! use overhead_cli::models::PricingRule;
//!
//! let result = compose_hpp(4200.0, 1667.0, 2063.0, &PricingRule::markup(35.0)).unwrap();
//! assert_eq!(result.rounded().selling_price.units(), 10_706);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CostError, CostResult};
