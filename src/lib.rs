//! TRADEUP — trade-up contract opportunity scanner
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod storage;
pub mod strategy;
pub mod types;

pub use strategy::compute_trade_up_opportunities;
