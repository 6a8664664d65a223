//! E-commerce sales dashboard.
//!
//! Loads a product listing file, cleans its "quantity sold" column, derives
//! binned and per-brand views and serves seven plotly.js charts on one page.

pub mod analysis;
pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod server;
