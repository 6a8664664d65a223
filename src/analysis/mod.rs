//! Derived views over a [`CleanDataset`](crate::data::model::CleanDataset).
//!
//! Every function here is pure: it takes the cleaned dataset (or a view of
//! it) explicitly and returns a fresh value.

pub mod binning;
pub mod brands;
pub mod regression;
