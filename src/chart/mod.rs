//! Chart payloads: plotly.js figure documents built from the analysis views.

pub mod figure;
pub mod views;

pub use figure::Figure;
