pub mod advice;
pub mod competitive;

pub use competitive::{analyze, analyze_filtered, percentile_rank, pricing_power_score};
