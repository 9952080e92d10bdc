pub mod latency;
pub mod runner;

pub use latency::LatencyStats;
pub use runner::{best_match, BatchMatcher, TaggedCandidate};
