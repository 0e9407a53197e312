//! Wire types consumed from the learned-index service.

pub mod benchmark;
pub mod search;

pub use benchmark::BenchmarkStats;
pub use search::SearchResult;
