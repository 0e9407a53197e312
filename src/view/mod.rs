//! Text rendering of the dashboard state.
//!
//! Missing or empty stats fields fall back to fixed literals so the display
//! never shows a blank value. The result panel appears only once a search
//! has succeeded.

use std::fmt;

use serde::Serialize;

use crate::models::SearchResult;
use crate::services::controller::DashboardState;

pub const TITLE: &str = "Learned Index (120M lookups/sec)";
pub const SPEED_PLACEHOLDER: &str = "Loading...";
pub const DEFAULT_SPEEDUP: &str = "10x";
pub const DEFAULT_DATASET: &str = "10M keys";
pub const INPUT_PLACEHOLDER: &str = "Enter key to search...";

/// Display-ready values derived from a [`DashboardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub speed: String,
    pub speedup: String,
    pub dataset: String,
    pub updated_at: Option<String>,
    pub search_input: String,
    pub result: Option<SearchResult>,
    pub search_error: Option<String>,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            speed: or_fallback(state.stats.speed.as_deref(), SPEED_PLACEHOLDER),
            speedup: or_fallback(state.stats.speedup.as_deref(), DEFAULT_SPEEDUP),
            dataset: or_fallback(state.stats.dataset.as_deref(), DEFAULT_DATASET),
            updated_at: state
                .stats_updated_at
                .map(|t| t.format("%H:%M:%S UTC").to_string()),
            search_input: state.search_input.clone(),
            result: state.search_result,
            search_error: state.search_error.clone(),
        }
    }
}

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f)?;

        writeln!(f, "Live Benchmarks")?;
        writeln!(f, "  {}", self.speed)?;
        writeln!(f, "  {} faster than B-tree", self.speedup)?;
        writeln!(f, "  Dataset: {}", self.dataset)?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "  Updated: {updated_at}")?;
        }
        writeln!(f)?;

        writeln!(f, "Live Search")?;
        if self.search_input.is_empty() {
            writeln!(f, "  > {INPUT_PLACEHOLDER}")?;
        } else {
            writeln!(f, "  > {}", self.search_input)?;
        }
        if let Some(result) = &self.result {
            writeln!(f, "  Key: {}", result.key)?;
            writeln!(f, "  Position: {}", result.position)?;
            writeln!(f, "  Found: {}", result.found_key)?;
        }
        if let Some(error) = &self.search_error {
            writeln!(f, "  Search failed: {error}")?;
        }

        Ok(())
    }
}
