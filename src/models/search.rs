//! Point lookup result returned by the query endpoint.

use serde::{Deserialize, Serialize};

/// Outcome of a single key lookup against the learned index: the requested
/// key, the position the service reported and the key stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub key: u64,
    pub position: u64,
    pub found_key: u64,
}
