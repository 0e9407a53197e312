//! Benchmark statistics reported by the stats endpoint.

use serde::{Deserialize, Serialize};

/// Live benchmark statistics. Every field is optional; the service may also
/// send fields this dashboard does not display, which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub speedup: Option<String>,
    #[serde(default)]
    pub dataset: Option<String>,
}

impl BenchmarkStats {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.speed.is_none() && self.speedup.is_none() && self.dataset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload_and_ignores_status() {
        let body = r#"{"status":"ok","speed":"118.4M/sec","speedup":"10x","dataset":"10M keys"}"#;
        let stats: BenchmarkStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.speed.as_deref(), Some("118.4M/sec"));
        assert_eq!(stats.speedup.as_deref(), Some("10x"));
        assert_eq!(stats.dataset.as_deref(), Some("10M keys"));
    }

    #[test]
    fn missing_fields_are_none() {
        let stats: BenchmarkStats = serde_json::from_str(r#"{"speed":"5M/sec"}"#).unwrap();
        assert_eq!(stats.speed.as_deref(), Some("5M/sec"));
        assert!(stats.speedup.is_none());
        assert!(stats.dataset.is_none());
        assert!(!stats.is_empty());
    }

    #[test]
    fn empty_object_is_empty() {
        let stats: BenchmarkStats = serde_json::from_str("{}").unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats, BenchmarkStats::default());
    }

    #[test]
    fn non_string_field_is_rejected() {
        assert!(serde_json::from_str::<BenchmarkStats>(r#"{"speed":120}"#).is_err());
    }
}
