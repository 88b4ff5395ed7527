use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Search limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Phase-1 depth bounds are tried in `heuristic..phase1_max_depth`.
    pub phase1_max_depth: u8,
    /// Phase-2 depth bounds are tried in `heuristic..phase2_max_depth`.
    pub phase2_max_depth: u8,
    /// Give up once this many milliseconds have passed. No limit when unset.
    pub time_limit_ms: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            phase1_max_depth: 20,
            phase2_max_depth: 11,
            time_limit_ms: None,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(time_limit.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: SolverConfig = toml::from_str("time_limit_ms = 1500").unwrap();
        assert_eq!(config.phase1_max_depth, 20);
        assert_eq!(config.phase2_max_depth, 11);
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn empty_toml_is_default() {
        let config: SolverConfig = toml::from_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let config = SolverConfig::default().with_time_limit(Duration::from_secs(2));
        let text = toml::to_string(&config).unwrap();
        assert_eq!(toml::from_str::<SolverConfig>(&text).unwrap(), config);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config: SolverConfig = toml::from_str("phase2_max_depth = 9\nthreads = 4").unwrap();
        assert_eq!(config.phase2_max_depth, 9);
    }
}
