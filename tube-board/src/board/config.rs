//! Board configuration.

use std::time::Duration;

/// Configuration parameters for a departure board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Arrivals further away than this are dropped (seconds).
    /// Upstream occasionally reports far-future noise.
    pub countdown_ceiling_secs: i64,

    /// Maximum rows in each rendered list.
    pub max_rows: usize,

    /// Maximum times kept per grouped row.
    pub group_size: usize,
}

impl BoardConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(countdown_ceiling_secs: i64, max_rows: usize, group_size: usize) -> Self {
        Self {
            countdown_ceiling_secs,
            max_rows,
            group_size,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Returns the countdown ceiling as a Duration.
    pub fn countdown_ceiling(&self) -> Duration {
        Duration::from_secs(self.countdown_ceiling_secs.max(0) as u64)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            countdown_ceiling_secs: 3600, // 1 hour
            max_rows: 10,
            group_size: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BoardConfig::default();

        assert_eq!(config.countdown_ceiling_secs, 3600);
        assert_eq!(config.max_rows, 10);
        assert_eq!(config.group_size, 5);
        assert_eq!(config.countdown_ceiling(), Duration::from_secs(3600));
    }

    #[test]
    fn custom_config() {
        let config = BoardConfig::new(1800, 4, 3);

        assert_eq!(config.countdown_ceiling_secs, 1800);
        assert_eq!(config.max_rows, 4);
        assert_eq!(config.group_size, 3);
    }

    #[test]
    fn builder_methods() {
        let config = BoardConfig::default().with_max_rows(20).with_group_size(3);

        assert_eq!(config.max_rows, 20);
        assert_eq!(config.group_size, 3);
        assert_eq!(config.countdown_ceiling_secs, 3600);
    }
}
