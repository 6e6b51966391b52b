use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: default_grace_period_ms(),
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

impl QueueConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}

fn default_grace_period_ms() -> u64 {
    2000
}

fn default_pacing_delay_ms() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_queue_config() {
        let config = QueueConfig::default();
        assert_eq!(config.grace_period(), Duration::from_secs(2));
        assert_eq!(config.pacing_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_queue_config_partial_deserialization() {
        let yaml = r#"
pacing_delay_ms: 10
"#;
        let config: QueueConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.grace_period_ms, 2000); // default
        assert_eq!(config.pacing_delay_ms, 10); // specified
    }
}
