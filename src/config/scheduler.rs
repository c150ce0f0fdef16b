//! Scheduled publishing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::AuthorId;

const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Scheduled publishing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Run the background publish loop in this process
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between publish passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Recorded as the creator of snapshots taken by the worker
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl SchedulerConfig {
    /// Get the interval as Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// The worker's actor as a typed id
    pub fn actor_id(&self) -> Result<AuthorId, ValidationError> {
        AuthorId::new(self.actor.clone()).map_err(|_| ValidationError::EmptySchedulerActor)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 || self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ValidationError::InvalidSchedulerInterval);
        }
        self.actor_id()?;
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval_secs(),
            actor: default_actor(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    60
}

fn default_actor() -> String {
    AuthorId::scheduler().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_defaults() {
        let config = SchedulerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.actor_id().unwrap(), AuthorId::scheduler());
    }

    #[test]
    fn test_interval_bounds() {
        let config = SchedulerConfig {
            interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SchedulerConfig {
            interval_secs: MAX_INTERVAL_SECS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_actor_rejected() {
        let config = SchedulerConfig {
            actor: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptySchedulerActor)
        ));
    }
}
