//! Scheduled publishing background service.

mod runner;

pub use runner::{ScheduledPublishRunner, ScheduledPublishRunnerConfig};
