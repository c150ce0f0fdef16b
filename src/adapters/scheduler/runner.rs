//! ScheduledPublishRunner - Background loop that triggers the publish worker.
//!
//! The HTTP endpoint is the primary trigger for scheduled publishing. This
//! runner is the in-process alternative for deployments without an external
//! cron: it invokes the same handler on a fixed cadence.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | How often to look for due items |
//!
//! ## Graceful Shutdown
//!
//! The runner listens for a shutdown signal and finishes the run in progress
//! before stopping. No final run is made on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::application::handlers::{
    PublishDueItemsCommand, PublishDueItemsHandler, PublishRunSummary,
};
use crate::domain::content::ContentError;

/// Configuration for the ScheduledPublishRunner.
#[derive(Debug, Clone)]
pub struct ScheduledPublishRunnerConfig {
    /// How often to run the worker.
    pub interval: Duration,
}

impl Default for ScheduledPublishRunnerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

impl ScheduledPublishRunnerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background service that runs the scheduled publish worker periodically.
pub struct ScheduledPublishRunner {
    handler: Arc<PublishDueItemsHandler>,
    config: ScheduledPublishRunnerConfig,
}

impl ScheduledPublishRunner {
    pub fn new(handler: Arc<PublishDueItemsHandler>) -> Self {
        Self {
            handler,
            config: ScheduledPublishRunnerConfig::default(),
        }
    }

    pub fn with_config(
        handler: Arc<PublishDueItemsHandler>,
        config: ScheduledPublishRunnerConfig,
    ) -> Self {
        Self { handler, config }
    }

    /// Run until the shutdown signal flips to `true`.
    ///
    /// Failed runs are logged and retried on the next tick; they never stop
    /// the loop.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Scheduled publish runner started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Scheduled publish runner stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Scheduled publish run failed");
                    }
                }
            }
        }
    }

    /// Run exactly one worker invocation.
    pub async fn run_once(&self) -> Result<PublishRunSummary, ContentError> {
        self.handler.handle(PublishDueItemsCommand::now()).await
    }
}
