//! Background purge of reports that stayed received for longer than the
//! configured retention.

use crate::{
    config::sweeper::SweeperConfig,
    error::AppResult,
    store::ReportStore,
    utils::{now_utc, older_than},
};
use chrono::NaiveDateTime;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Delete every received report last touched before `threshold`.
///
/// Runs as one transaction: either all matching rows are removed or none
/// are. Returns the number of rows removed.
pub async fn purge_received_before(
    db: &DatabaseConnection,
    threshold: NaiveDateTime,
) -> AppResult<u64> {
    let txn = db.begin().await?;
    let store = ReportStore::new(&txn);

    let expired = store.find_expired_received(threshold).await?;
    let removed = expired.len() as u64;
    for report in expired {
        store.delete(report).await?;
    }

    txn.commit().await?;
    Ok(removed)
}

#[derive(Clone)]
pub struct ExpirySweeper {
    db: DatabaseConnection,
    config: SweeperConfig,
}

impl ExpirySweeper {
    pub fn new(db: DatabaseConnection, config: SweeperConfig) -> Self {
        Self { db, config }
    }

    /// Run one cycle against the current wall clock.
    pub async fn sweep_once(&self) -> AppResult<u64> {
        let threshold = older_than(now_utc(), self.config.retention);
        purge_received_before(&self.db, threshold).await
    }

    async fn run_cycle(&self) {
        match self.sweep_once().await {
            Ok(0) => debug!("Expiry sweep: nothing to purge"),
            Ok(removed) => info!("Expiry sweep: purged {} received reports", removed),
            // Rolled back; the next tick retries.
            Err(e) => error!("Expiry sweep failed: {}", e),
        }
    }

    /// Spawn the sweep loop. The first cycle runs immediately.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(
                "Starting expiry sweeper: interval {:?}, retention {:?}",
                self.config.interval, self.config.retention
            );

            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // A cycle that already started always runs to commit or
                // rollback before the stop signal is observed.
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => self.run_cycle().await,
                }
            }

            info!("Expiry sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running sweep loop. Dropping the handle also ends the loop.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop to exit and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Expiry sweeper task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let config = SweeperConfig::from_secs(3600, 30).unwrap();

        let handle = ExpirySweeper::new(db, config).start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        handle.stop().await;
    }

    #[tokio::test]
    async fn failed_cycle_does_not_kill_the_loop() {
        // No migrations: every cycle fails because the table is missing.
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let sweeper = ExpirySweeper::new(db, SweeperConfig::from_secs(1, 1).unwrap());
        assert!(sweeper.sweep_once().await.is_err());

        let handle = sweeper.start();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!handle.is_finished());
        handle.stop().await;
    }
}
