//! Periodic reconciliation of unsynced rows to the mirror.
//!
//! The detached append after a reservation can fail; rows it misses keep a NULL
//! sync marker. This job sweeps them in bounded batches and re-appends, making the
//! mirror eventually consistent with the local store without ever blocking a
//! reservation.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    data::participant::ParticipantRepository,
    error::AppError,
    sheets::{MirrorRow, RemoteMirror},
};

/// Maximum rows re-appended per tick.
const SYNC_BATCH_SIZE: u64 = 50;

/// Every 30 seconds.
const SYNC_SCHEDULE: &str = "*/30 * * * * *";

/// Starts the reconciliation scheduler.
///
/// # Arguments
/// - `db` - Database connection handed to each tick
/// - `mirror` - Mirror client handed to each tick
///
/// # Returns
/// - `Ok(())` - Scheduler started
/// - `Err(AppError::SchedulerErr)` - Scheduler could not be created or started
pub async fn start_scheduler(
    db: DatabaseConnection,
    mirror: Arc<dyn RemoteMirror>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(Job::new_async(SYNC_SCHEDULE, move |_uuid, _lock| {
            let db = db.clone();
            let mirror = mirror.clone();
            Box::pin(async move {
                if let Err(err) = sync_pending(&db, mirror.as_ref()).await {
                    tracing::warn!("Mirror reconciliation tick failed: {}", err);
                }
            })
        })?)
        .await?;

    scheduler.start().await?;

    tracing::info!("Mirror reconciliation scheduled ({})", SYNC_SCHEDULE);

    Ok(())
}

/// Re-appends one batch of unsynced rows to the mirror.
///
/// Appends the whole batch in a single call, then marks every row in it as synced.
/// On append failure nothing is marked, so the same rows are retried next tick.
///
/// # Arguments
/// - `db` - Database connection
/// - `mirror` - Mirror client
///
/// # Returns
/// - `Ok(())` - Batch appended and marked, or nothing was pending
/// - `Err(AppError)` - Query, append or marker update failed
pub async fn sync_pending(
    db: &DatabaseConnection,
    mirror: &dyn RemoteMirror,
) -> Result<(), AppError> {
    let repo = ParticipantRepository::new(db);
    let pending = repo.get_unsynced_batch(SYNC_BATCH_SIZE).await?;

    if pending.is_empty() {
        return Ok(());
    }

    let rows: Vec<MirrorRow> = pending.iter().map(MirrorRow::from_participant).collect();
    mirror.append(&rows).await?;

    let ids: Vec<i32> = pending.iter().map(|participant| participant.id).collect();
    repo.mark_synced(&ids, chrono::Utc::now()).await?;

    tracing::info!("Reconciled {} row(s) to the mirror", ids.len());

    Ok(())
}
