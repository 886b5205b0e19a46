//! Periodic refresh scheduling.
//!
//! Every three hours, users whose last processing pass is older than the
//! refresh interval are pushed onto the refresh queue. The queue dedupes, so
//! a user still waiting from the previous sweep is not enqueued twice.

use chrono::Utc;
use fred::prelude::Pool;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::{data::user::UserRepository, error::Error, processor::queue::RefreshQueue};

const REFRESH_CRON: &str = "0 0 */3 * * *";
const REFRESH_INTERVAL_HOURS: i64 = 3;

/// Register and start the cron scheduler. The returned handle keeps the
/// scheduler alive; dropping it stops future runs.
pub async fn start_scheduler(
    db: &DatabaseConnection,
    redis_pool: &Pool,
) -> Result<JobScheduler, Error> {
    let sched = JobScheduler::new().await?;

    let db_clone = db.clone();
    let pool_clone = redis_pool.clone();

    sched
        .add(Job::new_async(REFRESH_CRON, move |_, _| {
            let db = db_clone.clone();
            let pool = pool_clone.clone();

            Box::pin(async move {
                match enqueue_due_users(&db, &pool).await {
                    Ok(count) => info!("enqueued {count} user refresh(es)"),
                    Err(err) => error!("failed to enqueue user refreshes: {err}"),
                }
            })
        })?)
        .await?;

    sched.start().await?;
    info!("refresh scheduler started");

    Ok(sched)
}

/// Enqueue every user who has never been processed or whose last pass is
/// older than the refresh interval. Returns the number enqueued.
pub async fn enqueue_due_users(db: &DatabaseConnection, redis_pool: &Pool) -> Result<usize, Error> {
    let cutoff = (Utc::now() - chrono::Duration::hours(REFRESH_INTERVAL_HOURS)).naive_utc();

    let due = UserRepository::new(db).due_for_refresh(cutoff).await?;
    let queue = RefreshQueue::new(redis_pool.clone());

    let count = due.len();
    for user in due {
        queue.push(user.id).await?;
    }

    Ok(count)
}
