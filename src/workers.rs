use crate::jobs::ExpiryScanJob;
use fang::asynk::async_queue::{AsyncQueue, AsyncQueueable};
use fang::asynk::async_worker_pool::AsyncWorkerPool;
use fang::NoTls;

pub async fn start_worker_pool(database_url: &str) -> AsyncQueue<NoTls> {
    log::info!("Connecting to database for job queue");

    let max_pool_size: u32 = 3;
    let mut queue = AsyncQueue::builder()
        .uri(database_url.to_string())
        .max_pool_size(max_pool_size)
        .build();

    queue
        .connect(NoTls)
        .await
        .expect("Failed to connect to database for job queue");

    log::info!("Job queue connected successfully");

    let mut pool: AsyncWorkerPool<AsyncQueue<NoTls>> = AsyncWorkerPool::builder()
        .number_of_workers(5_u32)
        .queue(queue.clone())
        .build();

    log::info!("Starting worker pool with 5 workers");

    pool.start().await;

    if let Err(e) = queue.schedule_task(&ExpiryScanJob {}).await {
        log::warn!("Failed to schedule expiry scan: {:?}", e);
    }

    log::info!("Worker pool started successfully");

    queue
}
