// src/pool/worker.rs
// =============================================================================
// A bounded worker pool.
//
// How it works:
// 1. Spawn `workers` tasks up front, all pulling from one intake channel
// 2. Send the items in order. The channel holds a single item, so the sender
//    waits whenever no worker is free. That bounds both memory and
//    concurrency
// 3. Every finished item decrements a shared CompletionCounter, whether the
//    handler returned normally or panicked
// 4. Close the channel, wait for the counter to hit zero, join the workers
//
// Every item yields exactly one outcome: Ok(result), or Err(item) when its
// handler panicked. Items are started in order but may finish in any order,
// and outcomes come back grouped by worker, not in dispatch order.
// =============================================================================

use super::counter::CompletionCounter;
use futures::future::join_all;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error};

/// Pool size when none is given on the command line.
pub const DEFAULT_WORKERS: usize = 10;

type Intake<T> = Arc<Mutex<mpsc::Receiver<T>>>;

// Runs `handler` once for every item, at most `workers` at a time
//
// Parameters:
//   items: the work, dispatched in this order
//   workers: pool size (0 is treated as 1)
//   handler: async function called with each item
//
// Returns: one outcome per item, Err(item) for the ones that panicked
pub async fn run_pool<T, R, F, Fut>(items: Vec<T>, workers: usize, handler: F) -> Vec<Result<R, T>>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let workers = workers.max(1);
    let counter = Arc::new(CompletionCounter::new(items.len()));
    let handler = Arc::new(handler);
    // tokio channels need room for at least one item, so a single item can
    // wait in the buffer while every worker is busy
    let (tx, rx) = mpsc::channel(1);
    let intake: Intake<T> = Arc::new(Mutex::new(rx));

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            tokio::spawn(worker_loop(
                id,
                Arc::clone(&intake),
                Arc::clone(&handler),
                Arc::clone(&counter),
            ))
        })
        .collect();

    let mut undelivered = Vec::new();
    let mut items = items.into_iter();
    while let Some(item) = items.next() {
        if let Err(mpsc::error::SendError(item)) = tx.send(item).await {
            // every worker is gone; account for what was never handed out
            error!(undelivered = items.len() + 1, "worker pool closed early");
            undelivered.push(Err(item));
            undelivered.extend(items.by_ref().map(Err));
            for _ in 0..undelivered.len() {
                counter.done();
            }
            break;
        }
    }
    drop(tx);

    counter.wait().await;

    let mut results = undelivered;
    for joined in join_all(handles).await {
        match joined {
            Ok(batch) => results.extend(batch),
            Err(err) => error!(error = %err, "worker task failed"),
        }
    }
    results
}

async fn worker_loop<T, R, F, Fut>(
    id: usize,
    intake: Intake<T>,
    handler: Arc<F>,
    counter: Arc<CompletionCounter>,
) -> Vec<Result<R, T>>
where
    T: Clone,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut results = Vec::new();

    loop {
        let next = intake.lock().await.recv().await;
        let Some(item) = next else { break };

        let kept = item.clone();
        let outcome = AssertUnwindSafe(async { handler(item).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(result) => results.push(Ok(result)),
            Err(_) => {
                error!(worker = id, "work item panicked");
                results.push(Err(kept));
            }
        }
        counter.done();
    }

    debug!(worker = id, handled = results.len(), "worker finished");
    results
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Mutex<Receiver>>?
//    - An mpsc channel has exactly one receiver
//    - Wrapping it in Arc<Mutex<..>> lets every worker take turns pulling
//    - The lock is only held while waiting for the next item, not while
//      the item is processed
//
// 2. What does dropping `tx` do?
//    - Closes the channel once the buffered item is taken
//    - recv() then returns None and each worker leaves its loop
//
// 3. Why catch_unwind?
//    - A panic inside a spawned task would end that worker silently
//    - Catching it lets us count the item as done and keep the worker alive
//    - AssertUnwindSafe is required because futures are not UnwindSafe
//
// 4. What is `let Some(item) = next else { break };`?
//    - let-else: bind on match, otherwise run the else block (which must
//      leave the current scope)
// -----------------------------------------------------------------------------
