// src/pool/counter.rs
// =============================================================================
// A countdown that starts at the number of dispatched items and is decremented
// once per finished item. wait() resolves when it reaches zero.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

#[derive(Debug)]
pub struct CompletionCounter {
    remaining: AtomicUsize,
    zero: Notify,
}

impl CompletionCounter {
    pub fn new(total: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(total),
            zero: Notify::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    // Marks one item as finished
    pub fn done(&self) {
        let before = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        if before == Ok(1) {
            self.zero.notify_waiters();
        }
    }

    // Resolves once every item has called done()
    pub async fn wait(&self) {
        loop {
            // register before checking, so a notify in between is not lost
            let notified = self.zero.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }
}
