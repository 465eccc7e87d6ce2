//! Per-account nonce sequencing.
//!
//! The sequencer is seeded from the network on first use and then hands
//! out consecutive nonces locally. Any submission failure resets it so the
//! next reservation re-reads the pending count.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::blockchain::types::ClientResult;

/// Monotonic nonce counter shared by clones of a client.
#[derive(Debug, Clone, Default)]
pub struct NonceSequencer {
    next: Arc<Mutex<Option<u64>>>,
}

impl NonceSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next nonce, seeding from `fetch` when the counter is empty.
    ///
    /// The lock is held across the fetch so concurrent callers never seed twice.
    pub async fn reserve<F, Fut>(&self, fetch: F) -> ClientResult<u64>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<u64>>,
    {
        let mut next = self.next.lock().await;
        let nonce = match *next {
            Some(n) => n,
            None => fetch().await?,
        };
        *next = Some(nonce + 1);
        Ok(nonce)
    }

    /// Forget the local counter.
    pub async fn reset(&self) {
        *self.next.lock().await = None;
    }

    /// Next nonce that would be handed out, if seeded.
    pub async fn peek(&self) -> Option<u64> {
        *self.next.lock().await
    }
}
