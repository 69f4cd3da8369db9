//! At-most-once processing of webhook updates within a TTL.
//!
//! The mark is a single `put_if_absent`. On the bundled stores that is one atomic step; on a
//! store that only offers plain get/put it degrades to check-then-set, and two deliveries of the
//! same update racing each other may both be processed. The cost of that is a duplicate reply.

use std::sync::Arc;
use std::time::Duration;
use storage::KvStore;
use tracing::{debug, warn};

pub const DEFAULT_DEDUP_TTL: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct DedupGuard {
    kv: Arc<dyn KvStore>,
    ttl: Duration,
}

impl DedupGuard {
    pub fn new(kv: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    /// True when this update id was already marked within the TTL. Marks it otherwise.
    ///
    /// A store failure answers `false`: processing twice beats dropping an update.
    pub async fn seen_recently(&self, update_id: i64) -> bool {
        let key = format!("dedup:{update_id}");
        match self.kv.put_if_absent(&key, "1", Some(self.ttl)).await {
            Ok(first) => {
                if !first {
                    debug!(update_id = update_id, "Duplicate update");
                }
                !first
            }
            Err(e) => {
                warn!(update_id = update_id, error = %e, "Dedup store failed, processing update");
                false
            }
        }
    }
}
