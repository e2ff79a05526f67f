use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use mastery_core::cluster::Subject;

/// Per-(user, subject) serialization. Two concurrent messages in the same
/// subject would otherwise both read the same cluster snapshot, both decide
/// "no match", and create duplicate clusters; holding the guard across the
/// read-modify-write span makes that race impossible. Different users (or
/// different subjects of one user) never contend.
pub(crate) struct UserSubjectLocks {
    inner: DashMap<(i64, Subject), Arc<Mutex<()>>>,
}

impl UserSubjectLocks {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Acquire the lock for one (user, subject) pair. The map entry is
    /// cloned out before awaiting so no DashMap shard lock is held across
    /// the suspension point.
    pub async fn acquire(&self, user_id: i64, subject: Subject) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .entry((user_id, subject))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
