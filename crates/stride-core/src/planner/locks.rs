//! Per-plan write locks.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per plan id.
///
/// Writers hold a plan's guard from load to commit, so a matcher call that
/// suspends mid-operation cannot interleave with another write to the same
/// plan. Different plans proceed independently.
#[derive(Debug, Default)]
pub(crate) struct PlanLocks {
    locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl PlanLocks {
    /// Waits for and returns the write guard of a plan.
    pub(crate) async fn lock(&self, plan_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(plan_id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_plan_waits_other_plans_do_not() {
        let locks = Arc::new(PlanLocks::default());
        let guard = locks.lock(1).await;

        // A different plan is free.
        let other = tokio::time::timeout(Duration::from_millis(50), locks.lock(2)).await;
        assert!(other.is_ok());

        let waiting = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(1).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("lock released")
            .expect("task finished");
    }
}
