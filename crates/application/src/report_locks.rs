use std::collections::HashMap;
use std::sync::Arc;

use civicdesk_domain::ReportId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// In-process lock registry serializing transitions per report.
///
/// The orchestrator holds a report's lock across the whole
/// load-guard-transition-persist sequence, so two concurrent actions on the
/// same report can never both observe the pre-transition status. Actions on
/// distinct reports proceed independently.
#[derive(Clone, Default)]
pub struct ReportLockRegistry {
    locks: Arc<Mutex<HashMap<ReportId, Arc<Mutex<()>>>>>,
}

impl ReportLockRegistry {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the exclusive lock for one report, creating it on first use.
    pub async fn acquire(&self, report_id: ReportId) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(report_id).or_default())
        };

        entry.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use civicdesk_domain::ReportId;

    use super::ReportLockRegistry;

    #[tokio::test]
    async fn lock_is_exclusive_per_report() {
        let registry = ReportLockRegistry::new();
        let report_id = ReportId::new();

        let guard = registry.acquire(report_id).await;

        let contended =
            tokio::time::timeout(Duration::from_millis(50), registry.acquire(report_id)).await;
        assert!(contended.is_err());

        drop(guard);

        let released =
            tokio::time::timeout(Duration::from_millis(50), registry.acquire(report_id)).await;
        assert!(released.is_ok());
    }

    #[tokio::test]
    async fn distinct_reports_do_not_contend() {
        let registry = ReportLockRegistry::new();

        let _left = registry.acquire(ReportId::new()).await;
        let right =
            tokio::time::timeout(Duration::from_millis(50), registry.acquire(ReportId::new()))
                .await;

        assert!(right.is_ok());
    }
}
