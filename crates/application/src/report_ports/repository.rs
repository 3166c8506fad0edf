use async_trait::async_trait;
use civicdesk_core::AppResult;
use civicdesk_domain::{Report, ReportId, UpdateRecord};

/// Repository port for reports and their append-only update history.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persists a newly filed report.
    async fn create_report(&self, report: &Report) -> AppResult<()>;

    /// Returns one report by identifier.
    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<Report>>;

    /// Persists a mutated report together with its transition update record.
    ///
    /// Both writes commit atomically: either the status mutation and the
    /// audit append both persist, or neither does.
    async fn save_transition(&self, report: &Report, update: &UpdateRecord) -> AppResult<()>;

    /// Lists one report's update records in transition order.
    async fn list_update_records(&self, report_id: ReportId) -> AppResult<Vec<UpdateRecord>>;
}
