use civicdesk_domain::{Report, ReportId, UpdateRecord};

use super::{ReportService, ReportServiceResult};

impl ReportService {
    /// Returns one report's current state.
    pub async fn get_report(&self, report_id: ReportId) -> ReportServiceResult<Report> {
        self.load_report(report_id).await
    }

    /// Returns one report's full update history in transition order.
    ///
    /// The ordered sequence reconstructs the report's complete status
    /// history.
    pub async fn list_updates(
        &self,
        report_id: ReportId,
    ) -> ReportServiceResult<Vec<UpdateRecord>> {
        self.load_report(report_id).await?;

        Ok(self.repository.list_update_records(report_id).await?)
    }
}
