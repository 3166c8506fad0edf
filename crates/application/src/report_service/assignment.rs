use chrono::Utc;
use civicdesk_core::{ActorIdentity, ActorRole};
use civicdesk_domain::{Report, ReportId, ReportWorkflowError, StaffId};
use tracing::info;

use crate::report_ports::ReportNotification;

use super::{ReportService, ReportServiceResult};

impl ReportService {
    /// Assigns an open report to a staff member.
    ///
    /// The target must resolve in the staff directory; the assignment
    /// notification is fire-and-forget and never rolls back the transition.
    pub async fn assign_to_staff(
        &self,
        actor: &ActorIdentity,
        report_id: ReportId,
        staff_id: StaffId,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Admin)?;

        let staff = self
            .staff_directory
            .find_staff(staff_id)
            .await?
            .ok_or(ReportWorkflowError::UnknownStaff { staff_id })?;

        let _guard = self.locks.acquire(report_id).await;
        let mut report = self.load_report(report_id).await?;
        let update = report.assign(&staff, actor, Utc::now())?;
        self.repository.save_transition(&report, &update).await?;

        info!(
            report_id = %report.id(),
            staff_id = %staff.id(),
            "report assigned"
        );

        self.notify(ReportNotification::Assigned {
            report_id,
            staff_id,
            staff_display_name: staff.display_name().to_owned(),
        })
        .await;

        Ok(report)
    }
}
