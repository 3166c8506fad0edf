use chrono::Utc;
use civicdesk_core::{ActorIdentity, ActorRole};
use civicdesk_domain::{Report, ReportId};
use tracing::info;

use crate::report_ports::ReportNotification;

use super::{ReportService, ReportServiceResult};

impl ReportService {
    /// Confirms the fix on behalf of the reporting citizen, resolving the
    /// report.
    pub async fn confirm_resolution(
        &self,
        actor: &ActorIdentity,
        report_id: ReportId,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Citizen)?;

        let _guard = self.locks.acquire(report_id).await;
        let mut report = self.load_report(report_id).await?;
        let update = report.citizen_verify(actor, Utc::now())?;
        self.repository.save_transition(&report, &update).await?;

        info!(report_id = %report.id(), "report resolved by citizen confirmation");

        self.notify(ReportNotification::Resolved { report_id }).await;

        Ok(report)
    }

    /// Rejects the claimed fix on behalf of the reporting citizen,
    /// re-opening the report for the assigned staff member.
    pub async fn reject_resolution(
        &self,
        actor: &ActorIdentity,
        report_id: ReportId,
        comment: Option<String>,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Citizen)?;

        let _guard = self.locks.acquire(report_id).await;
        let mut report = self.load_report(report_id).await?;
        let update = report.citizen_reject(actor, comment, Utc::now())?;
        self.repository.save_transition(&report, &update).await?;

        info!(report_id = %report.id(), "resolution rejected by citizen");

        self.notify(ReportNotification::Reopened {
            report_id,
            comment: update.comment().map(ToOwned::to_owned),
        })
        .await;

        Ok(report)
    }

    /// Closes a report by administrative override, bypassing geofence and
    /// citizen checks entirely. Escalation path.
    pub async fn force_close(
        &self,
        actor: &ActorIdentity,
        report_id: ReportId,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Admin)?;

        let _guard = self.locks.acquire(report_id).await;
        let mut report = self.load_report(report_id).await?;
        let update = report.admin_close(actor, Utc::now())?;
        self.repository.save_transition(&report, &update).await?;

        info!(report_id = %report.id(), "report force-closed by administrator");

        self.notify(ReportNotification::Closed { report_id }).await;

        Ok(report)
    }
}
