use chrono::Utc;
use civicdesk_core::{ActorIdentity, ActorRole};
use civicdesk_domain::{NewReportInput, Report};
use tracing::info;

use crate::report_ports::FileReportInput;

use super::{ReportService, ReportServiceResult};

impl ReportService {
    /// Files a new report in `Open` status at the intake boundary.
    ///
    /// Creation is not a transition, so no update record is written.
    pub async fn file_report(
        &self,
        actor: &ActorIdentity,
        input: FileReportInput,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Citizen)?;

        let FileReportInput {
            title,
            description,
            location,
            coordinates,
            citizen_evidence_ref,
        } = input;

        let report = Report::file(
            NewReportInput {
                title,
                description,
                location,
                coordinates,
                reported_by: actor.subject().to_owned(),
                citizen_evidence_ref,
            },
            Utc::now(),
        )?;

        self.repository.create_report(&report).await?;

        info!(report_id = %report.id(), "report filed");

        Ok(report)
    }
}
