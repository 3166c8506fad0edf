use chrono::Utc;
use civicdesk_core::{ActorIdentity, ActorRole};
use civicdesk_domain::{PositionClaim, Report, ReportId, StaffId};
use tracing::info;

use crate::report_ports::ReportNotification;

use super::{ReportService, ReportServiceResult};

impl ReportService {
    /// Accepts on-site resolution proof from the assigned staff member.
    ///
    /// The position claim is evaluated against the report's recorded
    /// coordinates before the state machine runs; a failed check surfaces
    /// the verdict and measured accuracy/distance with no state mutation.
    pub async fn submit_resolution_proof(
        &self,
        actor: &ActorIdentity,
        report_id: ReportId,
        claim: PositionClaim,
        proof_image_ref: &str,
    ) -> ReportServiceResult<Report> {
        Self::require_role(actor, ActorRole::Staff)?;
        let staff_id = StaffId::from_subject(actor.subject())?;

        let _guard = self.locks.acquire(report_id).await;
        let mut report = self.load_report(report_id).await?;

        let geofence = self.geofence_policy.evaluate(&claim, report.coordinates());
        let update = report.submit_proof(staff_id, proof_image_ref, &geofence, actor, Utc::now())?;
        self.repository.save_transition(&report, &update).await?;

        info!(
            report_id = %report.id(),
            staff_id = %staff_id,
            distance_meters = geofence.distance_meters(),
            "resolution proof accepted"
        );

        self.notify(ReportNotification::ProofSubmitted {
            report_id,
            staff_id,
        })
        .await;

        Ok(report)
    }
}
