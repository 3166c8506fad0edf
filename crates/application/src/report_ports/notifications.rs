use async_trait::async_trait;
use civicdesk_core::AppResult;
use civicdesk_domain::{ReportId, StaffId};
use serde::Serialize;

/// Transition event published to counterparties.
///
/// Delivery is best-effort: a failed dispatch is logged and never rolls
/// back the transition that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportNotification {
    /// A report was assigned to a staff member.
    Assigned {
        /// Report that was assigned.
        report_id: ReportId,
        /// Staff member the report was assigned to.
        staff_id: StaffId,
        /// Display name for human-readable notification bodies.
        staff_display_name: String,
    },
    /// Assigned staff submitted on-site resolution proof.
    ProofSubmitted {
        /// Report the proof belongs to.
        report_id: ReportId,
        /// Staff member who submitted the proof.
        staff_id: StaffId,
    },
    /// The reporting citizen confirmed the fix.
    Resolved {
        /// Report that was resolved.
        report_id: ReportId,
    },
    /// The reporting citizen rejected the claimed fix.
    Reopened {
        /// Report that went back to in-progress.
        report_id: ReportId,
        /// Optional citizen comment explaining the rejection.
        comment: Option<String>,
    },
    /// An administrator force-closed the report.
    Closed {
        /// Report that was closed.
        report_id: ReportId,
    },
}

impl ReportNotification {
    /// Returns a stable event type value.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Assigned { .. } => "report.assigned",
            Self::ProofSubmitted { .. } => "report.proof_submitted",
            Self::Resolved { .. } => "report.resolved",
            Self::Reopened { .. } => "report.reopened",
            Self::Closed { .. } => "report.closed",
        }
    }

    /// Returns the report the event belongs to.
    #[must_use]
    pub fn report_id(&self) -> ReportId {
        match self {
            Self::Assigned { report_id, .. }
            | Self::ProofSubmitted { report_id, .. }
            | Self::Resolved { report_id }
            | Self::Reopened { report_id, .. }
            | Self::Closed { report_id } => *report_id,
        }
    }
}

/// Dispatch port informing counterparties of report transitions.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers one transition notification.
    async fn dispatch(&self, notification: ReportNotification) -> AppResult<()>;
}
