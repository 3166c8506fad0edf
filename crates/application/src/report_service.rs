use std::sync::Arc;

use civicdesk_core::{ActorIdentity, ActorRole, AppError};
use civicdesk_domain::{GeofencePolicy, Report, ReportId, ReportWorkflowError};
use thiserror::Error;
use tracing::warn;

use crate::report_locks::ReportLockRegistry;
use crate::report_ports::{
    NotificationDispatcher, ReportNotification, ReportRepository, StaffDirectory,
};

mod assignment;
mod history;
mod intake;
mod resolution;
mod verdicts;

/// Errors returned by the report workflow orchestrator.
#[derive(Debug, Error)]
pub enum ReportServiceError {
    /// Typed workflow guard failure carrying structured rejection data.
    #[error(transparent)]
    Workflow(#[from] ReportWorkflowError),

    /// Authorization, validation or infrastructure failure.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Result type returned by the report workflow orchestrator.
pub type ReportServiceResult<T> = Result<T, ReportServiceError>;

/// Use-case layer composing the lifecycle state machine with the geofence
/// verifier and the external collaborators.
///
/// Every transition runs under the report's exclusive lock: load, guard,
/// transition and persist form one serialized sequence per report.
#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    staff_directory: Arc<dyn StaffDirectory>,
    notifications: Arc<dyn NotificationDispatcher>,
    geofence_policy: GeofencePolicy,
    locks: ReportLockRegistry,
}

impl ReportService {
    /// Creates a report service with the production geofence thresholds.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        staff_directory: Arc<dyn StaffDirectory>,
        notifications: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            repository,
            staff_directory,
            notifications,
            geofence_policy: GeofencePolicy::default(),
            locks: ReportLockRegistry::new(),
        }
    }

    /// Overrides the geofence thresholds.
    #[must_use]
    pub fn with_geofence_policy(mut self, geofence_policy: GeofencePolicy) -> Self {
        self.geofence_policy = geofence_policy;
        self
    }

    fn require_role(actor: &ActorIdentity, role: ActorRole) -> ReportServiceResult<()> {
        if actor.role() != role {
            return Err(AppError::Forbidden(format!(
                "actor '{}' must hold the {} role for this action",
                actor.subject(),
                role.as_str()
            ))
            .into());
        }

        Ok(())
    }

    async fn load_report(&self, report_id: ReportId) -> ReportServiceResult<Report> {
        self.repository
            .find_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report '{report_id}' does not exist")).into())
    }

    async fn notify(&self, notification: ReportNotification) {
        let event_type = notification.event_type();
        let report_id = notification.report_id();

        if let Err(error) = self.notifications.dispatch(notification).await {
            warn!(
                error = %error,
                event_type = event_type,
                report_id = %report_id,
                "report notification dispatch failed"
            );
        }
    }
}
