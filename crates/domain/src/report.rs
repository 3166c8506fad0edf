//! Report aggregate and its lifecycle state machine.
//!
//! All status mutations go through the transition methods on [`Report`].
//! Each method fully evaluates its guards before touching any field and, on
//! success, returns the [`UpdateRecord`] that must be persisted atomically
//! with the mutated report.

use chrono::{DateTime, Utc};
use civicdesk_core::{ActorIdentity, AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::geofence::{Coordinates, GeofenceCheckResult, GeofenceVerdict};
use crate::staff::{StaffId, StaffMember};

/// Unique identifier for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(Uuid);

impl ReportId {
    /// Creates a new random report identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a report identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Lifecycle status of a report.
///
/// `Open` is the unique initial status and is never re-entered once left;
/// `Closed` is the unique terminal status with no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Filed by a citizen, not yet assigned.
    Open,
    /// Assigned to a staff member who is working on it.
    InProgress,
    /// Staff submitted on-site resolution proof; awaiting the citizen.
    PendingVerification,
    /// The reporting citizen confirmed the fix.
    Resolved,
    /// Closed by administrative override.
    Closed,
}

impl ReportStatus {
    /// Returns the stable transport/storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "InProgress",
            Self::PendingVerification => "PendingVerification",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Open" => Ok(Self::Open),
            "InProgress" => Ok(Self::InProgress),
            "PendingVerification" => Ok(Self::PendingVerification),
            "Resolved" => Ok(Self::Resolved),
            "Closed" => Ok(Self::Closed),
            _ => Err(AppError::Validation(format!(
                "unknown report status value '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Lifecycle action attempted against a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    /// Administrator assigns the report to a staff member.
    Assign,
    /// Assigned staff submits on-site resolution proof.
    SubmitProof,
    /// The reporting citizen confirms the fix.
    CitizenVerify,
    /// The reporting citizen rejects the claimed fix.
    CitizenReject,
    /// Administrator closes the report without citizen confirmation.
    AdminClose,
}

impl ReportAction {
    /// Returns a stable value naming this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::SubmitProof => "submit_proof",
            Self::CitizenVerify => "citizen_verify",
            Self::CitizenReject => "citizen_reject",
            Self::AdminClose => "admin_close",
        }
    }
}

impl std::fmt::Display for ReportAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Typed guard failures of the report lifecycle workflow.
///
/// Every variant carries enough structure for a precise user-facing
/// message; none of them is retryable by the system itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportWorkflowError {
    /// The attempted action is not legal from the current status.
    #[error("action '{action}' is not allowed while the report is {status}")]
    InvalidTransition {
        /// Action that was attempted.
        action: ReportAction,
        /// Status the report was in at the time.
        status: ReportStatus,
    },

    /// A staff-gated action was attempted by a staff member other than the
    /// one assigned to the report.
    #[error("staff member '{staff_id}' is not assigned to this report")]
    NotAssignedStaff {
        /// Staff identifier that attempted the action.
        staff_id: StaffId,
    },

    /// A citizen-gated action was attempted by someone other than the
    /// citizen who filed the report.
    #[error("actor '{subject}' is not the citizen who filed this report")]
    NotOriginalCitizen {
        /// Subject claim of the rejected actor.
        subject: String,
    },

    /// The assignment target does not exist in the staff directory.
    #[error("staff member '{staff_id}' does not exist")]
    UnknownStaff {
        /// Staff identifier that failed directory resolution.
        staff_id: StaffId,
    },

    /// The position claim failed the accuracy or distance gate.
    #[error("location check failed: {result}")]
    GeofenceRejected {
        /// The failing check result, with measured accuracy and distance.
        result: GeofenceCheckResult,
    },

    /// Proof submission was attempted without an image reference.
    #[error("a proof photo reference is required to submit resolution proof")]
    MissingProofArtifact,
}

/// Append-only audit entry recording one successful transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    report_id: ReportId,
    status: ReportStatus,
    comment: Option<String>,
    actor_subject: String,
    recorded_at: DateTime<Utc>,
}

impl UpdateRecord {
    /// Creates an update record; blank comments are normalized away.
    #[must_use]
    pub fn new(
        report_id: ReportId,
        status: ReportStatus,
        comment: Option<String>,
        actor_subject: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let comment = comment.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Self {
            report_id,
            status,
            comment,
            actor_subject: actor_subject.into(),
            recorded_at,
        }
    }

    /// Returns the report this record belongs to.
    #[must_use]
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Returns the status the report entered with this transition.
    #[must_use]
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns the optional free-text comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the subject of the actor who triggered the transition.
    #[must_use]
    pub fn actor_subject(&self) -> &str {
        self.actor_subject.as_str()
    }

    /// Returns the transition timestamp.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Input payload used to file a new report at the intake boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReportInput {
    /// Short issue title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Human-readable location of the issue.
    pub location: String,
    /// Optional captured device coordinates of the issue.
    pub coordinates: Option<Coordinates>,
    /// Subject claim of the filing citizen.
    pub reported_by: String,
    /// Optional opaque reference to a citizen evidence image.
    pub citizen_evidence_ref: Option<String>,
}

/// Storage-shaped view of a report used for persistence and rehydration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSnapshot {
    /// Report identifier.
    pub id: ReportId,
    /// Short issue title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Human-readable location of the issue.
    pub location: String,
    /// Optional captured coordinates of the issue.
    pub coordinates: Option<Coordinates>,
    /// Subject claim of the filing citizen.
    pub reported_by: String,
    /// Current lifecycle status.
    pub status: ReportStatus,
    /// Assigned staff member, when any.
    pub assigned_staff_id: Option<StaffId>,
    /// Opaque reference to the citizen evidence image, when any.
    pub citizen_evidence_ref: Option<String>,
    /// Opaque reference to the staff proof image, when any.
    pub staff_proof_ref: Option<String>,
    /// Filing timestamp.
    pub created_at: DateTime<Utc>,
}

/// A citizen-submitted municipal issue report.
///
/// Mutated exclusively through the transition methods; never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    id: ReportId,
    title: NonEmptyString,
    description: Option<String>,
    location: NonEmptyString,
    coordinates: Option<Coordinates>,
    reported_by: String,
    status: ReportStatus,
    assigned_staff_id: Option<StaffId>,
    citizen_evidence_ref: Option<NonEmptyString>,
    staff_proof_ref: Option<NonEmptyString>,
    created_at: DateTime<Utc>,
}

impl Report {
    /// Files a new report in `Open` status.
    pub fn file(input: NewReportInput, now: DateTime<Utc>) -> AppResult<Self> {
        let NewReportInput {
            title,
            description,
            location,
            coordinates,
            reported_by,
            citizen_evidence_ref,
        } = input;

        if reported_by.trim().is_empty() {
            return Err(AppError::Validation(
                "reported_by subject must not be empty".to_owned(),
            ));
        }

        let description = normalize_optional_text(description);
        let citizen_evidence_ref = normalize_optional_text(citizen_evidence_ref)
            .map(NonEmptyString::new)
            .transpose()?;

        Ok(Self {
            id: ReportId::new(),
            title: NonEmptyString::new(title)?,
            description,
            location: NonEmptyString::new(location)?,
            coordinates,
            reported_by,
            status: ReportStatus::Open,
            assigned_staff_id: None,
            citizen_evidence_ref,
            staff_proof_ref: None,
            created_at: now,
        })
    }

    /// Rehydrates a report from storage, enforcing the status invariants.
    pub fn from_snapshot(snapshot: ReportSnapshot) -> AppResult<Self> {
        let ReportSnapshot {
            id,
            title,
            description,
            location,
            coordinates,
            reported_by,
            status,
            assigned_staff_id,
            citizen_evidence_ref,
            staff_proof_ref,
            created_at,
        } = snapshot;

        if reported_by.trim().is_empty() {
            return Err(AppError::Validation(
                "reported_by subject must not be empty".to_owned(),
            ));
        }

        match status {
            ReportStatus::Open | ReportStatus::InProgress => {
                if staff_proof_ref.is_some() {
                    return Err(AppError::Validation(format!(
                        "a {status} report must not carry a staff proof reference"
                    )));
                }
            }
            ReportStatus::PendingVerification | ReportStatus::Resolved => {
                if staff_proof_ref.is_none() {
                    return Err(AppError::Validation(format!(
                        "a {status} report must carry a staff proof reference"
                    )));
                }
            }
            ReportStatus::Closed => {}
        }

        match status {
            ReportStatus::Open => {
                if assigned_staff_id.is_some() {
                    return Err(AppError::Validation(
                        "an Open report must not have an assigned staff member".to_owned(),
                    ));
                }
            }
            _ => {
                if assigned_staff_id.is_none() {
                    return Err(AppError::Validation(format!(
                        "a {status} report must have an assigned staff member"
                    )));
                }
            }
        }

        Ok(Self {
            id,
            title: NonEmptyString::new(title)?,
            description: normalize_optional_text(description),
            location: NonEmptyString::new(location)?,
            coordinates,
            reported_by,
            status,
            assigned_staff_id,
            citizen_evidence_ref: citizen_evidence_ref
                .map(NonEmptyString::new)
                .transpose()?,
            staff_proof_ref: staff_proof_ref.map(NonEmptyString::new).transpose()?,
            created_at,
        })
    }

    /// Returns a storage-shaped view of the current report state.
    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            id: self.id,
            title: self.title.as_str().to_owned(),
            description: self.description.clone(),
            location: self.location.as_str().to_owned(),
            coordinates: self.coordinates,
            reported_by: self.reported_by.clone(),
            status: self.status,
            assigned_staff_id: self.assigned_staff_id,
            citizen_evidence_ref: self
                .citizen_evidence_ref
                .as_ref()
                .map(|value| value.as_str().to_owned()),
            staff_proof_ref: self
                .staff_proof_ref
                .as_ref()
                .map(|value| value.as_str().to_owned()),
            created_at: self.created_at,
        }
    }

    /// Assigns the report to a resolved staff member.
    ///
    /// Staff existence is proven by the caller passing a directory-resolved
    /// [`StaffMember`]; role authorization is an orchestrator precondition.
    pub fn assign(
        &mut self,
        staff: &StaffMember,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Result<UpdateRecord, ReportWorkflowError> {
        match self.status {
            ReportStatus::Open => {
                self.status = ReportStatus::InProgress;
                self.assigned_staff_id = Some(staff.id());

                Ok(self.update_record(
                    Some(format!("Assigned to {}", staff.display_name())),
                    actor,
                    now,
                ))
            }
            status => Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::Assign,
                status,
            }),
        }
    }

    /// Accepts on-site resolution proof from the assigned staff member.
    ///
    /// The geofence check runs in the orchestrator (it needs the report's
    /// target coordinates); its result is a guard input here.
    pub fn submit_proof(
        &mut self,
        staff_id: StaffId,
        proof_ref: &str,
        geofence: &GeofenceCheckResult,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Result<UpdateRecord, ReportWorkflowError> {
        if self.status != ReportStatus::InProgress {
            return Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::SubmitProof,
                status: self.status,
            });
        }

        if self.assigned_staff_id != Some(staff_id) {
            return Err(ReportWorkflowError::NotAssignedStaff { staff_id });
        }

        let proof_ref = NonEmptyString::new(proof_ref)
            .map_err(|_| ReportWorkflowError::MissingProofArtifact)?;

        if geofence.verdict() != GeofenceVerdict::Verified {
            return Err(ReportWorkflowError::GeofenceRejected { result: *geofence });
        }

        self.status = ReportStatus::PendingVerification;
        self.staff_proof_ref = Some(proof_ref);

        let comment = match geofence.distance_meters() {
            Some(distance) => format!(
                "Resolution proof submitted {distance:.0} m from the issue location"
            ),
            None => "Resolution proof submitted".to_owned(),
        };

        Ok(self.update_record(Some(comment), actor, now))
    }

    /// Confirms the fix on behalf of the reporting citizen.
    pub fn citizen_verify(
        &mut self,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Result<UpdateRecord, ReportWorkflowError> {
        if self.status != ReportStatus::PendingVerification {
            return Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::CitizenVerify,
                status: self.status,
            });
        }

        if actor.subject() != self.reported_by {
            return Err(ReportWorkflowError::NotOriginalCitizen {
                subject: actor.subject().to_owned(),
            });
        }

        self.status = ReportStatus::Resolved;

        Ok(self.update_record(
            Some("Fix confirmed by the reporting citizen".to_owned()),
            actor,
            now,
        ))
    }

    /// Rejects the claimed fix, re-opening the report for the staff member.
    ///
    /// The stale proof reference is cleared so a fresh submission is
    /// required.
    pub fn citizen_reject(
        &mut self,
        actor: &ActorIdentity,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<UpdateRecord, ReportWorkflowError> {
        if self.status != ReportStatus::PendingVerification {
            return Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::CitizenReject,
                status: self.status,
            });
        }

        if actor.subject() != self.reported_by {
            return Err(ReportWorkflowError::NotOriginalCitizen {
                subject: actor.subject().to_owned(),
            });
        }

        self.status = ReportStatus::InProgress;
        self.staff_proof_ref = None;

        let comment = normalize_optional_text(comment)
            .unwrap_or_else(|| "Fix rejected by the reporting citizen".to_owned());

        Ok(self.update_record(Some(comment), actor, now))
    }

    /// Closes the report by administrative override.
    ///
    /// Legal from any non-terminal status after assignment; no geofence or
    /// citizen guard applies. Role authorization is an orchestrator
    /// precondition.
    pub fn admin_close(
        &mut self,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> Result<UpdateRecord, ReportWorkflowError> {
        match self.status {
            ReportStatus::InProgress
            | ReportStatus::PendingVerification
            | ReportStatus::Resolved => {
                self.status = ReportStatus::Closed;

                Ok(self.update_record(
                    Some("Closed by administrator".to_owned()),
                    actor,
                    now,
                ))
            }
            status => Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::AdminClose,
                status,
            }),
        }
    }

    /// Returns the report identifier.
    #[must_use]
    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the optional issue description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the human-readable issue location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Returns the captured issue coordinates, when any.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Returns the subject of the citizen who filed the report.
    #[must_use]
    pub fn reported_by(&self) -> &str {
        self.reported_by.as_str()
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns the assigned staff member, when any.
    #[must_use]
    pub fn assigned_staff_id(&self) -> Option<StaffId> {
        self.assigned_staff_id
    }

    /// Returns the citizen evidence image reference, when any.
    #[must_use]
    pub fn citizen_evidence_ref(&self) -> Option<&str> {
        self.citizen_evidence_ref.as_ref().map(NonEmptyString::as_str)
    }

    /// Returns the staff proof image reference, when any.
    #[must_use]
    pub fn staff_proof_ref(&self) -> Option<&str> {
        self.staff_proof_ref.as_ref().map(NonEmptyString::as_str)
    }

    /// Returns the filing timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn update_record(
        &self,
        comment: Option<String>,
        actor: &ActorIdentity,
        now: DateTime<Utc>,
    ) -> UpdateRecord {
        UpdateRecord::new(self.id, self.status, comment, actor.subject(), now)
    }
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use civicdesk_core::{ActorIdentity, ActorRole};

    use crate::geofence::{Coordinates, GeofenceCheckResult, GeofencePolicy, PositionClaim};
    use crate::staff::{StaffId, StaffMember};

    use super::{NewReportInput, Report, ReportAction, ReportStatus, ReportWorkflowError};

    fn citizen() -> ActorIdentity {
        ActorIdentity::new("citizen-asha", "Asha", ActorRole::Citizen)
    }

    fn admin() -> ActorIdentity {
        ActorIdentity::new("admin-lena", "Lena", ActorRole::Admin)
    }

    fn staff_actor(staff_id: StaffId) -> ActorIdentity {
        ActorIdentity::new(staff_id.to_string(), "Ravi", ActorRole::Staff)
    }

    fn staff_member(staff_id: StaffId) -> StaffMember {
        StaffMember::new(staff_id, "Ravi").unwrap_or_else(|_| unreachable!())
    }

    fn target() -> Coordinates {
        Coordinates::new(12.9716, 77.5946).unwrap_or_else(|_| unreachable!())
    }

    fn geofence_result(latitude: f64, accuracy_meters: f64) -> GeofenceCheckResult {
        let claim = PositionClaim::new(
            Coordinates::new(latitude, 77.5946).unwrap_or_else(|_| unreachable!()),
            accuracy_meters,
        )
        .unwrap_or_else(|_| unreachable!());

        GeofencePolicy::default().evaluate(&claim, Some(target()))
    }

    fn verified_result() -> GeofenceCheckResult {
        geofence_result(12.9716, 20.0)
    }

    fn open_report() -> Report {
        Report::file(
            NewReportInput {
                title: "Broken streetlight".to_owned(),
                description: Some("Pole 14 is dark after sunset".to_owned()),
                location: "MG Road / 5th Cross".to_owned(),
                coordinates: Some(target()),
                reported_by: "citizen-asha".to_owned(),
                citizen_evidence_ref: Some("uploads/evidence-1.jpg".to_owned()),
            },
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn in_progress_report(staff_id: StaffId) -> Report {
        let mut report = open_report();
        let assigned = report.assign(&staff_member(staff_id), &admin(), Utc::now());
        assert!(assigned.is_ok());
        report
    }

    fn pending_report(staff_id: StaffId) -> Report {
        let mut report = in_progress_report(staff_id);
        let submitted = report.submit_proof(
            staff_id,
            "uploads/proof-1.jpg",
            &verified_result(),
            &staff_actor(staff_id),
            Utc::now(),
        );
        assert!(submitted.is_ok());
        report
    }

    #[test]
    fn filed_report_starts_open_and_unassigned() {
        let report = open_report();
        assert_eq!(report.status(), ReportStatus::Open);
        assert_eq!(report.assigned_staff_id(), None);
        assert_eq!(report.staff_proof_ref(), None);
    }

    #[test]
    fn assignment_moves_open_report_to_in_progress() {
        let staff_id = StaffId::new();
        let mut report = open_report();

        let record = report.assign(&staff_member(staff_id), &admin(), Utc::now());
        assert!(record.is_ok());

        assert_eq!(report.status(), ReportStatus::InProgress);
        assert_eq!(report.assigned_staff_id(), Some(staff_id));

        let record = record.unwrap_or_else(|_| unreachable!());
        assert_eq!(record.status(), ReportStatus::InProgress);
        assert_eq!(record.actor_subject(), "admin-lena");
    }

    #[test]
    fn repeated_invalid_assignment_yields_identical_error_and_no_mutation() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);
        let before = report.clone();

        let first = report.assign(&staff_member(StaffId::new()), &admin(), Utc::now());
        let second = report.assign(&staff_member(StaffId::new()), &admin(), Utc::now());

        let expected = ReportWorkflowError::InvalidTransition {
            action: ReportAction::Assign,
            status: ReportStatus::InProgress,
        };
        assert_eq!(first, Err(expected.clone()));
        assert_eq!(second, Err(expected));
        assert_eq!(report, before);
    }

    #[test]
    fn proof_submission_moves_report_to_pending_verification() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);

        let record = report.submit_proof(
            staff_id,
            "uploads/proof-1.jpg",
            &verified_result(),
            &staff_actor(staff_id),
            Utc::now(),
        );
        assert!(record.is_ok());

        assert_eq!(report.status(), ReportStatus::PendingVerification);
        assert_eq!(report.staff_proof_ref(), Some("uploads/proof-1.jpg"));
    }

    #[test]
    fn proof_submission_rejects_unassigned_staff() {
        let assigned = StaffId::new();
        let intruder = StaffId::new();
        let mut report = in_progress_report(assigned);

        let result = report.submit_proof(
            intruder,
            "uploads/proof-1.jpg",
            &verified_result(),
            &staff_actor(intruder),
            Utc::now(),
        );

        assert_eq!(
            result,
            Err(ReportWorkflowError::NotAssignedStaff { staff_id: intruder })
        );
        assert_eq!(report.status(), ReportStatus::InProgress);
    }

    #[test]
    fn proof_submission_requires_an_image_reference() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);

        let result = report.submit_proof(
            staff_id,
            "   ",
            &verified_result(),
            &staff_actor(staff_id),
            Utc::now(),
        );

        assert_eq!(result, Err(ReportWorkflowError::MissingProofArtifact));
        assert_eq!(report.staff_proof_ref(), None);
    }

    #[test]
    fn proof_submission_rejects_failed_geofence_without_mutation() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);
        let before = report.clone();
        let far = geofence_result(13.016566, 20.0);

        let result = report.submit_proof(
            staff_id,
            "uploads/proof-1.jpg",
            &far,
            &staff_actor(staff_id),
            Utc::now(),
        );

        assert_eq!(
            result,
            Err(ReportWorkflowError::GeofenceRejected { result: far })
        );
        assert_eq!(report, before);
    }

    #[test]
    fn citizen_verify_resolves_a_pending_report() {
        let staff_id = StaffId::new();
        let mut report = pending_report(staff_id);

        let record = report.citizen_verify(&citizen(), Utc::now());
        assert!(record.is_ok());
        assert_eq!(report.status(), ReportStatus::Resolved);
    }

    #[test]
    fn citizen_verify_rejects_other_actors() {
        let staff_id = StaffId::new();
        let mut report = pending_report(staff_id);
        let other = ActorIdentity::new("citizen-mallory", "Mallory", ActorRole::Citizen);

        let result = report.citizen_verify(&other, Utc::now());

        assert_eq!(
            result,
            Err(ReportWorkflowError::NotOriginalCitizen {
                subject: "citizen-mallory".to_owned(),
            })
        );
        assert_eq!(report.status(), ReportStatus::PendingVerification);
    }

    #[test]
    fn citizen_reject_reopens_and_clears_the_proof_reference() {
        let staff_id = StaffId::new();
        let mut report = pending_report(staff_id);

        let record = report.citizen_reject(
            &citizen(),
            Some("Light is still out at night".to_owned()),
            Utc::now(),
        );
        assert!(record.is_ok());

        assert_eq!(report.status(), ReportStatus::InProgress);
        assert_eq!(report.staff_proof_ref(), None);
        assert_eq!(
            record.unwrap_or_else(|_| unreachable!()).comment(),
            Some("Light is still out at night")
        );
    }

    #[test]
    fn open_is_never_reentered_after_rejection() {
        let staff_id = StaffId::new();
        let mut report = pending_report(staff_id);

        let rejected = report.citizen_reject(&citizen(), None, Utc::now());
        assert!(rejected.is_ok());
        assert_eq!(report.status(), ReportStatus::InProgress);
        assert_eq!(report.assigned_staff_id(), Some(staff_id));
    }

    #[test]
    fn admin_close_is_legal_from_every_post_assignment_status() {
        let staff_id = StaffId::new();

        for report in [
            in_progress_report(staff_id),
            pending_report(staff_id),
            {
                let mut resolved = pending_report(staff_id);
                let verified = resolved.citizen_verify(&citizen(), Utc::now());
                assert!(verified.is_ok());
                resolved
            },
        ] {
            let mut report = report;
            let closed = report.admin_close(&admin(), Utc::now());
            assert!(closed.is_ok());
            assert_eq!(report.status(), ReportStatus::Closed);
        }
    }

    #[test]
    fn open_report_cannot_be_closed_directly() {
        let mut report = open_report();

        let result = report.admin_close(&admin(), Utc::now());

        assert_eq!(
            result,
            Err(ReportWorkflowError::InvalidTransition {
                action: ReportAction::AdminClose,
                status: ReportStatus::Open,
            })
        );
    }

    #[test]
    fn closed_is_terminal() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);
        let closed = report.admin_close(&admin(), Utc::now());
        assert!(closed.is_ok());

        let reassign = report.assign(&staff_member(staff_id), &admin(), Utc::now());
        assert!(matches!(
            reassign,
            Err(ReportWorkflowError::InvalidTransition {
                status: ReportStatus::Closed,
                ..
            })
        ));

        let reclose = report.admin_close(&admin(), Utc::now());
        assert!(matches!(
            reclose,
            Err(ReportWorkflowError::InvalidTransition {
                status: ReportStatus::Closed,
                ..
            })
        ));
    }

    #[test]
    fn assigned_staff_invariant_holds_after_every_transition() {
        let staff_id = StaffId::new();
        let mut report = open_report();
        assert!(report.assigned_staff_id().is_none());

        let assigned = report.assign(&staff_member(staff_id), &admin(), Utc::now());
        assert!(assigned.is_ok());

        for _ in 0..2 {
            assert_eq!(report.assigned_staff_id(), Some(staff_id));
            let submitted = report.submit_proof(
                staff_id,
                "uploads/proof.jpg",
                &verified_result(),
                &staff_actor(staff_id),
                Utc::now(),
            );
            assert!(submitted.is_ok());
            assert_eq!(report.assigned_staff_id(), Some(staff_id));

            let rejected = report.citizen_reject(&citizen(), None, Utc::now());
            assert!(rejected.is_ok());
        }
    }

    #[test]
    fn snapshot_roundtrip_preserves_the_report() {
        let staff_id = StaffId::new();
        let report = pending_report(staff_id);

        let restored = Report::from_snapshot(report.snapshot());
        assert!(restored.is_ok());
        assert_eq!(restored.unwrap_or_else(|_| unreachable!()), report);
    }

    #[test]
    fn rehydration_rejects_an_assigned_open_report() {
        let mut snapshot = open_report().snapshot();
        snapshot.assigned_staff_id = Some(StaffId::new());

        assert!(Report::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn rehydration_rejects_pending_verification_without_proof() {
        let staff_id = StaffId::new();
        let mut snapshot = pending_report(staff_id).snapshot();
        snapshot.staff_proof_ref = None;

        assert!(Report::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn rehydration_accepts_a_force_closed_report_without_proof() {
        let staff_id = StaffId::new();
        let mut report = in_progress_report(staff_id);
        let closed = report.admin_close(&admin(), Utc::now());
        assert!(closed.is_ok());

        let snapshot = report.snapshot();
        assert_eq!(snapshot.status, ReportStatus::Closed);
        assert!(snapshot.staff_proof_ref.is_none());
        assert!(Report::from_snapshot(snapshot).is_ok());
    }
}
