use chrono::{DateTime, Utc};
use civicdesk_application::FileReportInput;
use civicdesk_core::{AppError, AppResult};
use civicdesk_domain::{Coordinates, PositionClaim, Report, UpdateRecord};
use serde::{Deserialize, Serialize};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for filing a report.
#[derive(Debug, Deserialize)]
pub struct FileReportRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub citizen_evidence_ref: Option<String>,
}

impl FileReportRequest {
    /// Converts the payload into a validated intake input.
    pub fn into_input(self) -> AppResult<FileReportInput> {
        let coordinates = optional_coordinates(self.latitude, self.longitude)?;

        Ok(FileReportInput {
            title: self.title,
            description: self.description,
            location: self.location,
            coordinates,
            citizen_evidence_ref: self.citizen_evidence_ref,
        })
    }
}

/// Incoming payload for assigning a report to a staff member.
#[derive(Debug, Deserialize)]
pub struct AssignReportRequest {
    pub staff_id: uuid::Uuid,
}

/// Incoming payload for submitting resolution proof.
///
/// One device geolocation reading per attempt, supplied by the caller; the
/// proof image has already been uploaded to the external image store.
#[derive(Debug, Deserialize)]
pub struct SubmitProofRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    pub proof_image_ref: String,
}

impl SubmitProofRequest {
    /// Builds the validated position claim from the payload.
    pub fn position_claim(&self) -> AppResult<PositionClaim> {
        PositionClaim::new(
            Coordinates::new(self.latitude, self.longitude)?,
            self.accuracy_meters,
        )
    }
}

/// Incoming payload for rejecting a claimed fix.
#[derive(Debug, Deserialize)]
pub struct RejectResolutionRequest {
    pub comment: Option<String>,
}

/// API representation of a report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reported_by: String,
    pub status: String,
    pub assigned_staff_id: Option<String>,
    pub citizen_evidence_ref: Option<String>,
    pub staff_proof_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id().to_string(),
            title: report.title().to_owned(),
            description: report.description().map(ToOwned::to_owned),
            location: report.location().to_owned(),
            latitude: report.coordinates().map(|value| value.latitude()),
            longitude: report.coordinates().map(|value| value.longitude()),
            reported_by: report.reported_by().to_owned(),
            status: report.status().as_str().to_owned(),
            assigned_staff_id: report.assigned_staff_id().map(|value| value.to_string()),
            citizen_evidence_ref: report.citizen_evidence_ref().map(ToOwned::to_owned),
            staff_proof_ref: report.staff_proof_ref().map(ToOwned::to_owned),
            created_at: report.created_at(),
        }
    }
}

/// API representation of one update history entry.
#[derive(Debug, Serialize)]
pub struct UpdateRecordResponse {
    pub status: String,
    pub comment: Option<String>,
    pub actor_subject: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<UpdateRecord> for UpdateRecordResponse {
    fn from(update: UpdateRecord) -> Self {
        Self {
            status: update.status().as_str().to_owned(),
            comment: update.comment().map(ToOwned::to_owned),
            actor_subject: update.actor_subject().to_owned(),
            recorded_at: update.recorded_at(),
        }
    }
}

fn optional_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> AppResult<Option<Coordinates>> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates::new(latitude, longitude)?)),
        (None, None) => Ok(None),
        _ => Err(AppError::Validation(
            "latitude and longitude must be provided together".to_owned(),
        )),
    }
}
