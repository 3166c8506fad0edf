use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civicdesk_application::ReportRepository;
use civicdesk_core::{AppError, AppResult};
use civicdesk_domain::{
    Coordinates, Report, ReportId, ReportSnapshot, ReportStatus, StaffId, UpdateRecord,
};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed report repository.
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: uuid::Uuid,
    title: String,
    description: Option<String>,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    reported_by: String,
    status: String,
    assigned_staff_id: Option<uuid::Uuid>,
    citizen_evidence_ref: Option<String>,
    staff_proof_ref: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> AppResult<Report> {
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)?),
            (None, None) => None,
            _ => {
                return Err(AppError::Internal(format!(
                    "report row '{}' has a partial coordinate pair",
                    self.id
                )));
            }
        };

        Report::from_snapshot(ReportSnapshot {
            id: ReportId::from_uuid(self.id),
            title: self.title,
            description: self.description,
            location: self.location,
            coordinates,
            reported_by: self.reported_by,
            status: ReportStatus::from_str(self.status.as_str())?,
            assigned_staff_id: self.assigned_staff_id.map(StaffId::from_uuid),
            citizen_evidence_ref: self.citizen_evidence_ref,
            staff_proof_ref: self.staff_proof_ref,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct UpdateRow {
    report_id: uuid::Uuid,
    status: String,
    comment: Option<String>,
    actor_subject: String,
    recorded_at: DateTime<Utc>,
}

impl UpdateRow {
    fn into_update_record(self) -> AppResult<UpdateRecord> {
        Ok(UpdateRecord::new(
            ReportId::from_uuid(self.report_id),
            ReportStatus::from_str(self.status.as_str())?,
            self.comment,
            self.actor_subject,
            self.recorded_at,
        ))
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create_report(&self, report: &Report) -> AppResult<()> {
        let snapshot = report.snapshot();

        sqlx::query(
            r#"
            INSERT INTO reports (
                id, title, description, location, latitude, longitude,
                reported_by, status, assigned_staff_id,
                citizen_evidence_ref, staff_proof_ref, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(snapshot.id.as_uuid())
        .bind(&snapshot.title)
        .bind(&snapshot.description)
        .bind(&snapshot.location)
        .bind(snapshot.coordinates.map(|value| value.latitude()))
        .bind(snapshot.coordinates.map(|value| value.longitude()))
        .bind(&snapshot.reported_by)
        .bind(snapshot.status.as_str())
        .bind(snapshot.assigned_staff_id.map(|value| value.as_uuid()))
        .bind(&snapshot.citizen_evidence_ref)
        .bind(&snapshot.staff_proof_ref)
        .bind(snapshot.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert report: {error}")))?;

        Ok(())
    }

    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                id, title, description, location, latitude, longitude,
                reported_by, status, assigned_staff_id,
                citizen_evidence_ref, staff_proof_ref, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(report_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load report: {error}")))?;

        row.map(ReportRow::into_report).transpose()
    }

    async fn save_transition(&self, report: &Report, update: &UpdateRecord) -> AppResult<()> {
        let snapshot = report.snapshot();

        let mut tx = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transition transaction: {error}"))
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE reports
            SET status = $2,
                assigned_staff_id = $3,
                staff_proof_ref = $4
            WHERE id = $1
            "#,
        )
        .bind(snapshot.id.as_uuid())
        .bind(snapshot.status.as_str())
        .bind(snapshot.assigned_staff_id.map(|value| value.as_uuid()))
        .bind(&snapshot.staff_proof_ref)
        .execute(&mut *tx)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update report: {error}")))?;

        if updated.rows_affected() != 1 {
            return Err(AppError::NotFound(format!(
                "report '{}' does not exist",
                snapshot.id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO report_updates (report_id, status, comment, actor_subject, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(update.report_id().as_uuid())
        .bind(update.status().as_str())
        .bind(update.comment())
        .bind(update.actor_subject())
        .bind(update.recorded_at())
        .execute(&mut *tx)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append update record: {error}")))?;

        tx.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transition transaction: {error}"))
        })
    }

    async fn list_update_records(&self, report_id: ReportId) -> AppResult<Vec<UpdateRecord>> {
        let rows = sqlx::query_as::<_, UpdateRow>(
            r#"
            SELECT report_id, status, comment, actor_subject, recorded_at
            FROM report_updates
            WHERE report_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(report_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list update records: {error}")))?;

        rows.into_iter()
            .map(UpdateRow::into_update_record)
            .collect()
    }
}
