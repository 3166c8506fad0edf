use async_trait::async_trait;
use civicdesk_application::StaffDirectory;
use civicdesk_core::{AppError, AppResult};
use civicdesk_domain::{StaffId, StaffMember};
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed staff directory.
#[derive(Clone)]
pub struct PostgresStaffDirectory {
    pool: PgPool,
}

impl PostgresStaffDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StaffRow {
    id: uuid::Uuid,
    display_name: String,
}

#[async_trait]
impl StaffDirectory for PostgresStaffDirectory {
    async fn find_staff(&self, staff_id: StaffId) -> AppResult<Option<StaffMember>> {
        let row = sqlx::query_as::<_, StaffRow>(
            r#"
            SELECT id, display_name
            FROM staff_members
            WHERE id = $1
            "#,
        )
        .bind(staff_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load staff member: {error}")))?;

        row.map(|row| StaffMember::new(StaffId::from_uuid(row.id), row.display_name))
            .transpose()
    }
}
