use std::collections::HashMap;

use async_trait::async_trait;
use civicdesk_application::ReportRepository;
use civicdesk_core::{AppError, AppResult};
use civicdesk_domain::{Report, ReportId, UpdateRecord};
use tokio::sync::RwLock;

/// In-memory report repository implementation.
///
/// One lock guards both the reports and the update log, so
/// `save_transition` is atomic with respect to concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryReportRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    reports: HashMap<ReportId, Report>,
    updates: Vec<UpdateRecord>,
}

impl InMemoryReportRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create_report(&self, report: &Report) -> AppResult<()> {
        let mut state = self.state.write().await;

        if state.reports.contains_key(&report.id()) {
            return Err(AppError::Conflict(format!(
                "report '{}' already exists",
                report.id()
            )));
        }

        state.reports.insert(report.id(), report.clone());
        Ok(())
    }

    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<Report>> {
        Ok(self.state.read().await.reports.get(&report_id).cloned())
    }

    async fn save_transition(&self, report: &Report, update: &UpdateRecord) -> AppResult<()> {
        let mut state = self.state.write().await;

        if !state.reports.contains_key(&report.id()) {
            return Err(AppError::NotFound(format!(
                "report '{}' does not exist",
                report.id()
            )));
        }

        state.reports.insert(report.id(), report.clone());
        state.updates.push(update.clone());
        Ok(())
    }

    async fn list_update_records(&self, report_id: ReportId) -> AppResult<Vec<UpdateRecord>> {
        Ok(self
            .state
            .read()
            .await
            .updates
            .iter()
            .filter(|update| update.report_id() == report_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use civicdesk_application::ReportRepository;
    use civicdesk_core::{ActorIdentity, ActorRole};
    use civicdesk_domain::{NewReportInput, Report, ReportId, ReportStatus, StaffId, StaffMember};

    use super::InMemoryReportRepository;

    fn filed_report() -> Report {
        Report::file(
            NewReportInput {
                title: "Overflowing trash bin".to_owned(),
                description: None,
                location: "Market square".to_owned(),
                coordinates: None,
                reported_by: "citizen-asha".to_owned(),
                citizen_evidence_ref: None,
            },
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let repository = InMemoryReportRepository::new();
        let report = filed_report();

        let created = repository.create_report(&report).await;
        assert!(created.is_ok());

        let found = repository.find_report(report.id()).await;
        assert!(found.is_ok());
        assert_eq!(found.unwrap_or_default(), Some(report));
    }

    #[tokio::test]
    async fn duplicate_creation_conflicts() {
        let repository = InMemoryReportRepository::new();
        let report = filed_report();

        let first = repository.create_report(&report).await;
        assert!(first.is_ok());

        let second = repository.create_report(&report).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn transition_on_a_missing_report_is_not_found() {
        let repository = InMemoryReportRepository::new();
        let mut report = filed_report();
        let staff_id = StaffId::new();
        let staff = StaffMember::new(staff_id, "Ravi").unwrap_or_else(|_| unreachable!());
        let admin = ActorIdentity::new("admin-lena", "Lena", ActorRole::Admin);

        let update = report.assign(&staff, &admin, Utc::now());
        assert!(update.is_ok());

        let saved = repository
            .save_transition(&report, &update.unwrap_or_else(|_| unreachable!()))
            .await;
        assert!(saved.is_err());
    }

    #[tokio::test]
    async fn update_records_come_back_in_transition_order() {
        let repository = InMemoryReportRepository::new();
        let mut report = filed_report();
        let staff_id = StaffId::new();
        let staff = StaffMember::new(staff_id, "Ravi").unwrap_or_else(|_| unreachable!());
        let admin = ActorIdentity::new("admin-lena", "Lena", ActorRole::Admin);

        let created = repository.create_report(&report).await;
        assert!(created.is_ok());

        let assigned = report.assign(&staff, &admin, Utc::now());
        assert!(assigned.is_ok());
        let saved = repository
            .save_transition(&report, &assigned.unwrap_or_else(|_| unreachable!()))
            .await;
        assert!(saved.is_ok());

        let closed = report.admin_close(&admin, Utc::now());
        assert!(closed.is_ok());
        let saved = repository
            .save_transition(&report, &closed.unwrap_or_else(|_| unreachable!()))
            .await;
        assert!(saved.is_ok());

        let listed = repository.list_update_records(report.id()).await;
        assert!(listed.is_ok());
        let statuses: Vec<ReportStatus> = listed
            .unwrap_or_default()
            .iter()
            .map(civicdesk_domain::UpdateRecord::status)
            .collect();
        assert_eq!(statuses, vec![ReportStatus::InProgress, ReportStatus::Closed]);
    }

    #[tokio::test]
    async fn update_listing_is_scoped_to_the_report() {
        let repository = InMemoryReportRepository::new();
        let report = filed_report();
        let created = repository.create_report(&report).await;
        assert!(created.is_ok());

        let listed = repository.list_update_records(ReportId::new()).await;
        assert!(listed.is_ok());
        assert!(listed.unwrap_or_default().is_empty());
    }
}
