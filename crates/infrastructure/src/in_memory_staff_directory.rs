use std::collections::HashMap;

use async_trait::async_trait;
use civicdesk_application::StaffDirectory;
use civicdesk_core::AppResult;
use civicdesk_domain::{StaffId, StaffMember};

/// In-memory staff directory implementation.
#[derive(Debug, Default)]
pub struct InMemoryStaffDirectory {
    staff: HashMap<StaffId, StaffMember>,
}

impl InMemoryStaffDirectory {
    /// Creates a directory seeded with the given staff members.
    #[must_use]
    pub fn with_staff(staff: Vec<StaffMember>) -> Self {
        Self {
            staff: staff
                .into_iter()
                .map(|member| (member.id(), member))
                .collect(),
        }
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStaffDirectory {
    async fn find_staff(&self, staff_id: StaffId) -> AppResult<Option<StaffMember>> {
        Ok(self.staff.get(&staff_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use civicdesk_application::StaffDirectory;
    use civicdesk_domain::{StaffId, StaffMember};

    use super::InMemoryStaffDirectory;

    #[tokio::test]
    async fn seeded_staff_resolve_and_unknown_ids_do_not() {
        let staff_id = StaffId::new();
        let member = StaffMember::new(staff_id, "Ravi").unwrap_or_else(|_| unreachable!());
        let directory = InMemoryStaffDirectory::with_staff(vec![member]);

        let found = directory.find_staff(staff_id).await;
        assert!(found.is_ok());
        assert!(found.unwrap_or_default().is_some());

        let missing = directory.find_staff(StaffId::new()).await;
        assert!(missing.is_ok());
        assert!(missing.unwrap_or_default().is_none());
    }
}
