use async_trait::async_trait;
use civicdesk_core::AppResult;
use civicdesk_domain::{StaffId, StaffMember};

/// Directory port resolving staff identifiers for assignment and audit
/// attribution. The full staff profile is an external concern.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Returns one staff member by identifier.
    async fn find_staff(&self, staff_id: StaffId) -> AppResult<Option<StaffMember>>;
}
