use civicdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(Uuid);

impl StaffId {
    /// Creates a new random staff identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a staff identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a staff identifier from an identity subject claim.
    pub fn from_subject(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
            AppError::Validation(format!("invalid staff identifier '{value}': {error}"))
        })
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StaffId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Staff identity reference used for assignment and audit attribution.
///
/// The full staff profile lives in the external staff directory; this core
/// only needs the identifier and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    id: StaffId,
    display_name: NonEmptyString,
}

impl StaffMember {
    /// Creates a staff reference with a validated display name.
    pub fn new(id: StaffId, display_name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            display_name: NonEmptyString::new(display_name)?,
        })
    }

    /// Returns the staff identifier.
    #[must_use]
    pub fn id(&self) -> StaffId {
        self.id
    }

    /// Returns the display name used for audit attribution.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{StaffId, StaffMember};

    #[test]
    fn staff_member_requires_display_name() {
        let staff = StaffMember::new(StaffId::new(), "  ");
        assert!(staff.is_err());
    }

    #[test]
    fn staff_id_parses_subject_claim() {
        let staff_id = StaffId::new();
        let parsed = StaffId::from_subject(&staff_id.to_string());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default().as_uuid(), staff_id.as_uuid());
    }

    #[test]
    fn staff_id_rejects_non_uuid_subject() {
        let parsed = StaffId::from_subject("staff-7");
        assert!(parsed.is_err());
    }
}
