use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Role resolved for an actor by the external identity collaborator.
///
/// The core trusts the resolved role as-is and never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// A citizen who files reports and confirms fixes.
    Citizen,
    /// A staff member who resolves assigned reports on site.
    Staff,
    /// An administrator who assigns staff and may force-close reports.
    Admin,
}

impl ActorRole {
    /// Returns a stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for ActorRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "citizen" => Ok(Self::Citizen),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!(
                "unknown actor role value '{value}'"
            ))),
        }
    }
}

/// Actor information resolved from an opaque token by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    subject: String,
    display_name: String,
    role: ActorRole,
}

impl ActorIdentity {
    /// Creates an actor identity from resolved identity data.
    #[must_use]
    pub fn new(subject: impl Into<String>, display_name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current actor.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the role resolved for the current actor.
    #[must_use]
    pub fn role(&self) -> ActorRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::ActorRole;

    #[test]
    fn role_roundtrip_transport_value() {
        let role = ActorRole::Staff;
        let restored = ActorRole::from_str(role.as_str());
        assert!(restored.is_ok());
        assert_eq!(restored.unwrap_or(ActorRole::Citizen), role);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = ActorRole::from_str("supervisor");
        assert!(parsed.is_err());
    }
}
