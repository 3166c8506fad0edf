use civicdesk_domain::Coordinates;

/// Input payload for filing a report at the intake boundary.
///
/// The filing citizen is taken from the authenticated actor, never from the
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReportInput {
    /// Short issue title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Human-readable location of the issue.
    pub location: String,
    /// Optional captured device coordinates of the issue.
    pub coordinates: Option<Coordinates>,
    /// Optional opaque reference to an uploaded evidence image.
    pub citizen_evidence_ref: Option<String>,
}
