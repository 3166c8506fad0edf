//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod geofence;
mod report;
mod staff;

pub use geofence::{
    Coordinates, EARTH_RADIUS_METERS, GeofenceCheckResult, GeofencePolicy, GeofenceVerdict,
    PositionClaim, haversine_distance_meters,
};
pub use report::{
    NewReportInput, Report, ReportAction, ReportId, ReportSnapshot, ReportStatus,
    ReportWorkflowError, UpdateRecord,
};
pub use staff::{StaffId, StaffMember};
