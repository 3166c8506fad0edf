//! Ports consumed by the report workflow orchestrator.

mod inputs;
mod notifications;
mod repository;
mod staff_directory;

pub use inputs::FileReportInput;
pub use notifications::{NotificationDispatcher, ReportNotification};
pub use repository::ReportRepository;
pub use staff_directory::StaffDirectory;
