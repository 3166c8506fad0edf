//! Application services and ports.

#![forbid(unsafe_code)]

mod report_locks;
mod report_ports;
mod report_service;

pub use report_locks::ReportLockRegistry;
pub use report_ports::{
    FileReportInput, NotificationDispatcher, ReportNotification, ReportRepository, StaffDirectory,
};
pub use report_service::{ReportService, ReportServiceError, ReportServiceResult};
