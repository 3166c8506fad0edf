//! Adapter implementations of the application ports.

#![forbid(unsafe_code)]

mod console_notification_dispatcher;
mod in_memory_report_repository;
mod in_memory_staff_directory;
mod postgres_report_repository;
mod postgres_staff_directory;
mod webhook_notification_dispatcher;

pub use console_notification_dispatcher::ConsoleNotificationDispatcher;
pub use in_memory_report_repository::InMemoryReportRepository;
pub use in_memory_staff_directory::InMemoryStaffDirectory;
pub use postgres_report_repository::PostgresReportRepository;
pub use postgres_staff_directory::PostgresStaffDirectory;
pub use webhook_notification_dispatcher::WebhookNotificationDispatcher;
