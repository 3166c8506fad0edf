use civicdesk_application::ReportService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
}
