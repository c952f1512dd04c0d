pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod derivation;
pub mod lead_service;
pub use lead_service::LeadService;
