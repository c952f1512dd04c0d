pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod mock_data;
pub use mock_data::MockLeadGenerator;
