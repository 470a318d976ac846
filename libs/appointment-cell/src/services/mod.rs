pub mod dashboard;
pub mod sample_data;

pub use dashboard::DashboardService;
