pub mod dashboard;
pub mod recommendations;
pub mod regions;

pub use dashboard::DashboardScreen;
pub use recommendations::RecommendationsScreen;
pub use regions::RegionsScreen;
