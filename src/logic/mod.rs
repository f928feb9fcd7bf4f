pub mod advisor;
pub mod engine;
pub mod factors;
pub mod features;
pub mod outlook;
pub mod season;
pub mod soil;

pub use advisor::{Advice, AdviceRequest, Advisor, SoilSource, PLANNING_DAYS_RANGE};
pub use engine::{RecommendationEngine, RecommendationRequest};
pub use features::derive_features;
pub use outlook::estimate_outlook;
pub use season::SeasonReport;
