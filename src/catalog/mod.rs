mod crop_data;
pub mod crops;
pub mod regions;

pub use crops::{CropCatalog, DEFAULT_MIN_SOIL_SCORE, DEFAULT_REGION_THRESHOLD};
pub use regions::{default_regions, haversine_km, RegionCatalog, DEFAULT_MAX_DISTANCE_KM};
