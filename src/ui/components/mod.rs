pub mod gauge;

pub use gauge::{dry_spell_gauge, rainfall_gauge, score_gauge, temperature_gauge, GaugeWidget};
