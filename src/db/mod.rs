mod connection;
mod migrations;
mod queries;

pub use connection::Database;
pub use queries::{Climatology, Coverage, Statistic};
