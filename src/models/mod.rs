pub mod crop;
pub mod farm;
pub mod recommendation;
pub mod region;
pub mod season;
pub mod soil;
pub mod weather;

pub use crop::*;
pub use farm::*;
pub use recommendation::*;
pub use region::*;
pub use season::*;
pub use soil::*;
pub use weather::*;
