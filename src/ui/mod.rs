pub mod components;
pub mod screens;
mod theme;

pub use theme::{Band, Theme};
