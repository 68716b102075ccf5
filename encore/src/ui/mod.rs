pub mod core;
pub mod icons;
pub mod screens;
pub mod theme;

mod app;
mod listener;

pub use app::*;
pub use listener::*;
