mod handle;
mod listener;
mod manager;

pub use handle::*;
pub use listener::*;
pub use manager::*;
