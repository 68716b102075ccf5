mod handle;
mod listener;
mod manager;
mod script;

pub use handle::*;
pub use listener::*;
pub use manager::*;
pub use script::*;
