mod message;
mod peer;
mod profile;
mod request;
mod types;

pub use message::*;
pub use peer::*;
pub use profile::*;
pub use request::*;
pub use types::*;
