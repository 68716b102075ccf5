mod catalog;
mod feed;
mod record;

pub use catalog::*;
pub use feed::*;
pub use record::*;
