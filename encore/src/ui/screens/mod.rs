mod chat_list;
mod developer;
mod favorites;
mod home;
mod my_page;
mod recommendation;

pub use chat_list::*;
pub use developer::*;
pub use favorites::*;
pub use home::*;
pub use my_page::*;
pub use recommendation::*;
