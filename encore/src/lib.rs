pub mod chat;
pub mod feed;
pub mod models;
pub mod session;

// Configuration manager (theme/profile settings backed by a JSON file)
pub mod config;

// UI module is always available.
pub mod ui;

pub const APP_DIR_NAME: &str = "encore";
