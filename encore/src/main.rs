#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use encore::ui::EncoreApp;
use tracing_subscriber::prelude::*;

fn main() -> iced::Result {
    // Initialize tracing (optional, controlled via RUST_LOG)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=info,iced=warn,wgpu=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    iced::application(EncoreApp::title, EncoreApp::update, EncoreApp::view)
        .subscription(EncoreApp::subscription)
        .theme(EncoreApp::theme)
        .run_with(EncoreApp::new)
}
