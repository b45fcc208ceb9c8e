mod app;
pub mod app_core;
mod background;
pub mod commands;
pub mod events;
pub mod i18n;
pub mod input;
pub mod log_buffer;
pub mod logging;
pub mod payments;
pub mod preferences;
pub mod state;
pub mod ui;

pub use app::App;

// Always exposed so integration tests can drive the app
pub mod testing;
