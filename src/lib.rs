pub mod buckets;
pub mod config;
pub mod console;
pub mod directory;
pub mod logging;
pub mod model;
pub mod remote;
pub mod session_store;
pub mod tui;
mod tui_shell;
