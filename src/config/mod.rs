// Configuration module entry point
// Middleware configuration plus the settings of the bundled host server

mod assets;
mod server;

pub use assets::{StaticConfig, DEFAULT_ASSETS};
pub use server::{AssetsConfig, ListenConfig, LoggingConfig, ServerSettings};
