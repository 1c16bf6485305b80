// Server module entry point
// Minimal host for the static asset middleware: listener, accept loop, fallback handler

pub mod connection;
pub mod fallback;
pub mod listener;

#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::run;
