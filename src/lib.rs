// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod game;
pub mod hitbox;
pub mod layout;
pub mod logging;
pub mod random;
pub mod runtime;
pub mod theme;
pub mod timers;
pub mod view;
