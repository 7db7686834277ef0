// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod evaluate;
pub mod metrics;
pub mod passage;
pub mod runtime;
pub mod scroll;
pub mod session;
