// Inbound HTTP handlers. The server only exposes read-only views.

pub mod snapshot;

pub use snapshot::{arena_snapshot_handler, health_handler};
