// Outbound HTTP clients for external services.

pub mod player;

pub use player::PlayerServiceClient;
