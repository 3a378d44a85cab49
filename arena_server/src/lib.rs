pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::server::{router, run, run_with_config};
pub use use_cases::{TickSettings, update_arena};
