// Interface adapters: wire protocol, player transport and HTTP handlers.

pub mod clients;
pub mod net;
pub mod protocol;
pub mod state;
