use super::action::PolledAction;
use super::state::{ArenaState, Player};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

// Why a player poll produced nothing usable. The tick treats all of these as
// "no action" for that player.
#[derive(Debug)]
pub enum ProviderError {
    Transport(String),
    Upstream { status: u16 },
    Malformed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Transport(message) => write!(f, "player transport error: {message}"),
            ProviderError::Upstream { status } => write!(f, "player service returned {status}"),
            ProviderError::Malformed(message) => write!(f, "malformed player reply: {message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

// Port for asking a player's service what it does this tick.
// The tick orchestrator depends on this trait, not on the HTTP client.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn poll(
        &self,
        arena: Arc<ArenaState>,
        player: Player,
    ) -> Result<Option<PolledAction>, ProviderError>;
}

/// Adapts a plain callback into an [`ActionProvider`].
pub struct ActionFn<F>(pub F);

#[async_trait]
impl<F> ActionProvider for ActionFn<F>
where
    F: Fn(Arc<ArenaState>, Player) -> BoxFuture<'static, Option<PolledAction>> + Send + Sync,
{
    async fn poll(
        &self,
        arena: Arc<ArenaState>,
        player: Player,
    ) -> Result<Option<PolledAction>, ProviderError> {
        Ok((self.0)(arena, player).await)
    }
}
