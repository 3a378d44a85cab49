use crate::domain::{Action, ActionProvider, ArenaState, Player, PolledAction, ProviderError};
use crate::interface_adapters::protocol::ArenaUpdateDto;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Thin reqwest client that asks a player's service for its next move.
#[derive(Clone)]
pub struct PlayerServiceClient {
    http: reqwest::Client,
}

impl PlayerServiceClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ActionProvider for PlayerServiceClient {
    async fn poll(
        &self,
        arena: Arc<ArenaState>,
        player: Player,
    ) -> Result<Option<PolledAction>, ProviderError> {
        let body = ArenaUpdateDto::for_player(&arena, &player);

        // Latency covers the full round trip including the reply body.
        let started = Instant::now();
        let response = self
            .http
            .post(&player.callback)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
            });
        }

        let reply = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let latency = started.elapsed();

        let reply = reply.trim();
        if reply.is_empty() {
            return Ok(None);
        }

        let action = reply
            .parse::<Action>()
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Ok(Some(PolledAction::new(action, latency)))
    }
}
