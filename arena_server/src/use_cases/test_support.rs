use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Action, ActionProvider, ArenaState, Player, PlayerState, PolledAction, ProviderError,
};

pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

// Builds a consistent arena from (service, state) pairs.
pub(crate) fn arena_of(entries: &[(&str, PlayerState)]) -> ArenaState {
    ArenaState::new(
        "test-arena",
        "Test Arena",
        "1F3C6",
        entries.iter().map(|(service, state)| {
            (
                Player::new(*service, service.to_uppercase(), format!("http://{service}.test")),
                *state,
            )
        }),
    )
    .expect("test arena should build")
}

// What a scripted player does when polled.
#[derive(Clone, Debug)]
pub(crate) enum Reply {
    Act {
        polled: PolledAction,
        delay: Duration,
    },
    Hang,
    Fail,
    Panic,
}

impl Reply {
    pub(crate) fn act(action: Action, latency: Duration) -> Self {
        Reply::Act {
            polled: PolledAction::new(action, latency),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn after(self, wait: Duration) -> Self {
        match self {
            Reply::Act { polled, .. } => Reply::Act {
                polled,
                delay: wait,
            },
            other => other,
        }
    }
}

// Fake player services keyed by service identity. Unscripted players pass.
#[derive(Clone, Default)]
pub(crate) struct ScriptedProvider {
    replies: HashMap<String, Reply>,
    calls: CallLog,
    finished: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, service: &str, reply: Reply) -> Self {
        self.replies.insert(service.to_string(), reply);
        self
    }

    pub(crate) fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    // Count of polls that ran to completion.
    pub(crate) fn finished(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.finished)
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn poll(
        &self,
        _arena: Arc<ArenaState>,
        player: Player,
    ) -> Result<Option<PolledAction>, ProviderError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(player.service.clone());

        let outcome = match self.replies.get(&player.service).cloned() {
            None => Ok(None),
            Some(Reply::Act { polled, delay }) => {
                tokio::time::sleep(delay).await;
                Ok(Some(polled))
            }
            Some(Reply::Hang) => {
                std::future::pending::<()>().await;
                Ok(None)
            }
            Some(Reply::Fail) => Err(ProviderError::Transport("connection refused".to_string())),
            Some(Reply::Panic) => panic!("scripted provider panic"),
        };

        self.finished.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}
