use crate::config::ServerConfig;
use crate::fanout::Fanout;
use crate::registry::RoomRegistry;
use crate::types::PlayerId;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Shared application state
pub struct AppState {
    pub registry: RoomRegistry,
    pub fanout: Fanout,
    /// Pending disconnect-grace timers, keyed by the player they would
    /// remove. Arming a second timer for the same player replaces (aborts)
    /// the first, so removals never stack.
    pub grace_timers: Mutex<HashMap<PlayerId, JoinHandle<()>>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: RoomRegistry::new(),
            fanout: Fanout::new(),
            grace_timers: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Replace any pending grace timer for this player with a new one.
    pub async fn arm_grace_timer(&self, player_id: PlayerId, handle: JoinHandle<()>) {
        if let Some(old) = self.grace_timers.lock().await.insert(player_id, handle) {
            old.abort();
        }
    }

    /// Cancel a pending grace timer, if any (rejoin or kick won the race).
    pub async fn cancel_grace_timer(&self, player_id: &str) {
        if let Some(handle) = self.grace_timers.lock().await.remove(player_id) {
            handle.abort();
        }
    }
}
