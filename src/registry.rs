//! Process-wide room store.
//!
//! All room mutations funnel through the single `RwLock` here, which is what
//! serializes client events and timer callbacks against each other: whoever
//! holds the write lock owns every room field until they release it.

use crate::error::GameError;
use crate::room::Room;
use crate::types::{ConnectionId, RoomCode};
use rand::Rng;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Short human-typeable room codes: four digits, retry on collision.
/// Fine for the expected handful of concurrent rooms.
fn generate_room_code() -> RoomCode {
    let mut rng = rand::rng();
    rng.random_range(1000..10000).to_string()
}

#[derive(Default)]
pub struct RoomRegistry {
    pub rooms: RwLock<HashMap<RoomCode, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create a room with the caller as sole player and host.
    /// The code is generated and checked under the write lock, so two
    /// concurrent creates can never collide.
    pub async fn create(&self, host_name: String, connection_id: ConnectionId) -> Room {
        let mut rooms = self.rooms.write().await;
        let code = loop {
            let code = generate_room_code();
            if !rooms.contains_key(&code) {
                break code;
            }
        };
        let room = Room::new(code.clone(), host_name, connection_id);
        rooms.insert(code, room.clone());
        room
    }

    /// Run an operation against one room under the write lock.
    pub async fn with_room<R>(
        &self,
        code: &str,
        f: impl FnOnce(&mut Room) -> R,
    ) -> Result<R, GameError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms.get_mut(code).ok_or(GameError::RoomNotFound)?;
        Ok(f(room))
    }

    /// Drop a room; called once its player sequence is empty.
    pub async fn remove(&self, code: &str) {
        if self.rooms.write().await.remove(code).is_some() {
            tracing::info!(room = code, "room deleted");
        }
    }
}
