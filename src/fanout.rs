//! Transport fan-out: the four primitives the game core is allowed to use.
//!
//! Send-to-one, send-to-room, room membership, and (via `ws`) the disconnect
//! callback. Each connection registers an unbounded sender that its socket
//! task drains; sends are fire-and-forget and never awaited for delivery.

use crate::protocol::ServerMessage;
use crate::types::{ConnectionId, RoomCode};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

pub type ConnectionSender = mpsc::UnboundedSender<ServerMessage>;

#[derive(Default)]
pub struct Fanout {
    connections: RwLock<HashMap<ConnectionId, ConnectionSender>>,
    memberships: RwLock<HashMap<RoomCode, HashSet<ConnectionId>>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, connection_id: ConnectionId, sender: ConnectionSender) {
        self.connections.write().await.insert(connection_id, sender);
    }

    /// Forget a connection entirely (socket closed).
    pub async fn unregister(&self, connection_id: &str) {
        self.connections.write().await.remove(connection_id);
        let mut memberships = self.memberships.write().await;
        for members in memberships.values_mut() {
            members.remove(connection_id);
        }
        memberships.retain(|_, members| !members.is_empty());
    }

    pub async fn join_room(&self, room_code: &str, connection_id: &str) {
        self.memberships
            .write()
            .await
            .entry(room_code.to_string())
            .or_default()
            .insert(connection_id.to_string());
    }

    pub async fn leave_room(&self, room_code: &str, connection_id: &str) {
        if let Some(members) = self.memberships.write().await.get_mut(room_code) {
            members.remove(connection_id);
        }
    }

    pub async fn send_to(&self, connection_id: &str, msg: ServerMessage) {
        if let Some(sender) = self.connections.read().await.get(connection_id) {
            // Receiver gone means the socket is tearing down; nothing to do.
            let _ = sender.send(msg);
        }
    }

    pub async fn send_room(&self, room_code: &str, msg: ServerMessage) {
        let members: Vec<ConnectionId> = match self.memberships.read().await.get(room_code) {
            Some(members) => members.iter().cloned().collect(),
            None => return,
        };
        let connections = self.connections.read().await;
        for id in members {
            if let Some(sender) = connections.get(&id) {
                let _ = sender.send(msg.clone());
            }
        }
    }
}
