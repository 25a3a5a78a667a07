use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SignalingError;
use crate::models::{CallRole, ServerMessage};

pub type PeerSender = mpsc::UnboundedSender<ServerMessage>;

/// All mutable relay state lives behind one lock: the peer registry plus the
/// two role slots. Every read-then-set sequence runs under the write guard,
/// so two connections can never win the same empty slot.
#[derive(Default)]
struct RelayState {
    peers: HashMap<Uuid, PeerSender>,
    doctor: Option<Uuid>,
    patient: Option<Uuid>,
}

impl RelayState {
    fn slot(&self, role: CallRole) -> Option<Uuid> {
        match role {
            CallRole::Doctor => self.doctor,
            CallRole::Patient => self.patient,
        }
    }

    fn slot_mut(&mut self, role: CallRole) -> &mut Option<Uuid> {
        match role {
            CallRole::Doctor => &mut self.doctor,
            CallRole::Patient => &mut self.patient,
        }
    }

    fn role_of(&self, connection_id: Uuid) -> Option<CallRole> {
        if self.doctor == Some(connection_id) {
            Some(CallRole::Doctor)
        } else if self.patient == Some(connection_id) {
            Some(CallRole::Patient)
        } else {
            None
        }
    }

    /// Best-effort delivery. A missing or closed peer channel is logged and
    /// skipped; the target may have disconnected mid-signaling.
    fn deliver(&self, target: Uuid, message: ServerMessage) {
        match self.peers.get(&target) {
            Some(sender) => {
                if sender.send(message).is_err() {
                    warn!("Peer channel for connection {} is closed, dropping message", target);
                }
            }
            None => debug!("Connection {} is gone, dropping message", target),
        }
    }
}

/// Pairs at most one doctor and one patient connection and relays opaque
/// signaling payloads between whichever connections currently hold the two
/// slots. Owns its state; construct one instance per relay so it can be
/// tested in isolation.
pub struct CallRelayService {
    state: Arc<RwLock<RelayState>>,
}

impl CallRelayService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RelayState::default())),
        }
    }

    /// Registers a new connection and returns its handle. The connection
    /// starts unassigned and must request a role before it can be addressed.
    pub async fn register(&self, sender: PeerSender) -> Uuid {
        let connection_id = Uuid::new_v4();
        let mut state = self.state.write().await;
        state.peers.insert(connection_id, sender);
        debug!("Registered connection {}", connection_id);
        connection_id
    }

    /// Handles a `request_role` message. The requester receives either
    /// `role_assigned` or `role_rejected`; a rejection never mutates the
    /// slots. Valid only while the connection is unassigned.
    pub async fn request_role(&self, connection_id: Uuid, requested: &str) {
        let mut state = self.state.write().await;

        let outcome = match CallRole::parse(requested) {
            None => Err(SignalingError::InvalidRole(requested.to_string())),
            Some(role) => {
                if let Some(held) = state.role_of(connection_id) {
                    Err(SignalingError::AlreadyAssigned(held))
                } else if let Some(occupant) = state.slot(role) {
                    debug!("Slot {} already held by connection {}", role, occupant);
                    Err(SignalingError::SlotOccupied(role))
                } else {
                    *state.slot_mut(role) = Some(connection_id);
                    Ok(role)
                }
            }
        };

        match outcome {
            Ok(role) => {
                info!("Connection {} assigned role {}", connection_id, role);
                state.deliver(connection_id, ServerMessage::RoleAssigned { role });
            }
            Err(err) => {
                info!("Rejected role request from connection {}: {}", connection_id, err);
                state.deliver(
                    connection_id,
                    ServerMessage::RoleRejected {
                        reason: err.to_string(),
                    },
                );
            }
        }
    }

    /// Forwards a call offer to whichever connection currently holds the
    /// target slot. Dropped silently when the slot is empty.
    pub async fn initiate_call(
        &self,
        target_role: CallRole,
        signal: serde_json::Value,
        from_id: String,
        display_name: String,
    ) {
        let state = self.state.read().await;
        match state.slot(target_role) {
            Some(target) => {
                debug!("Relaying call offer from {} to {} slot", from_id, target_role);
                state.deliver(
                    target,
                    ServerMessage::IncomingCall {
                        signal,
                        from_id,
                        display_name,
                    },
                );
            }
            None => debug!("No {} connected, dropping call offer from {}", target_role, from_id),
        }
    }

    /// Forwards a call answer to the connection holding the target slot.
    /// Resolution is by slot at delivery time, not by the connection that
    /// sent the offer: if the slot changed hands between offer and answer,
    /// the current occupant receives the answer.
    pub async fn accept_call(&self, target_role: CallRole, signal: serde_json::Value) {
        let state = self.state.read().await;
        match state.slot(target_role) {
            Some(target) => {
                debug!("Relaying call answer to {} slot", target_role);
                state.deliver(target, ServerMessage::CallAccepted { signal });
            }
            None => debug!("No {} connected, dropping call answer", target_role),
        }
    }

    /// Handles transport loss. Frees the held slot (if any) and broadcasts
    /// `call_ended` to every remaining connection, slot holder or not, so no
    /// client is left showing a stale in-call screen.
    pub async fn disconnect(&self, connection_id: Uuid) {
        let mut state = self.state.write().await;

        if state.peers.remove(&connection_id).is_none() {
            return;
        }

        if let Some(role) = state.role_of(connection_id) {
            *state.slot_mut(role) = None;
            info!("Connection {} disconnected, released {} slot", connection_id, role);
        } else {
            info!("Connection {} disconnected", connection_id);
        }

        let remaining: Vec<Uuid> = state.peers.keys().copied().collect();
        for peer in remaining {
            state.deliver(peer, ServerMessage::CallEnded);
        }
    }

    /// Current occupant of a role slot, if any.
    pub async fn slot_holder(&self, role: CallRole) -> Option<Uuid> {
        self.state.read().await.slot(role)
    }

    pub async fn connection_count(&self) -> usize {
        self.state.read().await.peers.len()
    }
}

impl Default for CallRelayService {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CallRelayService {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
