use thiserror::Error;

use crate::models::CallRole;

/// Rejection reasons reported back to the requesting connection. None of
/// these terminate the relay; they are carried to the client inside a
/// `role_rejected` message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalingError {
    #[error("A {0} is already connected")]
    SlotOccupied(CallRole),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Connection already holds the {0} role")]
    AlreadyAssigned(CallRole),
}
