// libs/signaling-cell/src/models.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// The two role slots the relay tracks. Exactly one connection may hold
/// each slot at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallRole {
    #[serde(rename = "doctor")]
    Doctor,
    #[serde(rename = "patient")]
    Patient,
}

impl CallRole {
    /// Parses a client-supplied role string. Anything other than `doctor`
    /// or `patient` is rejected by the caller with an invalid-role notice.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "doctor" => Some(CallRole::Doctor),
            "patient" => Some(CallRole::Patient),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallRole::Doctor => "doctor",
            CallRole::Patient => "patient",
        }
    }
}

impl fmt::Display for CallRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// WIRE MESSAGES
// ==============================================================================

/// Messages a client may send to the relay.
///
/// `request_role` carries the role as a raw string so an unrecognized value
/// surfaces as an explicit `role_rejected` reply instead of a frame parse
/// failure. The two relay operations address a slot, not a connection: the
/// occupant is resolved at delivery time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    RequestRole {
        role: String,
    },
    InitiateCall {
        target_role: CallRole,
        signal: serde_json::Value,
        from_id: String,
        display_name: String,
    },
    AcceptCall {
        target_role: CallRole,
        signal: serde_json::Value,
    },
}

/// Messages the relay sends to clients. `signal` payloads are forwarded
/// verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    RoleAssigned {
        role: CallRole,
    },
    RoleRejected {
        reason: String,
    },
    IncomingCall {
        signal: serde_json::Value,
        from_id: String,
        display_name: String,
    },
    CallAccepted {
        signal: serde_json::Value,
    },
    CallEnded,
}
