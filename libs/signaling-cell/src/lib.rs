// libs/signaling-cell/src/lib.rs
//! # Signaling Cell
//!
//! WebRTC call-pairing and signaling relay for doctor-patient video
//! consultations. Clients connect over a WebSocket, claim one of two role
//! slots (`doctor` or `patient`), and exchange opaque session-description
//! and ICE payloads through the relay.
//!
//! Pairing rules:
//!
//! - At most one connection holds each slot; a request for an occupied slot
//!   is rejected without state change.
//! - Call offers and answers address a slot, and are delivered to whichever
//!   connection occupies it at that moment. Messages targeting an empty
//!   slot are dropped.
//! - Any disconnect frees the held slot and broadcasts `call_ended` to every
//!   remaining connection.
//!
//! The relay keeps no persistent state; a restart clears both slots and
//! clients must re-request their roles.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::SignalingError;
pub use models::{CallRole, ClientMessage, ServerMessage};
pub use router::signaling_routes;
pub use services::{CallRelayService, PeerSender};
