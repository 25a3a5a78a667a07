pub mod relay;

pub use relay::{CallRelayService, PeerSender};
