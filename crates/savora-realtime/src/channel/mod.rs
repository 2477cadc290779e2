//! Push channel sessions.

pub mod params;
pub mod session;
pub mod types;

pub use params::ConnectParams;
pub use session::ChannelSession;
pub use types::{ChannelKind, ChannelState, PushMessage};
