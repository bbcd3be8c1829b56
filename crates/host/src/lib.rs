//! # AnvilGUI Host Layer
//!
//! The primitives the embedding game server supplies, and an in-process host.
//!
//! ## Modules
//!
//! - [`host`] - The [`Host`] and [`VersionSource`] traits
//! - [`error`] - Host failures and their mapping into core errors
//! - [`memory`] - [`MemoryHost`], a recording host for tests and simulations

pub mod error;
pub mod host;
pub mod memory;

// Re-export commonly used items
pub use error::{HostError, HostResultExt, Result};
pub use host::{ContainerSpec, Host, VersionSource, ANVIL_SLOT_COUNT};
pub use memory::{MemoryContainer, MemoryHost, SentPacket};
