//! # Host Primitives
//!
//! The embedding server implements [`Host`]. Adapters call these primitives
//! with values already shaped for the running server family; the host never
//! has to know which family is active.
//!
//! # Thread Safety
//!
//! Hosts are shared between the main thread and packet I/O threads, so every
//! primitive takes `&self`.

use crate::Result;
use anvilgui_core::{ContainerId, ItemStack, PlayerId, WindowId};
use anvilgui_protocol::ClientboundPacket;

/// Number of slots in an anvil container
pub const ANVIL_SLOT_COUNT: u8 = 3;

/// Ambient accessor for the server's self-reported version string
pub trait VersionSource: Send + Sync {
    fn version_string(&self) -> String;
}

/// Parameters for creating a synthetic container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Player the container is shown to
    pub owner: PlayerId,
    /// Window id the client will know the container by
    pub window_id: WindowId,
    /// Number of container slots
    pub slot_count: u8,
    /// Whether the host closes the container when the player walks away
    /// from the (nonexistent) block
    pub check_reachable: bool,
}

/// Primitives supplied by the embedding server
pub trait Host: VersionSource {
    /// Whether the player is still connected
    fn is_online(&self, player: PlayerId) -> bool;

    /// Advance the player's container counter
    fn next_window_id(&self, player: PlayerId) -> WindowId;

    /// Create an inventory-like container
    fn create_container(&self, spec: ContainerSpec) -> Result<ContainerId>;

    /// Read one container slot in host numbering
    fn item(&self, container: ContainerId, host_slot: u16) -> Result<Option<ItemStack>>;

    /// Write one container slot in host numbering
    fn set_item(&self, container: ContainerId, host_slot: u16, item: Option<ItemStack>) -> Result<()>;

    /// Current rename field of the container
    fn rename_text(&self, container: ContainerId) -> Result<Option<String>>;

    /// Replace the rename field of the container
    fn set_rename_text(&self, container: ContainerId, text: Option<String>) -> Result<()>;

    /// Deliver a packet to one connected player
    fn send(&self, player: PlayerId, packet: ClientboundPacket) -> Result<()>;

    /// Drop the container
    fn remove_container(&self, container: ContainerId) -> Result<()>;
}
