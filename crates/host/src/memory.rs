//! # In-Process Host
//!
//! [`MemoryHost`] keeps containers in memory and records every packet it is
//! asked to deliver. Tests use it to observe what an adapter did; the demo
//! binary uses it to simulate a server.

use crate::host::{ContainerSpec, Host, VersionSource};
use crate::{HostError, Result};
use anvilgui_core::{ContainerId, IdGenerator, ItemStack, PlayerId, WindowId};
use anvilgui_protocol::ClientboundPacket;
use dashmap::{DashMap, DashSet};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A packet delivered to a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPacket {
    pub player: PlayerId,
    pub packet: ClientboundPacket,
}

/// Host-side state of one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryContainer {
    pub owner: PlayerId,
    pub window_id: WindowId,
    pub slots: Vec<Option<ItemStack>>,
    pub rename_text: Option<String>,
    pub check_reachable: bool,
}

/// Recording host
pub struct MemoryHost {
    /// Reported version string
    version: RwLock<String>,

    /// How many times the version string was read
    version_reads: AtomicUsize,

    /// Connected players with their container counters
    online: DashSet<PlayerId>,
    counters: DashMap<PlayerId, IdGenerator>,

    /// Container id source
    ids: IdGenerator,

    /// Live containers
    containers: DashMap<ContainerId, MemoryContainer>,

    /// Containers whose slots reject writes
    read_only: DashSet<ContainerId>,

    /// Delivered packets in send order
    sent: Mutex<Vec<SentPacket>>,
}

impl MemoryHost {
    /// Create a host reporting `version`
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        tracing::debug!("Creating MemoryHost reporting {:?}", version);

        Self {
            version: RwLock::new(version),
            version_reads: AtomicUsize::new(0),
            online: DashSet::new(),
            counters: DashMap::new(),
            ids: IdGenerator::new(),
            containers: DashMap::new(),
            read_only: DashSet::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Mark a player as connected
    pub fn connect(&self, player: PlayerId) {
        self.online.insert(player);
    }

    /// Mark a player as disconnected
    ///
    /// Containers stay until removed; packets to the player fail.
    pub fn disconnect(&self, player: PlayerId) {
        self.online.remove(&player);
    }

    /// Change the reported version string
    pub fn set_version_string(&self, version: impl Into<String>) {
        *self.version.write() = version.into();
    }

    /// Number of `version_string` calls so far
    pub fn version_reads(&self) -> usize {
        self.version_reads.load(Ordering::SeqCst)
    }

    /// Snapshot of a container
    pub fn container(&self, id: ContainerId) -> Option<MemoryContainer> {
        self.containers.get(&id).map(|entry| entry.clone())
    }

    /// Number of live containers
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// All packets delivered so far
    pub fn sent_packets(&self) -> Vec<SentPacket> {
        self.sent.lock().clone()
    }

    /// Drain the delivered packets
    pub fn take_sent(&self) -> Vec<SentPacket> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Make every later slot write to `container` fail with [`HostError::Rejected`]
    pub fn fail_writes(&self, container: ContainerId) {
        self.read_only.insert(container);
    }

    /// Simulate the player typing into the rename field
    pub fn type_rename_text(&self, container: ContainerId, text: &str) -> Result<()> {
        self.set_rename_text(container, Some(text.to_string()))
    }

    fn with_container<T>(
        &self,
        id: ContainerId,
        f: impl FnOnce(&mut MemoryContainer) -> Result<T>,
    ) -> Result<T> {
        let mut entry = self
            .containers
            .get_mut(&id)
            .ok_or(HostError::NoSuchContainer(id))?;
        f(entry.value_mut())
    }
}

impl VersionSource for MemoryHost {
    fn version_string(&self) -> String {
        self.version_reads.fetch_add(1, Ordering::SeqCst);
        self.version.read().clone()
    }
}

impl Host for MemoryHost {
    fn is_online(&self, player: PlayerId) -> bool {
        self.online.contains(&player)
    }

    fn next_window_id(&self, player: PlayerId) -> WindowId {
        self.counters.entry(player).or_default().next_window_id()
    }

    fn create_container(&self, spec: ContainerSpec) -> Result<ContainerId> {
        if !self.is_online(spec.owner) {
            return Err(HostError::Disconnected(spec.owner));
        }

        let id = self.ids.next_container_id();
        tracing::debug!(
            "Creating container {} for {} (window {})",
            id.get(),
            spec.owner,
            spec.window_id.get()
        );

        self.containers.insert(
            id,
            MemoryContainer {
                owner: spec.owner,
                window_id: spec.window_id,
                slots: vec![None; spec.slot_count as usize],
                rename_text: None,
                check_reachable: spec.check_reachable,
            },
        );
        Ok(id)
    }

    fn item(&self, container: ContainerId, host_slot: u16) -> Result<Option<ItemStack>> {
        self.with_container(container, |c| {
            c.slots
                .get(host_slot as usize)
                .cloned()
                .ok_or(HostError::SlotOutOfRange {
                    container,
                    slot: host_slot,
                })
        })
    }

    fn set_item(&self, container: ContainerId, host_slot: u16, item: Option<ItemStack>) -> Result<()> {
        if self.read_only.contains(&container) {
            return Err(HostError::Rejected(format!(
                "container {} is read-only",
                container.get()
            )));
        }
        self.with_container(container, |c| {
            let slot = c
                .slots
                .get_mut(host_slot as usize)
                .ok_or(HostError::SlotOutOfRange {
                    container,
                    slot: host_slot,
                })?;
            *slot = item;
            Ok(())
        })
    }

    fn rename_text(&self, container: ContainerId) -> Result<Option<String>> {
        self.with_container(container, |c| Ok(c.rename_text.clone()))
    }

    fn set_rename_text(&self, container: ContainerId, text: Option<String>) -> Result<()> {
        self.with_container(container, |c| {
            c.rename_text = text;
            Ok(())
        })
    }

    fn send(&self, player: PlayerId, packet: ClientboundPacket) -> Result<()> {
        if !self.is_online(player) {
            return Err(HostError::Disconnected(player));
        }
        tracing::trace!("-> {}: {:?}", player, packet);
        self.sent.lock().push(SentPacket { player, packet });
        Ok(())
    }

    fn remove_container(&self, container: ContainerId) -> Result<()> {
        self.containers
            .remove(&container)
            .map(|_| ())
            .ok_or(HostError::NoSuchContainer(container))
    }
}
