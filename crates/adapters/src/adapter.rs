//! # Adapter Capability Interface
//!
//! Every supported server family implements [`VersionAdapter`]. A family only
//! describes its own representation (packet ids, how a window is opened, how
//! rename text arrives, which slots the host uses); the container lifecycle
//! built on top of that is shared through the trait's provided methods.
//!
//! # Slot Numbering
//!
//! Logical slots are the three anvil positions. Host slots are the numbers
//! the family's container and window packets use. Host slots past the
//! container belong to the player's own inventory and have no logical slot.

use anvilgui_core::{
    AnvilError, Component, ContainerId, ItemStack, PlayerId, Result, Slot, SlotContents, WindowId,
};
use anvilgui_host::{ContainerSpec, Host, HostResultExt, ANVIL_SLOT_COUNT};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket, PROPERTY_REPAIR_COST};

/// An open container as one family sees it
///
/// # Invariant
/// Valid until the container closes or an adapter hands out a replacement
/// (title changes on families that cannot retitle a window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    /// Player viewing the container
    pub owner: PlayerId,
    /// Host-side container
    pub container: ContainerId,
    /// Window id known to the client
    pub window_id: WindowId,
}

/// Host slot numbers of the three logical slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    /// Indexed by [`Slot::index`]
    pub host_slots: [u16; 3],
}

impl SlotLayout {
    /// Container slots first, in logical order
    pub const SEQUENTIAL: SlotLayout = SlotLayout {
        host_slots: [0, 1, 2],
    };

    pub fn to_host(&self, slot: Slot) -> u16 {
        self.host_slots[slot.index()]
    }

    pub fn to_logical(&self, host_slot: u16) -> Option<Slot> {
        self.host_slots
            .iter()
            .position(|&candidate| candidate == host_slot)
            .and_then(Slot::from_index)
    }
}

/// Version-specific implementation of the anvil capabilities
pub trait VersionAdapter: Send + Sync {
    // ========== Family description ==========

    /// Family name, e.g. `1_19_R3`
    fn family(&self) -> &'static str;

    /// Packet ids this family uses
    fn packet_ids(&self) -> &'static PacketIds;

    /// Host numbering of the logical slots
    fn slot_layout(&self) -> &'static SlotLayout;

    /// Whether an open window can be retitled without replacing the container
    fn title_mutable(&self) -> bool;

    /// Longest rename text the server accepts
    fn max_rename_length(&self) -> usize;

    /// The family's open-window packet
    fn open_packet(&self, window_id: WindowId, title: &Component) -> ClientboundPacket;

    /// Rename text carried by an inbound packet
    ///
    /// `None` when the packet is not a rename or the server would ignore it.
    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String>;

    // ========== Slot translation ==========

    fn translate_slot(&self, slot: Slot) -> u16 {
        self.slot_layout().to_host(slot)
    }

    fn logical_slot(&self, host_slot: u16) -> Option<Slot> {
        self.slot_layout().to_logical(host_slot)
    }

    // ========== Container lifecycle ==========

    /// Container parameters for a new anvil
    fn container_spec(&self, owner: PlayerId, window_id: WindowId) -> ContainerSpec {
        ContainerSpec {
            owner,
            window_id,
            slot_count: ANVIL_SLOT_COUNT,
            check_reachable: false,
        }
    }

    /// Create the container, fill it and show it to `owner`
    fn open_container(
        &self,
        host: &dyn Host,
        owner: PlayerId,
        contents: &SlotContents,
        title: &Component,
    ) -> Result<ContainerHandle> {
        let window_id = host.next_window_id(owner);
        let container = host
            .create_container(self.container_spec(owner, window_id))
            .op("create_container")?;
        let handle = ContainerHandle {
            owner,
            container,
            window_id,
        };

        let shown = fill_container(self, host, handle, contents)
            .and_then(|_| show_container(self, host, handle, contents, title));
        if let Err(err) = shown {
            // The viewer never got a usable window; do not leak the container
            let _ = host.remove_container(container);
            return Err(err);
        }

        tracing::debug!(
            "[{}] Opened container {} as window {} for {}",
            self.family(),
            container.get(),
            window_id.get(),
            owner
        );
        Ok(handle)
    }

    /// Change the window title
    ///
    /// Returns the handle to use from now on, which differs from `handle`
    /// when the family has to replace the container.
    /// On error `handle` stays valid and its container keeps its items.
    fn set_title(
        &self,
        host: &dyn Host,
        handle: ContainerHandle,
        title: &Component,
    ) -> Result<ContainerHandle> {
        let contents = read_contents(self, host, handle)?;

        if self.title_mutable() {
            show_container(self, host, handle, &contents, title)?;
            tracing::debug!("[{}] Retitled window {}", self.family(), handle.window_id.get());
            return Ok(handle);
        }

        // The old container stays intact until the replacement is shown; the
        // client drops its current window when the new open packet arrives
        let rename_text = host.rename_text(handle.container).op("rename_text")?;
        let replacement = self.open_container(host, handle.owner, &contents, title)?;
        if let Err(err) = host
            .set_rename_text(replacement.container, rename_text)
            .op("set_rename_text")
        {
            let _ = self.discard_container(host, replacement);
            return Err(err);
        }

        if let Err(err) = self.discard_container(host, handle) {
            tracing::warn!(
                "[{}] Replaced container {} could not be dropped: {}",
                self.family(),
                handle.container.get(),
                err
            );
        }

        tracing::debug!(
            "[{}] Replaced window {} with {} to change the title",
            self.family(),
            handle.window_id.get(),
            replacement.window_id.get()
        );
        Ok(replacement)
    }

    /// Read one logical slot
    fn item(&self, host: &dyn Host, handle: ContainerHandle, slot: Slot) -> Result<Option<ItemStack>> {
        host.item(handle.container, self.translate_slot(slot)).op("item")
    }

    /// Write one logical slot and push it to the viewer
    fn set_item(
        &self,
        host: &dyn Host,
        handle: ContainerHandle,
        slot: Slot,
        item: Option<ItemStack>,
    ) -> Result<()> {
        let host_slot = self.translate_slot(slot);
        host.set_item(handle.container, host_slot, item.clone())
            .op("set_item")?;
        host.send(
            handle.owner,
            ClientboundPacket::SetSlot {
                window_id: handle.window_id,
                slot: host_slot as i16,
                item,
            },
        )
        .op("send")
    }

    /// Current text of the rename field, empty when nothing was typed
    fn rename_text(&self, host: &dyn Host, handle: ContainerHandle) -> Result<String> {
        Ok(host
            .rename_text(handle.container)
            .op("rename_text")?
            .unwrap_or_default())
    }

    /// Replace the text in the rename field
    ///
    /// The client shows the display name of the item being renamed, so the
    /// text is written onto a copy of the output (or, when that is empty, the
    /// left input) and placed in the left input.
    ///
    /// # Errors
    /// [`AnvilError::InvalidState`] when both the left input and the output are empty.
    fn set_rename_text(&self, host: &dyn Host, handle: ContainerHandle, text: &str) -> Result<()> {
        let text: String = text.chars().take(self.max_rename_length()).collect();

        let base = match self.item(host, handle, Slot::Output)? {
            Some(item) => item,
            None => self.item(host, handle, Slot::InputLeft)?.ok_or_else(|| {
                AnvilError::InvalidState(
                    "rename text needs an item in the output or left input slot".into(),
                )
            })?,
        };

        host.set_rename_text(handle.container, Some(text.clone()))
            .op("set_rename_text")?;
        self.set_item(host, handle, Slot::InputLeft, Some(base.with_display_name(text)))
    }

    /// Drop the container without touching the viewer's window
    ///
    /// The container is emptied first so the host never hands its items back.
    fn discard_container(&self, host: &dyn Host, handle: ContainerHandle) -> Result<()> {
        for slot in Slot::ALL {
            host.set_item(handle.container, self.translate_slot(slot), None)
                .op("set_item")?;
        }
        host.remove_container(handle.container)
            .op("remove_container")
    }

    /// Drop the container and close the viewer's window
    ///
    /// Once this returns `Ok` the container is gone. The close packet is
    /// best effort.
    fn close_container(&self, host: &dyn Host, handle: ContainerHandle) -> Result<()> {
        self.discard_container(host, handle)?;

        // A disconnected viewer has no window left to close
        if host.is_online(handle.owner) {
            let sent = host.send(
                handle.owner,
                ClientboundPacket::CloseWindow {
                    window_id: handle.window_id,
                },
            );
            if let Err(err) = sent {
                tracing::warn!(
                    "[{}] Close packet for window {} not sent: {}",
                    self.family(),
                    handle.window_id.get(),
                    err
                );
            }
        }

        tracing::debug!(
            "[{}] Closed container {} (window {})",
            self.family(),
            handle.container.get(),
            handle.window_id.get()
        );
        Ok(())
    }
}

/// Write `contents` into the host container
fn fill_container<A: VersionAdapter + ?Sized>(
    adapter: &A,
    host: &dyn Host,
    handle: ContainerHandle,
    contents: &SlotContents,
) -> Result<()> {
    for (slot, item) in contents.iter() {
        host.set_item(handle.container, adapter.translate_slot(slot), Some(item.clone()))
            .op("set_item")?;
    }
    Ok(())
}

/// Send the open packet, the slot contents and a zero repair cost
fn show_container<A: VersionAdapter + ?Sized>(
    adapter: &A,
    host: &dyn Host,
    handle: ContainerHandle,
    contents: &SlotContents,
    title: &Component,
) -> Result<()> {
    host.send(handle.owner, adapter.open_packet(handle.window_id, title))
        .op("send")?;

    for (slot, item) in contents.iter() {
        host.send(
            handle.owner,
            ClientboundPacket::SetSlot {
                window_id: handle.window_id,
                slot: adapter.translate_slot(slot) as i16,
                item: Some(item.clone()),
            },
        )
        .op("send")?;
    }

    host.send(
        handle.owner,
        ClientboundPacket::WindowProperty {
            window_id: handle.window_id,
            property: PROPERTY_REPAIR_COST,
            value: 0,
        },
    )
    .op("send")
}

/// Read all three logical slots from the host container
fn read_contents<A: VersionAdapter + ?Sized>(
    adapter: &A,
    host: &dyn Host,
    handle: ContainerHandle,
) -> Result<SlotContents> {
    let mut contents = SlotContents::default();
    for slot in Slot::ALL {
        contents.set(slot, adapter.item(host, handle, slot)?);
    }
    Ok(contents)
}

/// Strip characters the server refuses in item names
///
/// Section signs and control characters never reach an item name.
pub fn filter_name(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\u{a7}' && c >= ' ' && c != '\u{7f}')
        .collect()
}

/// Accept `text` as rename text if it fits `max` characters
pub fn accept_name(text: &str, max: usize) -> Option<String> {
    let filtered = filter_name(text);
    (filtered.chars().count() <= max).then_some(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_layout() {
        let layout = SlotLayout::SEQUENTIAL;
        for slot in Slot::ALL {
            assert_eq!(layout.to_logical(layout.to_host(slot)), Some(slot));
        }
        assert_eq!(layout.to_logical(3), None);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(filter_name("\u{a7}cRed\u{7}"), "cRed");
        assert_eq!(filter_name("plain name"), "plain name");
    }

    #[test]
    fn test_accept_name_limit() {
        assert_eq!(accept_name("short", 30), Some("short".into()));
        assert_eq!(accept_name(&"x".repeat(31), 30), None);
        assert_eq!(accept_name(&format!("{}\u{a7}", "x".repeat(30)), 30), Some("x".repeat(30)));
    }
}
