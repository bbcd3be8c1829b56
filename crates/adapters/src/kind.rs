//! Closed set of adapters
//!
//! Every family is a variant; adding a family means adding a variant here
//! and an entry in the default registry.

use crate::adapter::{ContainerHandle, SlotLayout, VersionAdapter};
use crate::families::{V1_14R1, V1_16R3, V1_17R1, V1_19R1, V1_19R3, V1_7R4, V1_8R2};
use anvilgui_core::{Component, ItemStack, PlayerId, Result, Slot, SlotContents, WindowId};
use anvilgui_host::{ContainerSpec, Host};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    V1_7R4(V1_7R4),
    V1_8R2(V1_8R2),
    V1_14R1(V1_14R1),
    V1_16R3(V1_16R3),
    V1_17R1(V1_17R1),
    V1_19R1(V1_19R1),
    V1_19R3(V1_19R3),
}

/// Forward a call to the variant's adapter
macro_rules! dispatch {
    ($self:ident, $adapter:ident => $call:expr) => {
        match $self {
            AdapterKind::V1_7R4($adapter) => $call,
            AdapterKind::V1_8R2($adapter) => $call,
            AdapterKind::V1_14R1($adapter) => $call,
            AdapterKind::V1_16R3($adapter) => $call,
            AdapterKind::V1_17R1($adapter) => $call,
            AdapterKind::V1_19R1($adapter) => $call,
            AdapterKind::V1_19R3($adapter) => $call,
        }
    };
}

impl AdapterKind {
    pub fn v1_7_r4() -> Self {
        Self::V1_7R4(V1_7R4)
    }

    pub fn v1_8_r2() -> Self {
        Self::V1_8R2(V1_8R2)
    }

    pub fn v1_14_r1() -> Self {
        Self::V1_14R1(V1_14R1)
    }

    pub fn v1_16_r3() -> Self {
        Self::V1_16R3(V1_16R3)
    }

    pub fn v1_17_r1() -> Self {
        Self::V1_17R1(V1_17R1)
    }

    pub fn v1_19_r1() -> Self {
        Self::V1_19R1(V1_19R1)
    }

    pub fn v1_19_r3() -> Self {
        Self::V1_19R3(V1_19R3)
    }
}

impl VersionAdapter for AdapterKind {
    fn family(&self) -> &'static str {
        dispatch!(self, a => a.family())
    }

    fn packet_ids(&self) -> &'static PacketIds {
        dispatch!(self, a => a.packet_ids())
    }

    fn slot_layout(&self) -> &'static SlotLayout {
        dispatch!(self, a => a.slot_layout())
    }

    fn title_mutable(&self) -> bool {
        dispatch!(self, a => a.title_mutable())
    }

    fn max_rename_length(&self) -> usize {
        dispatch!(self, a => a.max_rename_length())
    }

    fn open_packet(&self, window_id: WindowId, title: &Component) -> ClientboundPacket {
        dispatch!(self, a => a.open_packet(window_id, title))
    }

    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String> {
        dispatch!(self, a => a.decode_rename(packet))
    }

    fn translate_slot(&self, slot: Slot) -> u16 {
        dispatch!(self, a => a.translate_slot(slot))
    }

    fn logical_slot(&self, host_slot: u16) -> Option<Slot> {
        dispatch!(self, a => a.logical_slot(host_slot))
    }

    fn container_spec(&self, owner: PlayerId, window_id: WindowId) -> ContainerSpec {
        dispatch!(self, a => a.container_spec(owner, window_id))
    }

    fn open_container(
        &self,
        host: &dyn Host,
        owner: PlayerId,
        contents: &SlotContents,
        title: &Component,
    ) -> Result<ContainerHandle> {
        dispatch!(self, a => a.open_container(host, owner, contents, title))
    }

    fn set_title(
        &self,
        host: &dyn Host,
        handle: ContainerHandle,
        title: &Component,
    ) -> Result<ContainerHandle> {
        dispatch!(self, a => a.set_title(host, handle, title))
    }

    fn item(&self, host: &dyn Host, handle: ContainerHandle, slot: Slot) -> Result<Option<ItemStack>> {
        dispatch!(self, a => a.item(host, handle, slot))
    }

    fn set_item(
        &self,
        host: &dyn Host,
        handle: ContainerHandle,
        slot: Slot,
        item: Option<ItemStack>,
    ) -> Result<()> {
        dispatch!(self, a => a.set_item(host, handle, slot, item))
    }

    fn rename_text(&self, host: &dyn Host, handle: ContainerHandle) -> Result<String> {
        dispatch!(self, a => a.rename_text(host, handle))
    }

    fn set_rename_text(&self, host: &dyn Host, handle: ContainerHandle, text: &str) -> Result<()> {
        dispatch!(self, a => a.set_rename_text(host, handle, text))
    }

    fn discard_container(&self, host: &dyn Host, handle: ContainerHandle) -> Result<()> {
        dispatch!(self, a => a.discard_container(host, handle))
    }

    fn close_container(&self, host: &dyn Host, handle: ContainerHandle) -> Result<()> {
        dispatch!(self, a => a.close_container(host, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_variant() {
        assert_eq!(AdapterKind::v1_7_r4().family(), "1_7_R4");
        assert_eq!(AdapterKind::v1_19_r3().family(), "1_19_R3");
        assert!(!AdapterKind::v1_8_r2().title_mutable());
        assert!(AdapterKind::v1_14_r1().title_mutable());
    }

    #[test]
    fn test_every_kind_translates_bijectively() {
        let kinds = [
            AdapterKind::v1_7_r4(),
            AdapterKind::v1_8_r2(),
            AdapterKind::v1_14_r1(),
            AdapterKind::v1_16_r3(),
            AdapterKind::v1_17_r1(),
            AdapterKind::v1_19_r1(),
            AdapterKind::v1_19_r3(),
        ];
        for kind in kinds {
            for slot in Slot::ALL {
                assert_eq!(kind.logical_slot(kind.translate_slot(slot)), Some(slot), "{}", kind.family());
            }
        }
    }
}
