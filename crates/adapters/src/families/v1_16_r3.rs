//! 1.16.4 - 1.16.5

use super::{decode_rename_item, open_anvil_screen, MODERN_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2D,
    close_window: 0x12,
    set_slot: 0x15,
    window_property: 0x14,
    click_window: 0x09,
    close_window_in: 0x0A,
    rename: 0x20,
    rename_via_plugin_channel: false,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_16R3;

impl VersionAdapter for V1_16R3 {
    fn family(&self) -> &'static str {
        "1_16_R3"
    }

    fn packet_ids(&self) -> &'static PacketIds {
        &PACKET_IDS
    }

    fn slot_layout(&self) -> &'static SlotLayout {
        &LAYOUT
    }

    fn title_mutable(&self) -> bool {
        true
    }

    fn max_rename_length(&self) -> usize {
        MODERN_MAX_RENAME_LENGTH
    }

    fn open_packet(&self, window_id: WindowId, title: &Component) -> ClientboundPacket {
        open_anvil_screen(window_id, title)
    }

    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String> {
        decode_rename_item(packet, MODERN_MAX_RENAME_LENGTH)
    }
}
