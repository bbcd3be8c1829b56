//! 1.7.10
//!
//! Windows are opened by numeric inventory type with a plain-text title that
//! cannot change while the window is open. Rename text arrives on the
//! `MC|ItemName` channel as raw UTF-8.

use super::{decode_item_name_channel, ItemNamePayload, LEGACY_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

/// Anvil inventory type
const INVENTORY_TYPE_ANVIL: u8 = 8;

/// Slot count the client expects for an anvil window
const WINDOW_SLOT_COUNT: u8 = 9;

/// Longest title the open window packet carries
const MAX_TITLE_LENGTH: usize = 32;

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2D,
    close_window: 0x2E,
    set_slot: 0x2F,
    window_property: 0x31,
    click_window: 0x0E,
    close_window_in: 0x0D,
    rename: 0x17,
    rename_via_plugin_channel: true,
    plugin_data_length_prefixed: true,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_7R4;

impl VersionAdapter for V1_7R4 {
    fn family(&self) -> &'static str {
        "1_7_R4"
    }

    fn packet_ids(&self) -> &'static PacketIds {
        &PACKET_IDS
    }

    fn slot_layout(&self) -> &'static SlotLayout {
        &LAYOUT
    }

    fn title_mutable(&self) -> bool {
        false
    }

    fn max_rename_length(&self) -> usize {
        LEGACY_MAX_RENAME_LENGTH
    }

    fn open_packet(&self, window_id: WindowId, title: &Component) -> ClientboundPacket {
        ClientboundPacket::OpenWindowLegacy {
            window_id,
            inventory_type: INVENTORY_TYPE_ANVIL,
            title: title.to_plain().chars().take(MAX_TITLE_LENGTH).collect(),
            slot_count: WINDOW_SLOT_COUNT,
            use_title: true,
        }
    }

    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String> {
        decode_item_name_channel(packet, ItemNamePayload::RawUtf8, LEGACY_MAX_RENAME_LENGTH)
    }
}
