//! 1.8.3 - 1.8.x
//!
//! Windows are opened by type name with a JSON title, still fixed for the
//! lifetime of the window. The `MC|ItemName` payload is a length-prefixed
//! string.

use super::{decode_item_name_channel, ItemNamePayload, LEGACY_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

const WINDOW_TYPE_ANVIL: &str = "minecraft:anvil";

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2D,
    close_window: 0x2E,
    set_slot: 0x2F,
    window_property: 0x31,
    click_window: 0x0E,
    close_window_in: 0x0D,
    rename: 0x17,
    rename_via_plugin_channel: true,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_8R2;

impl VersionAdapter for V1_8R2 {
    fn family(&self) -> &'static str {
        "1_8_R2"
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
        // Slot count 0 makes the client use the anvil's own layout
        ClientboundPacket::OpenWindowNamed {
            window_id,
            window_type: WINDOW_TYPE_ANVIL.to_string(),
            title_json: title.to_json(),
            slot_count: 0,
        }
    }

    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String> {
        decode_item_name_channel(packet, ItemNamePayload::PrefixedString, LEGACY_MAX_RENAME_LENGTH)
    }
}
