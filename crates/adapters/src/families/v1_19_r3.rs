//! 1.19.4 onwards
//!
//! Open-ended: newer releases resolve here until a family replaces it.

use super::{decode_rename_item, open_anvil_screen};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

/// Anvil name limit raised from 35
const MAX_RENAME_LENGTH: usize = 50;

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x30,
    close_window: 0x11,
    set_slot: 0x14,
    window_property: 0x13,
    click_window: 0x0B,
    close_window_in: 0x0C,
    rename: 0x23,
    rename_via_plugin_channel: false,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_19R3;

impl VersionAdapter for V1_19R3 {
    fn family(&self) -> &'static str {
        "1_19_R3"
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
        MAX_RENAME_LENGTH
    }

    fn open_packet(&self, window_id: WindowId, title: &Component) -> ClientboundPacket {
        open_anvil_screen(window_id, title)
    }

    fn decode_rename(&self, packet: &ServerboundPacket) -> Option<String> {
        decode_rename_item(packet, MAX_RENAME_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::fixture::online_host;
    use anvilgui_core::{ItemStack, SlotContents};
    use anvilgui_protocol::PROPERTY_REPAIR_COST;

    #[test]
    fn test_open_zeroes_repair_cost() {
        let (host, player) = online_host("1.20.1");
        let contents = SlotContents::new(Some(ItemStack::paper()), None, Some(ItemStack::new("book")));
        let handle = V1_19R3
            .open_container(&host, player, &contents, &Component::repair())
            .unwrap();

        let packets: Vec<_> = host.take_sent().into_iter().map(|s| s.packet).collect();
        assert_eq!(packets.len(), 4);
        assert!(packets[0].is_open());
        assert_eq!(
            packets[3],
            ClientboundPacket::WindowProperty {
                window_id: handle.window_id,
                property: PROPERTY_REPAIR_COST,
                value: 0,
            }
        );
    }

    #[test]
    fn test_rename_filters_section_sign() {
        let packet = ServerboundPacket::RenameItem {
            name: "\u{a7}aGreen".into(),
        };
        assert_eq!(V1_19R3.decode_rename(&packet), Some("aGreen".into()));
    }

    #[test]
    fn test_rename_limit_fifty() {
        let fits = ServerboundPacket::RenameItem { name: "n".repeat(50) };
        let too_long = ServerboundPacket::RenameItem { name: "n".repeat(51) };
        assert_eq!(V1_19R3.decode_rename(&fits), Some("n".repeat(50)));
        assert_eq!(V1_19R3.decode_rename(&too_long), None);
    }
}
