//! 1.14 - 1.15.x
//!
//! First family with the menu type registry. Open screens can be re-sent for
//! a live window id, which retitles the window in place.

use super::{decode_rename_item, open_anvil_screen, MODERN_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2E,
    close_window: 0x13,
    set_slot: 0x16,
    window_property: 0x15,
    click_window: 0x09,
    close_window_in: 0x0A,
    rename: 0x1C,
    rename_via_plugin_channel: false,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_14R1;

impl VersionAdapter for V1_14R1 {
    fn family(&self) -> &'static str {
        "1_14_R1"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::fixture::online_host;
    use anvilgui_core::{ItemStack, Slot, SlotContents};

    #[test]
    fn test_title_change_in_place() {
        let (host, player) = online_host("1.14.4");
        let contents = SlotContents::new(Some(ItemStack::paper()), None, None);
        let handle = V1_14R1
            .open_container(&host, player, &contents, &Component::text("One"))
            .unwrap();
        host.take_sent();

        let same = V1_14R1
            .set_title(&host, handle, &Component::text("Two"))
            .unwrap();
        assert_eq!(same, handle);

        let sent = host.take_sent();
        assert_eq!(
            sent[0].packet,
            ClientboundPacket::OpenScreen {
                window_id: handle.window_id,
                menu_type: 7,
                title_json: Component::text("Two").to_json(),
            }
        );
        // Contents are re-sent after the screen
        assert!(sent.iter().any(|s| s.packet
            == ClientboundPacket::SetSlot {
                window_id: handle.window_id,
                slot: 0,
                item: Some(ItemStack::paper()),
            }));
        assert_eq!(V1_14R1.item(&host, same, Slot::InputLeft).unwrap(), Some(ItemStack::paper()));
    }

    #[test]
    fn test_decode_rename_packet() {
        let packet = ServerboundPacket::RenameItem {
            name: "Named".into(),
        };
        assert_eq!(V1_14R1.decode_rename(&packet), Some("Named".into()));
    }
}
