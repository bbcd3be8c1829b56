//! 1.17 - 1.18.x
//!
//! Serverbound window packet ids shift down by one from 1.16.

use super::{decode_rename_item, open_anvil_screen, MODERN_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2E,
    close_window: 0x13,
    set_slot: 0x16,
    window_property: 0x15,
    click_window: 0x08,
    close_window_in: 0x09,
    rename: 0x20,
    rename_via_plugin_channel: false,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_17R1;

impl VersionAdapter for V1_17R1 {
    fn family(&self) -> &'static str {
        "1_17_R1"
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
    use anvilgui_core::{AnvilError, ItemStack, Slot, SlotContents};

    #[test]
    fn test_set_rename_text_names_left_item() {
        let (host, player) = online_host("1.17.1");
        let contents = SlotContents::new(Some(ItemStack::paper()), None, None);
        let handle = V1_17R1
            .open_container(&host, player, &contents, &Component::repair())
            .unwrap();

        V1_17R1.set_rename_text(&host, handle, "hello").unwrap();
        assert_eq!(V1_17R1.rename_text(&host, handle).unwrap(), "hello");
        assert_eq!(
            V1_17R1.item(&host, handle, Slot::InputLeft).unwrap(),
            Some(ItemStack::paper().with_display_name("hello"))
        );
    }

    #[test]
    fn test_set_rename_text_copies_output() {
        let (host, player) = online_host("1.17.1");
        let contents = SlotContents::new(Some(ItemStack::paper()), None, Some(ItemStack::new("book")));
        let handle = V1_17R1
            .open_container(&host, player, &contents, &Component::repair())
            .unwrap();

        V1_17R1.set_rename_text(&host, handle, "hello").unwrap();
        assert_eq!(
            V1_17R1.item(&host, handle, Slot::InputLeft).unwrap(),
            Some(ItemStack::new("book").with_display_name("hello"))
        );
        assert_eq!(
            V1_17R1.item(&host, handle, Slot::Output).unwrap(),
            Some(ItemStack::new("book"))
        );
    }

    #[test]
    fn test_set_rename_text_needs_item() {
        let (host, player) = online_host("1.17.1");
        let handle = V1_17R1
            .open_container(&host, player, &SlotContents::default(), &Component::repair())
            .unwrap();
        assert!(matches!(
            V1_17R1.set_rename_text(&host, handle, "hello"),
            Err(AnvilError::InvalidState(_))
        ));
    }
}
