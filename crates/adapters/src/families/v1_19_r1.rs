//! 1.19 - 1.19.2

use super::{decode_rename_item, open_anvil_screen, MODERN_MAX_RENAME_LENGTH};
use crate::adapter::{SlotLayout, VersionAdapter};
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{ClientboundPacket, PacketIds, ServerboundPacket};

static PACKET_IDS: PacketIds = PacketIds {
    open_window: 0x2B,
    close_window: 0x10,
    set_slot: 0x13,
    window_property: 0x12,
    click_window: 0x0A,
    close_window_in: 0x0B,
    rename: 0x22,
    rename_via_plugin_channel: false,
    plugin_data_length_prefixed: false,
};

static LAYOUT: SlotLayout = SlotLayout::SEQUENTIAL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_19R1;

impl VersionAdapter for V1_19R1 {
    fn family(&self) -> &'static str {
        "1_19_R1"
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
    use anvilgui_core::{AnvilError, SlotContents};

    #[test]
    fn test_open_for_offline_player_fails() {
        let (host, player) = online_host("1.19.2");
        host.disconnect(player);
        let result = V1_19R1.open_container(&host, player, &SlotContents::default(), &Component::repair());
        assert!(matches!(
            result,
            Err(AnvilError::HostOperationFailed {
                operation: "create_container",
                ..
            })
        ));
        assert_eq!(host.container_count(), 0);
    }

    #[test]
    fn test_close_clears_and_removes() {
        let (host, player) = online_host("1.19.2");
        let contents = SlotContents::new(Some(anvilgui_core::ItemStack::paper()), None, None);
        let handle = V1_19R1
            .open_container(&host, player, &contents, &Component::repair())
            .unwrap();
        V1_19R1.close_container(&host, handle).unwrap();

        assert!(host.container(handle.container).is_none());
        assert_eq!(
            host.sent_packets().last().map(|s| s.packet.clone()),
            Some(ClientboundPacket::CloseWindow {
                window_id: handle.window_id
            })
        );
    }
}
