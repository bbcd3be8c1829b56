//! Server families
//!
//! One module per supported family. Families that share a wire shape share
//! the helpers below; everything else is per-family data.

pub mod v1_14_r1;
pub mod v1_16_r3;
pub mod v1_17_r1;
pub mod v1_19_r1;
pub mod v1_19_r3;
pub mod v1_7_r4;
pub mod v1_8_r2;

pub use v1_14_r1::V1_14R1;
pub use v1_16_r3::V1_16R3;
pub use v1_17_r1::V1_17R1;
pub use v1_19_r1::V1_19R1;
pub use v1_19_r3::V1_19R3;
pub use v1_7_r4::V1_7R4;
pub use v1_8_r2::V1_8R2;

use crate::adapter::accept_name;
use anvilgui_core::{Component, WindowId};
use anvilgui_protocol::{read_string, ClientboundPacket, ServerboundPacket, ITEM_NAME_CHANNEL, MAX_STRING_LENGTH};
use bytes::BytesMut;

/// Anvil entry of the 1.14+ menu type registry
pub(crate) const ANVIL_MENU_TYPE: i32 = 7;

/// Rename limit of the 1.14+ anvil menu
pub(crate) const MODERN_MAX_RENAME_LENGTH: usize = 35;

/// Rename limit of the pre-1.14 anvil container
pub(crate) const LEGACY_MAX_RENAME_LENGTH: usize = 30;

/// How the `MC|ItemName` payload encodes its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemNamePayload {
    /// The payload bytes are the UTF-8 text
    RawUtf8,
    /// VarInt length followed by UTF-8
    PrefixedString,
}

/// Rename text from an `MC|ItemName` plugin message
///
/// An empty payload clears the name. Undecodable or over-long names are
/// ignored, as the server ignores them.
pub(crate) fn decode_item_name_channel(
    packet: &ServerboundPacket,
    payload: ItemNamePayload,
    max: usize,
) -> Option<String> {
    let ServerboundPacket::PluginMessage { channel, data } = packet else {
        return None;
    };
    if channel != ITEM_NAME_CHANNEL {
        return None;
    }
    if data.is_empty() {
        return Some(String::new());
    }

    let text = match payload {
        ItemNamePayload::RawUtf8 => String::from_utf8(data.clone()).ok()?,
        ItemNamePayload::PrefixedString => {
            let mut buf = BytesMut::from(data.as_slice());
            read_string(&mut buf, MAX_STRING_LENGTH).ok()?
        }
    };
    accept_name(&text, max)
}

/// Rename text from a dedicated rename packet
pub(crate) fn decode_rename_item(packet: &ServerboundPacket, max: usize) -> Option<String> {
    match packet {
        ServerboundPacket::RenameItem { name } => accept_name(name, max),
        _ => None,
    }
}

/// 1.14+ open screen for the anvil menu
pub(crate) fn open_anvil_screen(window_id: WindowId, title: &Component) -> ClientboundPacket {
    ClientboundPacket::OpenScreen {
        window_id,
        menu_type: ANVIL_MENU_TYPE,
        title_json: title.to_json(),
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use anvilgui_core::PlayerId;
    use anvilgui_host::MemoryHost;

    /// Host with one connected player
    pub fn online_host(version: &str) -> (MemoryHost, PlayerId) {
        let host = MemoryHost::new(version);
        let player = PlayerId::new(1);
        host.connect(player);
        (host, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name_channel_raw() {
        let packet = ServerboundPacket::PluginMessage {
            channel: ITEM_NAME_CHANNEL.into(),
            data: b"Sword".to_vec(),
        };
        assert_eq!(
            decode_item_name_channel(&packet, ItemNamePayload::RawUtf8, 30),
            Some("Sword".into())
        );
    }

    #[test]
    fn test_item_name_channel_other_channel() {
        let packet = ServerboundPacket::PluginMessage {
            channel: "MC|Brand".into(),
            data: b"vanilla".to_vec(),
        };
        assert_eq!(decode_item_name_channel(&packet, ItemNamePayload::RawUtf8, 30), None);
    }

    #[test]
    fn test_item_name_channel_empty_clears() {
        let packet = ServerboundPacket::PluginMessage {
            channel: ITEM_NAME_CHANNEL.into(),
            data: Vec::new(),
        };
        assert_eq!(
            decode_item_name_channel(&packet, ItemNamePayload::PrefixedString, 30),
            Some(String::new())
        );
    }

    #[test]
    fn test_rename_item_over_limit_ignored() {
        let packet = ServerboundPacket::RenameItem {
            name: "y".repeat(36),
        };
        assert_eq!(decode_rename_item(&packet, MODERN_MAX_RENAME_LENGTH), None);
    }
}
