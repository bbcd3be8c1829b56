//! # Packet Builder
//!
//! Frame encoding for clientbound window packets and frame decoding for the
//! serverbound packets an anvil receives.
//!
//! A frame is `{VARINT packet_id}{fields}`; length prefixing and compression
//! are the host connection's business.
//!
//! ## Usage
//!
//! ```rust
//! use anvilgui_core::WindowId;
//! use anvilgui_protocol::*;
//!
//! let ids = PacketIds {
//!     open_window: 0x2D,
//!     close_window: 0x2E,
//!     set_slot: 0x2F,
//!     window_property: 0x31,
//!     click_window: 0x0E,
//!     close_window_in: 0x0D,
//!     rename: 0x17,
//!     rename_via_plugin_channel: true,
//!     plugin_data_length_prefixed: false,
//! };
//! let frame = encode_clientbound(&ClientboundPacket::CloseWindow { window_id: WindowId::new(3) }, &ids);
//! assert_eq!(&frame[..], &[0x2E, 3]);
//! ```

use crate::{codecs::*, packets::*, ProtocolError, Result};
use anvilgui_core::WindowId;
use bytes::{Buf, BufMut, BytesMut};

/// Encode a clientbound packet into a frame
pub fn encode_clientbound(packet: &ClientboundPacket, ids: &PacketIds) -> BytesMut {
    let mut buf = BytesMut::new();
    match packet {
        ClientboundPacket::OpenWindowLegacy {
            window_id,
            inventory_type,
            title,
            slot_count,
            use_title,
        } => {
            write_varint(&mut buf, ids.open_window);
            buf.put_u8(window_id.get());
            buf.put_u8(*inventory_type);
            write_string(&mut buf, title);
            buf.put_u8(*slot_count);
            write_bool(&mut buf, *use_title);
        }
        ClientboundPacket::OpenWindowNamed {
            window_id,
            window_type,
            title_json,
            slot_count,
        } => {
            write_varint(&mut buf, ids.open_window);
            buf.put_u8(window_id.get());
            write_string(&mut buf, window_type);
            write_string(&mut buf, title_json);
            buf.put_u8(*slot_count);
        }
        ClientboundPacket::OpenScreen {
            window_id,
            menu_type,
            title_json,
        } => {
            write_varint(&mut buf, ids.open_window);
            write_varint(&mut buf, window_id.get() as i32);
            write_varint(&mut buf, *menu_type);
            write_string(&mut buf, title_json);
        }
        ClientboundPacket::SetSlot {
            window_id,
            slot,
            item,
        } => {
            write_varint(&mut buf, ids.set_slot);
            buf.put_u8(window_id.get());
            buf.put_i16(*slot);
            write_item(&mut buf, item.as_ref());
        }
        ClientboundPacket::WindowProperty {
            window_id,
            property,
            value,
        } => {
            write_varint(&mut buf, ids.window_property);
            buf.put_u8(window_id.get());
            buf.put_i16(*property);
            buf.put_i16(*value);
        }
        ClientboundPacket::CloseWindow { window_id } => {
            write_varint(&mut buf, ids.close_window);
            buf.put_u8(window_id.get());
        }
    }
    buf
}

/// Encode a serverbound packet into a frame
///
/// Used by hosts and tests that simulate the viewing client.
pub fn encode_serverbound(packet: &ServerboundPacket, ids: &PacketIds) -> Result<BytesMut> {
    let mut buf = BytesMut::new();
    match packet {
        ServerboundPacket::PluginMessage { channel, data } => {
            if !ids.rename_via_plugin_channel {
                return Err(ProtocolError::InvalidValue(
                    "plugin messages are not routed through this packet table".into(),
                ));
            }
            write_varint(&mut buf, ids.rename);
            write_string(&mut buf, channel);
            if ids.plugin_data_length_prefixed {
                let len = i16::try_from(data.len()).map_err(|_| {
                    ProtocolError::InvalidValue(format!("plugin payload of {} bytes", data.len()))
                })?;
                buf.put_i16(len);
            }
            buf.put_slice(data);
        }
        ServerboundPacket::RenameItem { name } => {
            if ids.rename_via_plugin_channel {
                return Err(ProtocolError::InvalidValue(
                    "rename packet does not exist in this packet table".into(),
                ));
            }
            write_varint(&mut buf, ids.rename);
            write_string(&mut buf, name);
        }
        ServerboundPacket::ClickWindow {
            window_id,
            slot,
            button,
            mode,
        } => {
            write_varint(&mut buf, ids.click_window);
            buf.put_u8(window_id.get());
            buf.put_i16(*slot);
            buf.put_u8(*button);
            buf.put_u8(*mode as u8);
        }
        ServerboundPacket::CloseWindow { window_id } => {
            write_varint(&mut buf, ids.close_window_in);
            buf.put_u8(window_id.get());
        }
    }
    Ok(buf)
}

/// Decode a serverbound frame
///
/// # Errors
/// - [`ProtocolError::UnknownPacket`] for ids outside the anvil's interest
/// - codec errors for malformed payloads
pub fn decode_serverbound(buf: &mut BytesMut, ids: &PacketIds) -> Result<ServerboundPacket> {
    let id = read_varint(buf)?;

    if id == ids.rename {
        if ids.rename_via_plugin_channel {
            let channel = read_string(buf, 20)?;
            let data = if ids.plugin_data_length_prefixed {
                let len = read_i16(buf)?;
                if len < 0 || buf.remaining() < len as usize {
                    return Err(ProtocolError::Truncated("plugin payload"));
                }
                buf.split_to(len as usize).to_vec()
            } else {
                buf.split_to(buf.remaining()).to_vec()
            };
            return Ok(ServerboundPacket::PluginMessage { channel, data });
        }
        let name = read_string(buf, MAX_STRING_LENGTH)?;
        return Ok(ServerboundPacket::RenameItem { name });
    }

    if id == ids.click_window {
        let window_id = WindowId::new(read_u8(buf)?);
        let slot = read_i16(buf)?;
        let button = read_u8(buf)?;
        let raw_mode = read_u8(buf)?;
        let mode = ClickMode::from_u8(raw_mode)
            .ok_or_else(|| ProtocolError::InvalidValue(format!("click mode {}", raw_mode)))?;
        return Ok(ServerboundPacket::ClickWindow {
            window_id,
            slot,
            button,
            mode,
        });
    }

    if id == ids.close_window_in {
        let window_id = WindowId::new(read_u8(buf)?);
        return Ok(ServerboundPacket::CloseWindow { window_id });
    }

    tracing::debug!("Ignoring serverbound packet 0x{:02X}", id);
    Err(ProtocolError::UnknownPacket(id))
}
