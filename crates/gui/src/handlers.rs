//! # Inbound Events
//!
//! Turns the serverbound packets the anvil cares about into events. Rename
//! text is decoded by the bound adapter, since each family carries it
//! differently.

use crate::dispatcher::Dispatcher;
use anvilgui_core::{Result, WindowId};
use anvilgui_protocol::{ClickMode, ServerboundPacket};

/// Event for an open GUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Window click in host slot numbering
    Click {
        window_id: WindowId,
        host_slot: i16,
        mode: ClickMode,
    },
    /// The rename field changed
    RenameText(String),
    /// The viewer closed a window
    Close { window_id: WindowId },
}

impl InboundEvent {
    /// Classify a serverbound packet
    ///
    /// # Returns
    /// `Ok(None)` for packets the anvil ignores.
    pub fn from_packet(dispatcher: &Dispatcher, packet: &ServerboundPacket) -> Result<Option<Self>> {
        let event = match packet {
            ServerboundPacket::ClickWindow {
                window_id,
                slot,
                mode,
                ..
            } => Some(Self::Click {
                window_id: *window_id,
                host_slot: *slot,
                mode: *mode,
            }),
            ServerboundPacket::CloseWindow { window_id } => Some(Self::Close {
                window_id: *window_id,
            }),
            other => dispatcher.decode_rename(other)?.map(Self::RenameText),
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvilgui_adapters::AdapterRegistry;
    use anvilgui_host::MemoryHost;
    use anvilgui_protocol::ITEM_NAME_CHANNEL;
    use std::sync::Arc;

    fn dispatcher(version: &str) -> Dispatcher {
        Dispatcher::new(Arc::new(MemoryHost::new(version)), AdapterRegistry::with_defaults().unwrap())
    }

    #[test]
    fn test_legacy_rename_channel() {
        let dispatcher = dispatcher("1.7.10");
        let packet = ServerboundPacket::PluginMessage {
            channel: ITEM_NAME_CHANNEL.into(),
            data: b"Pick".to_vec(),
        };
        assert_eq!(
            InboundEvent::from_packet(&dispatcher, &packet).unwrap(),
            Some(InboundEvent::RenameText("Pick".into()))
        );

        // Modern rename packets mean nothing to a 1.7 server
        let modern = ServerboundPacket::RenameItem { name: "Pick".into() };
        assert_eq!(InboundEvent::from_packet(&dispatcher, &modern).unwrap(), None);
    }

    #[test]
    fn test_click_and_close() {
        let dispatcher = dispatcher("1.19.4");
        let click = ServerboundPacket::ClickWindow {
            window_id: WindowId::new(3),
            slot: 2,
            button: 0,
            mode: ClickMode::Pickup,
        };
        assert_eq!(
            InboundEvent::from_packet(&dispatcher, &click).unwrap(),
            Some(InboundEvent::Click {
                window_id: WindowId::new(3),
                host_slot: 2,
                mode: ClickMode::Pickup,
            })
        );
        assert_eq!(
            InboundEvent::from_packet(
                &dispatcher,
                &ServerboundPacket::CloseWindow { window_id: WindowId::new(3) }
            )
            .unwrap(),
            Some(InboundEvent::Close { window_id: WindowId::new(3) })
        );
    }

    #[test]
    fn test_unsupported_server_fails() {
        let dispatcher = dispatcher("1.5.2");
        let packet = ServerboundPacket::RenameItem { name: "x".into() };
        assert!(InboundEvent::from_packet(&dispatcher, &packet).is_err());
    }
}
