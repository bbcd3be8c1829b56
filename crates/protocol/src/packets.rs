//! Window packet definitions
//!
//! ## Packet Ids
//!
//! Every family numbers its packets differently. [`PacketIds`] carries the ids
//! one family uses; the adapters own one table each.
//!
//! ## Version-Specific Packets
//!
//! - `OpenWindowLegacy`: 1.7 only
//! - `OpenWindowNamed`: 1.8 - 1.13
//! - `OpenScreen`: 1.14 and later
//! - `PluginMessage` on `MC|ItemName`: rename text before 1.13
//! - `RenameItem`: rename text from 1.13

use anvilgui_core::{ItemStack, WindowId};
use serde::{Deserialize, Serialize};

/// Plugin channel carrying anvil rename text before 1.13
pub const ITEM_NAME_CHANNEL: &str = "MC|ItemName";

/// Window property holding the anvil repair cost
pub const PROPERTY_REPAIR_COST: i16 = 0;

/// Per-family packet id table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketIds {
    // Clientbound
    pub open_window: i32,
    pub close_window: i32,
    pub set_slot: i32,
    pub window_property: i32,

    // Serverbound
    pub click_window: i32,
    pub close_window_in: i32,
    /// Plugin message before 1.13, rename item afterwards
    pub rename: i32,
    /// Whether `rename` is a plugin message
    pub rename_via_plugin_channel: bool,
    /// Plugin message data carries an i16 length prefix (1.7)
    pub plugin_data_length_prefixed: bool,
}

/// Server-to-client window packets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientboundPacket {
    /// 1.7 open window
    ///
    /// # Packet Format
    /// ```text
    /// {U8 window}{U8 type}{STRING title}{U8 slots}{BOOL use_title}
    /// ```
    OpenWindowLegacy {
        window_id: WindowId,
        inventory_type: u8,
        title: String,
        slot_count: u8,
        use_title: bool,
    },

    /// 1.8 - 1.13 open window
    ///
    /// # Packet Format
    /// ```text
    /// {U8 window}{STRING type}{STRING title_json}{U8 slots}
    /// ```
    OpenWindowNamed {
        window_id: WindowId,
        window_type: String,
        title_json: String,
        slot_count: u8,
    },

    /// 1.14+ open screen
    ///
    /// # Packet Format
    /// ```text
    /// {VARINT window}{VARINT menu_type}{STRING title_json}
    /// ```
    OpenScreen {
        window_id: WindowId,
        menu_type: i32,
        title_json: String,
    },

    /// # Packet Format
    /// ```text
    /// {U8 window}{I16 slot}{ITEM}
    /// ```
    SetSlot {
        window_id: WindowId,
        slot: i16,
        item: Option<ItemStack>,
    },

    /// # Packet Format
    /// ```text
    /// {U8 window}{I16 property}{I16 value}
    /// ```
    WindowProperty {
        window_id: WindowId,
        property: i16,
        value: i16,
    },

    /// # Packet Format
    /// ```text
    /// {U8 window}
    /// ```
    CloseWindow { window_id: WindowId },
}

impl ClientboundPacket {
    /// Window the packet targets
    pub fn window_id(&self) -> WindowId {
        match self {
            Self::OpenWindowLegacy { window_id, .. }
            | Self::OpenWindowNamed { window_id, .. }
            | Self::OpenScreen { window_id, .. }
            | Self::SetSlot { window_id, .. }
            | Self::WindowProperty { window_id, .. }
            | Self::CloseWindow { window_id } => *window_id,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Self::OpenWindowLegacy { .. } | Self::OpenWindowNamed { .. } | Self::OpenScreen { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenWindowLegacy { .. } => "OpenWindowLegacy",
            Self::OpenWindowNamed { .. } => "OpenWindowNamed",
            Self::OpenScreen { .. } => "OpenScreen",
            Self::SetSlot { .. } => "SetSlot",
            Self::WindowProperty { .. } => "WindowProperty",
            Self::CloseWindow { .. } => "CloseWindow",
        }
    }
}

/// Click mode of a window click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickMode {
    /// Plain left/right click
    Pickup = 0,
    /// Shift click, moves to the other inventory
    QuickMove = 1,
    /// Number key swap
    Swap = 2,
    /// Middle click (creative)
    Clone = 3,
    /// Drop key
    Throw = 4,
    /// Drag across slots
    QuickCraft = 5,
    /// Double click, collects matching items
    PickupAll = 6,
}

impl ClickMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pickup),
            1 => Some(Self::QuickMove),
            2 => Some(Self::Swap),
            3 => Some(Self::Clone),
            4 => Some(Self::Throw),
            5 => Some(Self::QuickCraft),
            6 => Some(Self::PickupAll),
            _ => None,
        }
    }
}

/// Client-to-server packets the anvil cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerboundPacket {
    /// Plugin channel message (carries rename text before 1.13)
    PluginMessage { channel: String, data: Vec<u8> },

    /// Dedicated rename packet (1.13+)
    RenameItem { name: String },

    /// Window click with the host's raw slot number
    ClickWindow {
        window_id: WindowId,
        slot: i16,
        button: u8,
        mode: ClickMode,
    },

    /// Player closed the window
    CloseWindow { window_id: WindowId },
}
