//! # AnvilGUI Facade and GUI Layer
//!
//! This crate is what plugin code talks to.
//!
//! ## Modules
//!
//! - `dispatcher` - Version-independent facade over the bound adapter
//! - `session` - One open anvil interaction
//! - `gui` - Text-input GUI with builder, click handling and close semantics
//! - `handlers` - Classification of inbound packets
//! - `manager` - Per-player GUI tracking and event routing

pub mod dispatcher;
pub mod session;
pub mod gui;
pub mod handlers;
pub mod manager;

// Re-export commonly used types
pub use dispatcher::Dispatcher;
pub use session::Session;
pub use gui::{
    AnvilGui, AnvilGuiBuilder, ClickResult, CloseOutcome, CloseReason, Deferred, ResponseAction,
    StateSnapshot, OUTSIDE_WINDOW_SLOT,
};
pub use handlers::InboundEvent;
pub use manager::{GuiManager, PacketOutcome};
