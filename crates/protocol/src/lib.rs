//! # AnvilGUI Protocol Library
//!
//! Wire shapes of the window packets exchanged with an anvil viewer, in every
//! representation the supported server families use.
//!
//! ## Architecture
//!
//! ### 1. Codecs Layer ([`codecs`])
//! Primitive encoders/decoders:
//! - VarInt: 1-5 byte little-endian base-128 integer
//! - String: VarInt byte length followed by UTF-8
//! - Item: presence flag, material, amount, optional display name
//!
//! ### 2. Packets ([`packets`])
//! Typed clientbound and serverbound packets plus [`PacketIds`], the per-family
//! table of packet ids.
//!
//! ### 3. Packet Builder ([`packet_builder`])
//! Frame encoding of clientbound packets and decoding of serverbound frames.
//!
//! ## Version Support
//!
//! The window protocol changed shape twice:
//! - **1.7**: numeric inventory type, plain title, `use_title` flag
//! - **1.8 - 1.13**: window type name (`minecraft:anvil`), JSON title, slot count
//! - **1.14+**: menu type registry id, JSON title, VarInt window id
//!
//! Rename text arrives on the `MC|ItemName` plugin channel before 1.13 and as a
//! dedicated packet afterwards.

pub mod error;
pub mod codecs;
pub mod packets;
pub mod packet_builder;

pub use error::{ProtocolError, Result};
pub use codecs::*;
pub use packets::*;
pub use packet_builder::*;
