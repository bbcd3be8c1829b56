//! # AnvilGUI Version Adapters
//!
//! One adapter per supported server family, all behind the same
//! [`VersionAdapter`] capability set, and the [`AdapterRegistry`] that picks
//! one for a detected version.
//!
//! ## Modules
//!
//! - [`adapter`] - Capability trait, container handles and slot layouts
//! - [`families`] - Per-family representations
//! - [`kind`] - [`AdapterKind`], the closed set of families
//! - [`registry`] - Version range table

pub mod adapter;
pub mod families;
pub mod kind;
pub mod registry;

pub use adapter::{ContainerHandle, SlotLayout, VersionAdapter};
pub use kind::AdapterKind;
pub use registry::{AdapterEntry, AdapterFactory, AdapterRegistry};
