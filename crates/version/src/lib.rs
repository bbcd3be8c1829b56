//! # AnvilGUI Version Detection
//!
//! Turns whatever the host reports about itself into a [`VersionIdentifier`].
//!
//! ## Accepted Formats
//!
//! - Release: `1.19.4`, `1.19`
//! - Bukkit API version: `1.19.4-R0.1-SNAPSHOT`
//! - Server brand: `git-Paper-196 (MC: 1.19.4)`
//! - CraftBukkit package revision: `v1_8_R3`, `org.bukkit.craftbukkit.v1_8_R3`
//!
//! Everything else, pre-releases and snapshots included, is
//! [`Detection::Unrecognized`]. Raw strings never leave this crate except
//! inside that outcome.
//!
//! [`VersionIdentifier`]: anvilgui_core::VersionIdentifier

pub mod detector;
pub mod parser;

pub use detector::{Detection, StaticVersion, VersionDetector};
pub use parser::{parse_version_string, revision_release};
