//! Version string parser
//!
//! Pure functions, no host access. Every input maps to `Some(version)` or
//! `None`; nothing here panics or allocates an error.

use anvilgui_core::VersionIdentifier;

/// Prefix of the legacy CraftBukkit implementation package
const CRAFTBUKKIT_PACKAGE: &str = "org.bukkit.craftbukkit.";

/// Marker preceding the release in server brand strings
const BRAND_MARKER: &str = "(MC: ";

/// CraftBukkit package revisions and the newest release each one shipped
const REVISIONS: &[(&str, VersionIdentifier)] = &[
    ("v1_7_R1", VersionIdentifier::new(1, 7, 2)),
    ("v1_7_R2", VersionIdentifier::new(1, 7, 5)),
    ("v1_7_R3", VersionIdentifier::new(1, 7, 8)),
    ("v1_7_R4", VersionIdentifier::new(1, 7, 10)),
    ("v1_8_R1", VersionIdentifier::new(1, 8, 0)),
    ("v1_8_R2", VersionIdentifier::new(1, 8, 3)),
    ("v1_8_R3", VersionIdentifier::new(1, 8, 8)),
    ("v1_9_R1", VersionIdentifier::new(1, 9, 2)),
    ("v1_9_R2", VersionIdentifier::new(1, 9, 4)),
    ("v1_10_R1", VersionIdentifier::new(1, 10, 2)),
    ("v1_11_R1", VersionIdentifier::new(1, 11, 2)),
    ("v1_12_R1", VersionIdentifier::new(1, 12, 2)),
    ("v1_13_R1", VersionIdentifier::new(1, 13, 0)),
    ("v1_13_R2", VersionIdentifier::new(1, 13, 2)),
    ("v1_14_R1", VersionIdentifier::new(1, 14, 4)),
    ("v1_15_R1", VersionIdentifier::new(1, 15, 2)),
    ("v1_16_R1", VersionIdentifier::new(1, 16, 1)),
    ("v1_16_R2", VersionIdentifier::new(1, 16, 3)),
    ("v1_16_R3", VersionIdentifier::new(1, 16, 5)),
    ("v1_17_R1", VersionIdentifier::new(1, 17, 1)),
    ("v1_18_R1", VersionIdentifier::new(1, 18, 1)),
    ("v1_18_R2", VersionIdentifier::new(1, 18, 2)),
    ("v1_19_R1", VersionIdentifier::new(1, 19, 2)),
    ("v1_19_R2", VersionIdentifier::new(1, 19, 3)),
    ("v1_19_R3", VersionIdentifier::new(1, 19, 4)),
    ("v1_20_R1", VersionIdentifier::new(1, 20, 1)),
    ("v1_20_R2", VersionIdentifier::new(1, 20, 2)),
    ("v1_20_R3", VersionIdentifier::new(1, 20, 4)),
];

/// Parse any supported host version format
pub fn parse_version_string(raw: &str) -> Option<VersionIdentifier> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Brand string: "git-Paper-196 (MC: 1.19.4)"
    if let Some(start) = raw.find(BRAND_MARKER) {
        let rest = &raw[start + BRAND_MARKER.len()..];
        let end = rest.find(')')?;
        return parse_release(rest[..end].trim());
    }

    // Package revision: "org.bukkit.craftbukkit.v1_8_R3" or "v1_8_R3"
    let token = raw.strip_prefix(CRAFTBUKKIT_PACKAGE).unwrap_or(raw);
    if token.starts_with('v') && token.contains("_R") {
        return revision_release(token);
    }

    // Release with optional Bukkit API suffix: "1.19-R0.1-SNAPSHOT"
    let mut parts = token.split('-');
    let release = parts.next()?;
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => {}
        (Some(api), None, _) if is_api_revision(api) => {}
        (Some(api), Some("SNAPSHOT"), None) if is_api_revision(api) => {}
        _ => return None,
    }
    parse_release(release)
}

/// Release for a CraftBukkit package revision such as `v1_19_R3`
///
/// Unknown revisions are `None`; the table is never extrapolated.
pub fn revision_release(revision: &str) -> Option<VersionIdentifier> {
    REVISIONS
        .iter()
        .find(|(name, _)| *name == revision)
        .map(|(_, version)| *version)
}

fn parse_release(release: &str) -> Option<VersionIdentifier> {
    release.parse().ok()
}

/// `R<digits>[.<digits>]`, the Bukkit API revision after the release
fn is_api_revision(part: &str) -> bool {
    let Some(number) = part.strip_prefix('R') else {
        return false;
    };
    let mut pieces = number.split('.');
    let valid = |piece: Option<&str>| {
        piece.map_or(false, |p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    };
    match (pieces.next(), pieces.next(), pieces.next()) {
        (major, None, None) => valid(major),
        (major, Some(minor), None) => valid(major) && valid(Some(minor)),
        _ => false,
    }
}
