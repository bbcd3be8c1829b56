//! # Adapter Registry
//!
//! Maps version ranges to adapter factories.
//!
//! # Architecture
//!
//! Entries are kept sorted by lower bound and never overlap, so a lookup is a
//! binary search followed by a single containment check. Overlaps are
//! rejected when the range is registered, which makes a bad table a startup
//! failure instead of a first-use failure.
//!
//! # Thread Safety
//!
//! Registration needs `&mut self`; once built, the registry is only read and
//! can be shared freely.
//!
//! # Example
//!
//! ```
//! use anvilgui_adapters::{AdapterRegistry, VersionAdapter};
//! use anvilgui_core::VersionIdentifier;
//!
//! let registry = AdapterRegistry::with_defaults()?;
//! let adapter = registry.resolve(VersionIdentifier::new(1, 19, 4))?;
//! assert_eq!(adapter.family(), "1_19_R3");
//! # Ok::<(), anvilgui_core::AnvilError>(())
//! ```

use crate::kind::AdapterKind;
use anvilgui_core::{AnvilError, Result, VersionIdentifier, VersionRange};

/// Constructor for the adapter of one range
pub type AdapterFactory = fn() -> AdapterKind;

/// One registered range
#[derive(Debug, Clone, Copy)]
pub struct AdapterEntry {
    pub range: VersionRange,
    pub factory: AdapterFactory,
}

/// Ordered, non-overlapping range table
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    /// Sorted by `range.lower`
    entries: Vec<AdapterEntry>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every shipped family
    ///
    /// # Errors
    /// Whatever [`AdapterRegistry::register`] reports for the first bad entry
    /// of the shipped table.
    pub fn with_defaults() -> Result<Self> {
        const fn v(major: u16, minor: u16, patch: u16) -> VersionIdentifier {
            VersionIdentifier::new(major, minor, patch)
        }

        let defaults: [(VersionRange, AdapterFactory); 7] = [
            (VersionRange::closed(v(1, 7, 10), v(1, 7, 10)), AdapterKind::v1_7_r4),
            (VersionRange::half_open(v(1, 8, 3), v(1, 9, 0)), AdapterKind::v1_8_r2),
            (VersionRange::half_open(v(1, 14, 0), v(1, 16, 0)), AdapterKind::v1_14_r1),
            (VersionRange::half_open(v(1, 16, 4), v(1, 17, 0)), AdapterKind::v1_16_r3),
            (VersionRange::half_open(v(1, 17, 0), v(1, 19, 0)), AdapterKind::v1_17_r1),
            (VersionRange::half_open(v(1, 19, 0), v(1, 19, 3)), AdapterKind::v1_19_r1),
            (VersionRange::at_least(v(1, 19, 4)), AdapterKind::v1_19_r3),
        ];
        Self::from_entries(defaults)
    }

    /// Build a registry from a table of ranges
    ///
    /// # Errors
    /// The first rejected [`AdapterRegistry::register`] call.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (VersionRange, AdapterFactory)>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for (range, factory) in entries {
            registry.register(range, factory)?;
        }
        Ok(registry)
    }

    /// Register an adapter for a version range
    ///
    /// # Arguments
    /// * `range` - Versions the adapter handles
    /// * `factory` - Builds the adapter once it is selected
    ///
    /// # Errors
    /// - [`AnvilError::OverlappingRegistration`] if `range` shares a version
    ///   with an existing entry
    /// - [`AnvilError::InvalidState`] if `range` is empty
    pub fn register(&mut self, range: VersionRange, factory: AdapterFactory) -> Result<()> {
        if range.is_empty() {
            return Err(AnvilError::InvalidState(format!(
                "version range {} is empty",
                range
            )));
        }

        if let Some(existing) = self.entries.iter().find(|e| e.range.overlaps(&range)) {
            return Err(AnvilError::OverlappingRegistration {
                new: range.to_string(),
                existing: existing.range.to_string(),
            });
        }

        let position = self
            .entries
            .partition_point(|e| e.range.lower < range.lower);
        self.entries.insert(position, AdapterEntry { range, factory });

        tracing::debug!("Registered adapter for {}", range);
        Ok(())
    }

    /// Select the adapter for a version
    ///
    /// # Returns
    /// - `Ok(adapter)` - the only range containing `version` matched
    /// - `Err(UnsupportedVersion)` - no range contains `version`
    pub fn resolve(&self, version: VersionIdentifier) -> Result<AdapterKind> {
        let candidate = self
            .entries
            .partition_point(|e| e.range.lower <= version)
            .checked_sub(1)
            .map(|index| &self.entries[index]);

        match candidate {
            Some(entry) if entry.range.contains(version) => Ok((entry.factory)()),
            _ => Err(AnvilError::UnsupportedVersion {
                version: version.to_string(),
                supported: self.supported_ranges(),
            }),
        }
    }

    /// Registered entries in version order
    pub fn entries(&self) -> &[AdapterEntry] {
        &self.entries
    }

    /// Registered ranges rendered for diagnostics, e.g. `[1.7.10, 1.7.10], [1.8.3, 1.9)`
    pub fn supported_ranges(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.range.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::VersionAdapter;

    fn v(s: &str) -> VersionIdentifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_defaults_resolve_each_family() {
        let registry = AdapterRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), 7);

        let cases = [
            ("1.7.10", "1_7_R4"),
            ("1.8.3", "1_8_R2"),
            ("1.8.8", "1_8_R2"),
            ("1.14", "1_14_R1"),
            ("1.15.2", "1_14_R1"),
            ("1.16.5", "1_16_R3"),
            ("1.17", "1_17_R1"),
            ("1.18.2", "1_17_R1"),
            ("1.19", "1_19_R1"),
            ("1.19.2", "1_19_R1"),
            ("1.19.4", "1_19_R3"),
            ("1.20.4", "1_19_R3"),
        ];
        for (version, family) in cases {
            assert_eq!(registry.resolve(v(version)).unwrap().family(), family, "{}", version);
        }
    }

    #[test]
    fn test_gaps_not_supported() {
        let registry = AdapterRegistry::with_defaults().unwrap();
        for version in ["1.5.2", "1.7.9", "1.8", "1.9", "1.12.2", "1.16.3", "1.19.3"] {
            assert!(
                matches!(
                    registry.resolve(v(version)),
                    Err(AnvilError::UnsupportedVersion { .. })
                ),
                "{}",
                version
            );
        }
    }

    #[test]
    fn test_unsupported_lists_ranges() {
        let registry = AdapterRegistry::with_defaults().unwrap();
        match registry.resolve(v("1.5.2")) {
            Err(AnvilError::UnsupportedVersion { version, supported }) => {
                assert_eq!(version, "1.5.2");
                assert!(supported.starts_with("[1.7.10, 1.7.10], [1.8.3, 1.9)"));
                assert!(supported.ends_with("[1.19.4, ∞)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_overlap_rejected_at_registration() {
        let mut registry = AdapterRegistry::new();
        registry
            .register(VersionRange::half_open(v("1.16"), v("1.17")), AdapterKind::v1_16_r3)
            .unwrap();

        let err = registry
            .register(VersionRange::half_open(v("1.16.4"), v("1.19")), AdapterKind::v1_17_r1)
            .unwrap_err();
        assert_eq!(
            err,
            AnvilError::OverlappingRegistration {
                new: "[1.16.4, 1.19)".into(),
                existing: "[1.16, 1.17)".into(),
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_adjacent_ranges_allowed() {
        let mut registry = AdapterRegistry::new();
        registry
            .register(VersionRange::half_open(v("1.17"), v("1.19")), AdapterKind::v1_17_r1)
            .unwrap();
        registry
            .register(VersionRange::half_open(v("1.14"), v("1.17")), AdapterKind::v1_14_r1)
            .unwrap();

        let lowers: Vec<_> = registry.entries().iter().map(|e| e.range.lower).collect();
        assert_eq!(lowers, vec![v("1.14"), v("1.17")]);
        assert_eq!(registry.resolve(v("1.16.9")).unwrap().family(), "1_14_R1");
    }

    #[test]
    fn test_bad_table_is_an_error() {
        let table: [(VersionRange, AdapterFactory); 2] = [
            (VersionRange::half_open(v("1.17"), v("1.19")), AdapterKind::v1_17_r1),
            (VersionRange::at_least(v("1.18")), AdapterKind::v1_19_r3),
        ];
        assert!(matches!(
            AdapterRegistry::from_entries(table),
            Err(AnvilError::OverlappingRegistration { .. })
        ));
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut registry = AdapterRegistry::new();
        assert!(matches!(
            registry.register(VersionRange::half_open(v("1.9"), v("1.9")), AdapterKind::v1_8_r2),
            Err(AnvilError::InvalidState(_))
        ));
        assert!(registry.is_empty());
    }
}
