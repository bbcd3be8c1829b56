//! # Version Detector
//!
//! Reads the host's version string once and keeps the outcome.

use crate::parser::parse_version_string;
use anvilgui_core::{AnvilError, Result, VersionIdentifier};
use anvilgui_host::VersionSource;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of version detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detection {
    /// The host reported a version in a known format
    Recognized(VersionIdentifier),
    /// The raw string that could not be parsed
    Unrecognized(String),
}

impl Detection {
    /// Classify a raw version string
    pub fn from_raw(raw: &str) -> Self {
        match parse_version_string(raw) {
            Some(version) => Self::Recognized(version),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn version(&self) -> Option<VersionIdentifier> {
        match self {
            Self::Recognized(version) => Some(*version),
            Self::Unrecognized(_) => None,
        }
    }

    /// Treat an unrecognized string as an error
    pub fn into_result(self) -> Result<VersionIdentifier> {
        match self {
            Self::Recognized(version) => Ok(version),
            Self::Unrecognized(raw) => Err(AnvilError::UnrecognizedVersion(raw)),
        }
    }
}

/// Host version detector
///
/// # Thread Safety
/// The first `detect` call reads the source; concurrent first calls wait for
/// that read and then share its result.
pub struct VersionDetector {
    /// Where the version string comes from
    source: Arc<dyn VersionSource>,

    /// Configured replacement for the host's string
    override_string: Option<String>,

    /// Memoized outcome
    detected: OnceCell<Detection>,
}

impl VersionDetector {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self::with_override(source, None)
    }

    /// Detector that reports `override_string` instead of asking the host
    pub fn with_override(source: Arc<dyn VersionSource>, override_string: Option<String>) -> Self {
        Self {
            source,
            override_string,
            detected: OnceCell::new(),
        }
    }

    /// Detect the host version
    ///
    /// Never fails; an unparseable string yields [`Detection::Unrecognized`].
    pub fn detect(&self) -> &Detection {
        self.detected.get_or_init(|| {
            let raw = match &self.override_string {
                Some(forced) => {
                    tracing::info!("Using configured version override {:?}", forced);
                    forced.clone()
                }
                None => self.source.version_string(),
            };

            let detection = Detection::from_raw(&raw);
            match &detection {
                Detection::Recognized(version) => {
                    tracing::info!("Detected server version {} from {:?}", version, raw)
                }
                Detection::Unrecognized(_) => {
                    tracing::warn!("Unrecognized server version string {:?}", raw)
                }
            }
            detection
        })
    }

    /// Whether detection already ran
    pub fn is_detected(&self) -> bool {
        self.detected.get().is_some()
    }
}

/// Fixed version string, for hosts that know their version up front
#[derive(Debug, Clone)]
pub struct StaticVersion(pub String);

impl VersionSource for StaticVersion {
    fn version_string(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvilgui_host::MemoryHost;

    #[test]
    fn test_detect_reads_once() {
        let host = Arc::new(MemoryHost::new("git-Paper-196 (MC: 1.19.4)"));
        let detector = VersionDetector::new(host.clone());
        assert!(!detector.is_detected());

        assert_eq!(
            detector.detect(),
            &Detection::Recognized(VersionIdentifier::new(1, 19, 4))
        );
        host.set_version_string("1.8.8");
        assert_eq!(
            detector.detect().version(),
            Some(VersionIdentifier::new(1, 19, 4))
        );
        assert_eq!(host.version_reads(), 1);
    }

    #[test]
    fn test_unrecognized_is_not_an_error_until_asked() {
        let detector = VersionDetector::new(Arc::new(StaticVersion("not-a-version".into())));
        let detection = detector.detect().clone();
        assert_eq!(detection, Detection::Unrecognized("not-a-version".into()));
        assert_eq!(
            detection.into_result(),
            Err(AnvilError::UnrecognizedVersion("not-a-version".into()))
        );
    }

    #[test]
    fn test_override_skips_host() {
        let host = Arc::new(MemoryHost::new("garbage"));
        let detector = VersionDetector::with_override(host.clone(), Some("1.16.5".into()));
        assert_eq!(
            detector.detect().version(),
            Some(VersionIdentifier::new(1, 16, 5))
        );
        assert_eq!(host.version_reads(), 0);
    }

    #[test]
    fn test_concurrent_first_detection() {
        let host = Arc::new(MemoryHost::new("1.17.1"));
        let detector = VersionDetector::new(host.clone());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(
                        detector.detect().version(),
                        Some(VersionIdentifier::new(1, 17, 1))
                    );
                });
            }
        });
        assert_eq!(host.version_reads(), 1);
    }
}
