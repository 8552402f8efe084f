//! Curriculum versioning

use std::fmt;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Semantic version of a curriculum bundle
///
/// A major bump means levels or lessons were removed or renamed, so stored
/// learner progress keyed by id may no longer resolve.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurriculumVersion(Version);

impl CurriculumVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse from a version string; a leading 'v' is accepted
    pub fn parse(version_str: &str) -> Result<Self, semver::Error> {
        let version_str = version_str.strip_prefix('v').unwrap_or(version_str);
        Ok(Self(Version::parse(version_str)?))
    }

    pub fn version(&self) -> &Version {
        &self.0
    }

    /// The version string (e.g., "1.2.3")
    pub fn version_string(&self) -> String {
        self.0.to_string()
    }

    /// The tag string (e.g., "v1.2.3")
    pub fn tag_string(&self) -> String {
        format!("v{}", self.0)
    }

    /// Whether ids authored against `other` still resolve in this version
    pub fn is_compatible_with(&self, other: &CurriculumVersion) -> bool {
        self.0.major == other.0.major && self.0 >= other.0
    }
}

impl fmt::Display for CurriculumVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Serialize for CurriculumVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.version_string())
    }
}

impl<'de> Deserialize<'de> for CurriculumVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CurriculumVersion::parse(&raw).map_err(serde::de::Error::custom)
    }
}
