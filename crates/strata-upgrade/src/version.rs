use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Block-state format version, ordered lexicographically by component.
///
/// The source dialect stores it packed into 32 bits as
/// `major << 24 | minor << 16 | patch << 8 | revision`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub revision: u8,
}

impl SchemaVersion {
    pub const fn new(major: u8, minor: u8, patch: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            patch,
            revision,
        }
    }

    pub const fn from_packed(packed: u32) -> Self {
        Self {
            major: (packed >> 24) as u8,
            minor: (packed >> 16) as u8,
            patch: (packed >> 8) as u8,
            revision: packed as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        (self.major as u32) << 24
            | (self.minor as u32) << 16
            | (self.patch as u32) << 8
            | self.revision as u32
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.revision
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version '{0}' must have 3 or 4 dot-separated components")]
    ComponentCount(String),
    #[error("version '{input}' has invalid component '{component}'")]
    InvalidComponent { input: String, component: String },
}

impl FromStr for SchemaVersion {
    type Err = VersionParseError;

    /// Parses `major.minor.patch[.revision]`; a missing revision is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(VersionParseError::ComponentCount(s.to_string()));
        }
        let mut components = [0u8; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent {
                    input: s.to_string(),
                    component: part.to_string(),
                })?;
        }
        let [major, minor, patch, revision] = components;
        Ok(Self::new(major, minor, patch, revision))
    }
}
