//! AWS region codes and their console display names.

use std::fmt;

use crate::error::CoreError;

/// Every region code this crate knows how to name.
const REGION_NAMES: &[(&str, &str)] = &[
    ("ap-east-1", "Asia Pacific (Hong Kong)"),
    ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    ("ap-northeast-2", "Asia Pacific (Seoul)"),
    ("ap-south-1", "Asia Pacific (Mumbai)"),
    ("ap-southeast-1", "Asia Pacific (Singapore)"),
    ("ap-southeast-2", "Asia Pacific (Sydney)"),
    ("ca-central-1", "Canada (Central)"),
    ("eu-central-1", "EU (Frankfurt)"),
    ("eu-north-1", "EU (Stockholm)"),
    ("eu-west-1", "EU (Ireland)"),
    ("eu-west-2", "EU (London)"),
    ("eu-west-3", "EU (Paris)"),
    ("me-south-1", "Middle East (Bahrain)"),
    ("sa-east-1", "South America (Sao Paulo)"),
    ("us-east-1", "US East (N. Virginia)"),
    ("us-east-2", "US East (Ohio)"),
    ("us-west-1", "US West (N. California)"),
    ("us-west-2", "US West (Oregon)"),
];

/// Regions targeted when no explicit region list is given.
pub const DEFAULT_REGION_CODES: &[&str] = &[
    "ap-south-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// A known AWS region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    code: &'static str,
    name: &'static str,
}

impl Region {
    /// Look up a region by its code, e.g. `us-east-1`.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        REGION_NAMES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(code, name)| Self { code, name })
            .ok_or_else(|| CoreError::UnknownRegion(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All known regions, in table order.
    pub fn all() -> impl Iterator<Item = Region> {
        REGION_NAMES
            .iter()
            .map(|&(code, name)| Region { code, name })
    }

    /// The default target regions.
    pub fn defaults() -> Vec<Region> {
        Self::all()
            .filter(|r| DEFAULT_REGION_CODES.contains(&r.code))
            .collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_name() {
        let region = Region::from_code("us-east-1").unwrap();
        assert_eq!(region.code(), "us-east-1");
        assert_eq!(region.name(), "US East (N. Virginia)");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Region::from_code("mars-north-1").unwrap_err();
        assert!(matches!(err, CoreError::UnknownRegion(code) if code == "mars-north-1"));
    }

    #[test]
    fn table_has_eighteen_regions() {
        assert_eq!(Region::all().count(), 18);
    }

    #[test]
    fn defaults_are_all_known() {
        let defaults = Region::defaults();
        assert_eq!(defaults.len(), DEFAULT_REGION_CODES.len());
        assert!(defaults.iter().all(|r| r.code() != "ap-east-1"));
    }
}
