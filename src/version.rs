//! Semantic version bumping
//!
//! Versions are parsed with the `semver` crate; the bump rules themselves live here
//! because prerelease counters need handling semver does not provide.

use crate::error::{RelkitError, Result};
use log::debug;
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Identifier used when a prerelease bump starts from a plain release
pub const DEFAULT_PRERELEASE_ID: &str = "beta";

/// Granularity of a version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseType {
    Major,
    Minor,
    #[default]
    Patch,
    Prerelease,
}

impl ReleaseType {
    /// Maps a release tag onto a release type.
    ///
    /// Never fails: anything that is not exactly `major`, `minor`, `patch` or
    /// `prerelease` is treated as `patch`. Use [`ReleaseType::is_known`] to detect
    /// the fallback.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "major" => ReleaseType::Major,
            "minor" => ReleaseType::Minor,
            "prerelease" => ReleaseType::Prerelease,
            _ => ReleaseType::Patch,
        }
    }

    /// Whether `tag` names a release type without falling back
    pub fn is_known(tag: &str) -> bool {
        matches!(tag, "major" | "minor" | "patch" | "prerelease")
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Prerelease => "prerelease",
        }
    }
}

impl From<&str> for ReleaseType {
    fn from(tag: &str) -> Self {
        ReleaseType::from_tag(tag)
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Prerelease segment split into identifier and trailing numeric counter
///
/// # Examples
/// - "beta.1" -> PreRelease { identifier: "beta", counter: Some(1) }
/// - "alpha" -> PreRelease { identifier: "alpha", counter: None }
/// - "rc.1.4" -> PreRelease { identifier: "rc.1", counter: Some(4) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub identifier: String,
    pub counter: Option<u64>,
}

impl PreRelease {
    pub fn new(identifier: impl Into<String>, counter: Option<u64>) -> Self {
        PreRelease {
            identifier: identifier.into(),
            counter,
        }
    }

    /// Split a prerelease string at its last dot when the tail is numeric.
    ///
    /// A purely numeric prerelease ("3") becomes a bare counter.
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<u64>() {
            return PreRelease::new("", Some(n));
        }

        match s.rsplit_once('.') {
            Some((ident, tail)) => match tail.parse::<u64>() {
                Ok(n) => PreRelease::new(ident, Some(n)),
                Err(_) => PreRelease::new(s, None),
            },
            None => PreRelease::new(s, None),
        }
    }

    /// Increment the counter, starting at 1 when there is none.
    pub fn increment(&self) -> Result<Self> {
        let counter = match self.counter {
            Some(n) => increment_component(n, "prerelease counter")?,
            None => 1,
        };

        Ok(PreRelease::new(self.identifier.clone(), Some(counter)))
    }

    fn to_semver(&self) -> Result<Prerelease> {
        let text = self.to_string();
        Prerelease::new(&text).map_err(|e| {
            RelkitError::version(format!("Invalid prerelease identifier '{}': {}", text, e))
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.identifier.is_empty(), self.counter) {
            (true, Some(n)) => write!(f, "{}", n),
            (_, Some(n)) => write!(f, "{}.{}", self.identifier, n),
            (_, None) => write!(f, "{}", self.identifier),
        }
    }
}

fn increment_component(value: u64, component: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| RelkitError::version(format!("{} {} overflows", component, value)))
}

/// Bumps a version string according to the release type.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
/// - **Prerelease**: increments the existing prerelease counter, or appends
///   `-{prerelease_id}.1` when the version has no prerelease
///
/// Every bump except `Prerelease` drops the prerelease segment. Build metadata is
/// always dropped. An empty `prerelease_id` or a component already at `u64::MAX`
/// is an error.
///
/// # Example
/// ```
/// use relkit::version::{bump_version, ReleaseType};
///
/// assert_eq!(bump_version("1.0.0", ReleaseType::Minor, "beta").unwrap(), "1.1.0");
/// assert_eq!(bump_version("1.0.0-beta.1", ReleaseType::Prerelease, "beta").unwrap(), "1.0.0-beta.2");
/// ```
pub fn bump_version(version: &str, release: ReleaseType, prerelease_id: &str) -> Result<String> {
    let mut parsed = Version::parse(version.trim())
        .map_err(|e| RelkitError::version(format!("Invalid version '{}': {}", version, e)))?;
    parsed.build = BuildMetadata::EMPTY;

    if prerelease_id.is_empty() {
        return Err(RelkitError::version("Prerelease identifier must not be empty"));
    }

    match release {
        ReleaseType::Major => {
            parsed.major = increment_component(parsed.major, "major")?;
            parsed.minor = 0;
            parsed.patch = 0;
            parsed.pre = Prerelease::EMPTY;
        }
        ReleaseType::Minor => {
            parsed.minor = increment_component(parsed.minor, "minor")?;
            parsed.patch = 0;
            parsed.pre = Prerelease::EMPTY;
        }
        ReleaseType::Patch => {
            parsed.patch = increment_component(parsed.patch, "patch")?;
            parsed.pre = Prerelease::EMPTY;
        }
        ReleaseType::Prerelease => {
            let next = if parsed.pre.is_empty() {
                PreRelease::new(prerelease_id, Some(1))
            } else {
                PreRelease::parse(parsed.pre.as_str()).increment()?
            };
            parsed.pre = next.to_semver()?;
        }
    }

    let bumped = parsed.to_string();
    debug!("bumped {} -> {} ({})", version, bumped, release);
    Ok(bumped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(version: &str, tag: &str) -> String {
        bump_version(version, ReleaseType::from_tag(tag), DEFAULT_PRERELEASE_ID).unwrap()
    }

    #[test]
    fn test_default_release_type_is_patch() {
        let default = bump_version("1.0.0", ReleaseType::default(), DEFAULT_PRERELEASE_ID).unwrap();
        assert_eq!(default, "1.0.1");
        assert_eq!(default, bump("1.0.0", "patch"));
    }

    #[test]
    fn test_bump_major() {
        assert_eq!(bump("1.0.0", "major"), "2.0.0");
        assert_eq!(bump("1.4.7", "major"), "2.0.0");
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(bump("1.0.0", "minor"), "1.1.0");
        assert_eq!(bump("1.4.7", "minor"), "1.5.0");
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(bump("1.0.0", "patch"), "1.0.1");
    }

    #[test]
    fn test_release_bumps_drop_prerelease() {
        assert_eq!(bump("1.2.3-beta.4", "major"), "2.0.0");
        assert_eq!(bump("1.2.3-beta.4", "minor"), "1.3.0");
        assert_eq!(bump("1.2.3-beta.4", "patch"), "1.2.4");
    }

    #[test]
    fn test_bump_prerelease_default_identifier() {
        assert_eq!(bump("1.0.0-beta.1", "prerelease"), "1.0.0-beta.2");
    }

    #[test]
    fn test_bump_prerelease_custom_identifier() {
        let bumped = bump_version("1.0.0-whatevs.5", ReleaseType::Prerelease, "whatevs").unwrap();
        assert_eq!(bumped, "1.0.0-whatevs.6");
    }

    #[test]
    fn test_bump_prerelease_keeps_existing_identifier() {
        let bumped = bump_version("1.0.0-alpha.3", ReleaseType::Prerelease, "beta").unwrap();
        assert_eq!(bumped, "1.0.0-alpha.4");
    }

    #[test]
    fn test_bump_prerelease_from_release() {
        assert_eq!(bump("1.0.0", "prerelease"), "1.0.0-beta.1");
        let bumped = bump_version("2.1.0", ReleaseType::Prerelease, "rc").unwrap();
        assert_eq!(bumped, "2.1.0-rc.1");
    }

    #[test]
    fn test_bump_prerelease_without_counter() {
        assert_eq!(bump("1.0.0-beta", "prerelease"), "1.0.0-beta.1");
    }

    #[test]
    fn test_unknown_type_falls_back_to_patch() {
        assert_eq!(bump("1.0.0", "jacksonbrowne"), "1.0.1");
        assert_eq!(bump("1.0.0", ""), "1.0.1");
    }

    #[test]
    fn test_differently_cased_type_bumps_patch() {
        assert_eq!(bump("1.0.0", "MAJOR"), "1.0.1");
        assert_eq!(bump("1.0.0", "Minor"), "1.0.1");
    }

    #[test]
    fn test_component_overflow_is_error() {
        let max = "18446744073709551615";
        let err = bump_version(&format!("{}.0.0", max), ReleaseType::Major, "beta").unwrap_err();
        assert!(err.to_string().contains("major 18446744073709551615 overflows"));
        assert!(bump_version(&format!("1.{}.0", max), ReleaseType::Minor, "beta").is_err());
        assert!(bump_version(&format!("1.0.{}", max), ReleaseType::Patch, "beta").is_err());
    }

    #[test]
    fn test_prerelease_counter_overflow_is_error() {
        let err = bump_version(
            "1.0.0-beta.18446744073709551615",
            ReleaseType::Prerelease,
            "beta",
        )
        .unwrap_err();
        assert!(err.to_string().contains("prerelease counter"));
    }

    #[test]
    fn test_empty_prerelease_id_is_error() {
        let err = bump_version("1.0.0", ReleaseType::Prerelease, "").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_build_metadata_dropped() {
        assert_eq!(bump("1.0.0+build.7", "patch"), "1.0.1");
    }

    #[test]
    fn test_invalid_version_is_error() {
        let err = bump_version("1.0", ReleaseType::Patch, DEFAULT_PRERELEASE_ID).unwrap_err();
        assert!(err.to_string().contains("Invalid version '1.0'"));
    }

    #[test]
    fn test_invalid_prerelease_id_is_error() {
        assert!(bump_version("1.0.0", ReleaseType::Prerelease, "bad id").is_err());
    }

    #[test]
    fn test_release_type_from_tag() {
        assert_eq!(ReleaseType::from_tag("major"), ReleaseType::Major);
        assert_eq!(ReleaseType::from("minor"), ReleaseType::Minor);
        assert_eq!(ReleaseType::from_tag("MAJOR"), ReleaseType::Patch);
        assert_eq!(ReleaseType::from_tag(" minor "), ReleaseType::Patch);
        assert_eq!(ReleaseType::from_tag("prerelease"), ReleaseType::Prerelease);
        assert_eq!(ReleaseType::from_tag("whatever"), ReleaseType::Patch);
    }

    #[test]
    fn test_release_type_is_known() {
        assert!(ReleaseType::is_known("patch"));
        assert!(!ReleaseType::is_known(" Minor "));
        assert!(!ReleaseType::is_known("MAJOR"));
        assert!(!ReleaseType::is_known("jacksonbrowne"));
    }

    #[test]
    fn test_prerelease_parse() {
        assert_eq!(PreRelease::parse("beta.1"), PreRelease::new("beta", Some(1)));
        assert_eq!(PreRelease::parse("alpha"), PreRelease::new("alpha", None));
        assert_eq!(PreRelease::parse("rc.1.4"), PreRelease::new("rc.1", Some(4)));
        assert_eq!(PreRelease::parse("7"), PreRelease::new("", Some(7)));
    }

    #[test]
    fn test_prerelease_increment_and_display() {
        let next = |s: &str| PreRelease::parse(s).increment().unwrap().to_string();
        assert_eq!(next("rc.99"), "rc.100");
        assert_eq!(next("alpha"), "alpha.1");
        assert_eq!(next("7"), "8");
    }
}
