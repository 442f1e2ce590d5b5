use std::fmt;

/// Inputs that were not recognized and were replaced by a default.
/// These are non-fatal and should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackWarning {
    /// Release type not recognized, bumped as patch instead
    UnknownReleaseType { given: String },
    /// Host platform not recognized, packaged for linux instead
    UnknownPlatform { given: String },
    /// Repository carries no tag that parses as a version
    NoVersionTag { repo: String },
}

impl FallbackWarning {
    /// Warning for `tag` when it is not a known release type
    pub fn for_release_type(tag: &str) -> Option<Self> {
        if crate::version::ReleaseType::is_known(tag) {
            None
        } else {
            Some(FallbackWarning::UnknownReleaseType {
                given: tag.to_string(),
            })
        }
    }

    /// Warning for `host` when it is not a known platform identifier
    pub fn for_platform(host: &str) -> Option<Self> {
        if crate::platform::Platform::is_known(host) {
            None
        } else {
            Some(FallbackWarning::UnknownPlatform {
                given: host.to_string(),
            })
        }
    }
}

impl fmt::Display for FallbackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackWarning::UnknownReleaseType { given } => {
                write!(f, "Unknown release type '{}', bumping patch", given)
            }
            FallbackWarning::UnknownPlatform { given } => {
                write!(f, "Unknown host platform '{}', targeting linux", given)
            }
            FallbackWarning::NoVersionTag { repo } => {
                write!(f, "No version tag found in '{}', starting from 0.0.0", repo)
            }
        }
    }
}
