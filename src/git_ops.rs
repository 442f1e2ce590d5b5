use crate::error::{RelkitError, Result};
use git2::Repository;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const VERSION_TAG_PATTERN: &str =
    r"^[vV]?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)$";

fn version_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_TAG_PATTERN).expect("version tag pattern is valid"))
}

/// A tag whose name carries a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: semver::Version,
}

/// Extracts the version from a tag name such as `v1.2.3` or `1.2.3-beta.1`.
///
/// # Returns
/// * `Some(Version)` - The tag is a version, optionally prefixed with `v`/`V`
/// * `None` - Anything else (e.g. `release-candidate`, `v1.2`)
pub fn parse_version_tag(tag: &str) -> Option<semver::Version> {
    let captures = version_tag_regex().captures(tag)?;
    semver::Version::parse(captures.get(1)?.as_str()).ok()
}

/// Wrapper around git2 Repository for reading version tags.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discovers the git repository at `path` or one of its parents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| {
            RelkitError::tag(format!("Not in a git repository ({}): {}", path.display(), e))
        })?;
        Ok(GitRepo { repo })
    }

    /// Returns all tags that parse as versions, in no particular order.
    pub fn version_tags(&self) -> Result<Vec<VersionTag>> {
        let names = self.repo.tag_names(None)?;
        let tags = names
            .iter()
            .flatten()
            .filter_map(|name| {
                parse_version_tag(name).map(|version| VersionTag {
                    name: name.to_string(),
                    version,
                })
            })
            .collect::<Vec<_>>();

        debug!("found {} version tags", tags.len());
        Ok(tags)
    }

    /// Returns the highest version tag by semver precedence, if any.
    pub fn latest_version_tag(&self) -> Result<Option<VersionTag>> {
        Ok(self
            .version_tags()?
            .into_iter()
            .max_by(|a, b| a.version.cmp(&b.version)))
    }
}
