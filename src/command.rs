//! Command-line descriptors and alias normalization.

use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Namespace an alias must live under to be normalized
pub const DEFAULT_ALIAS_NAMESPACE: &str = "lando";

/// Output mode every parsed command starts with
pub const DEFAULT_MODE: &str = "collect";

/// Options attached to a parsed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOpts {
    pub mode: String,
    pub cwd: PathBuf,
}

/// An executable plus its arguments, ready for a shell collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub run: Vec<String>,
    pub opts: CommandOpts,
}

/// Split `line` on whitespace and attach default options rooted at `cwd`.
pub fn parse_command_in(line: &str, cwd: &Path) -> CommandDescriptor {
    CommandDescriptor {
        run: line.split_whitespace().map(str::to_string).collect(),
        opts: CommandOpts {
            mode: DEFAULT_MODE.to_string(),
            cwd: cwd.to_path_buf(),
        },
    }
}

/// Like [`parse_command_in`], rooted at the absolute current directory.
pub fn parse_command(line: &str) -> Result<CommandDescriptor> {
    let cwd = std::env::current_dir()?;
    let descriptor = parse_command_in(line, &cwd);
    debug!("parsed {:?} in {}", descriptor.run, cwd.display());
    Ok(descriptor)
}

/// Loose string-keyed record describing a documented command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor {
    fields: BTreeMap<String, String>,
}

impl Descriptor {
    pub fn new() -> Self {
        Descriptor::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the alias is dot-prefixed with `namespace` and is not the bare root.
    fn alias_needs_wrapping(alias: &str, namespace: &str) -> bool {
        alias.starts_with(&format!("{}.", namespace)) && alias != namespace
    }

    /// Promote a namespaced alias to a global function.
    ///
    /// When `alias` is `{namespace}.<something>` the descriptor gains
    /// `name = alias`, `scope = global`, `kind = function` and drops `memberof`.
    /// Anything else is returned unchanged. Applying this twice is the same as once.
    pub fn normalize_alias(mut self, namespace: &str) -> Self {
        let alias = match self.fields.get("alias") {
            Some(alias) if Self::alias_needs_wrapping(alias, namespace) => alias.clone(),
            _ => return self,
        };

        debug!("wrapping alias {}", alias);
        self.fields.insert("name".to_string(), alias);
        self.fields.insert("scope".to_string(), "global".to_string());
        self.fields.insert("kind".to_string(), "function".to_string());
        self.fields.remove("memberof");
        self
    }
}

impl FromIterator<(String, String)> for Descriptor {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Descriptor {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_in_splits_tokens() {
        let cmd = parse_command_in("thing stuff", Path::new("/work"));
        assert_eq!(cmd.run, vec!["thing", "stuff"]);
        assert_eq!(cmd.opts.mode, "collect");
        assert_eq!(cmd.opts.cwd, PathBuf::from("/work"));
    }

    #[test]
    fn test_parse_command_in_collapses_whitespace() {
        let cmd = parse_command_in("  docker   ps\t-a \n", Path::new("/"));
        assert_eq!(cmd.run, vec!["docker", "ps", "-a"]);
    }

    #[test]
    fn test_parse_command_in_empty_line() {
        let cmd = parse_command_in("", Path::new("/"));
        assert!(cmd.run.is_empty());
    }

    #[test]
    fn test_no_alias_is_unchanged() {
        let descriptor = Descriptor::new().with("thing", "stuff");
        let fixed = descriptor.clone().normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed, descriptor);
        assert_eq!(fixed.get("thing"), Some("stuff"));
        assert!(!fixed.contains("name"));
    }

    #[test]
    fn test_alias_outside_namespace_is_unchanged() {
        let fixed = Descriptor::new()
            .with("alias", "stuff")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed.get("alias"), Some("stuff"));
        assert!(!fixed.contains("name"));
    }

    #[test]
    fn test_alias_with_namespace_in_middle_is_unchanged() {
        let fixed = Descriptor::new()
            .with("alias", "other.lando.thing")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed.get("alias"), Some("other.lando.thing"));
        assert!(!fixed.contains("name"));
    }

    #[test]
    fn test_alias_namespace_root_is_unchanged() {
        let fixed = Descriptor::new()
            .with("alias", "lando")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed.get("alias"), Some("lando"));
        assert!(!fixed.contains("name"));
    }

    #[test]
    fn test_alias_with_empty_suffix_is_wrapped() {
        let fixed = Descriptor::new()
            .with("alias", "lando.")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed.get("name"), Some("lando."));
        assert_eq!(fixed.get("scope"), Some("global"));
        assert_eq!(fixed.get("kind"), Some("function"));
    }

    #[test]
    fn test_alias_prefix_without_dot_is_unchanged() {
        let fixed = Descriptor::new()
            .with("alias", "landothing")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert!(!fixed.contains("name"));
    }

    #[test]
    fn test_namespaced_alias_is_wrapped() {
        let fixed = Descriptor::new()
            .with("alias", "lando.thing")
            .with("memberof", "lando")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(fixed.get("alias"), Some("lando.thing"));
        assert_eq!(fixed.get("name"), Some("lando.thing"));
        assert_eq!(fixed.get("scope"), Some("global"));
        assert_eq!(fixed.get("kind"), Some("function"));
        assert!(!fixed.contains("memberof"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = Descriptor::new()
            .with("alias", "lando.thing")
            .normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        let twice = once.clone().normalize_alias(DEFAULT_ALIAS_NAMESPACE);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_namespace() {
        let fixed = Descriptor::new()
            .with("alias", "acme.deploy")
            .normalize_alias("acme");
        assert_eq!(fixed.get("name"), Some("acme.deploy"));
    }

    #[test]
    fn test_descriptor_from_iter() {
        let descriptor: Descriptor = vec![("alias".to_string(), "lando.x".to_string())]
            .into_iter()
            .collect();
        assert_eq!(descriptor.len(), 1);
        assert!(!descriptor.is_empty());
    }
}
