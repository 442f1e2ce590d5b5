use crate::command::DEFAULT_ALIAS_NAMESPACE;
use crate::error::{RelkitError, Result};
use crate::version::DEFAULT_PRERELEASE_ID;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOCAL_CONFIG: &str = "./relkit.toml";
const USER_CONFIG: &str = ".relkit.toml";

/// Represents the complete configuration for relkit.
///
/// Every section is optional; missing keys keep their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub package: PackageSettings,

    #[serde(default)]
    pub installer: InstallerSettings,

    #[serde(default)]
    pub alias: AliasConfig,
}

fn default_prerelease_id() -> String {
    DEFAULT_PRERELEASE_ID.to_string()
}

/// Defaults applied when bumping versions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default = "default_prerelease_id")]
    pub prerelease_id: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            prerelease_id: default_prerelease_id(),
        }
    }
}

fn default_install() -> String {
    "yarn --production".to_string()
}

fn default_tool() -> String {
    "node_modules/.bin/pkg".to_string()
}

fn default_entrypoint() -> String {
    "bin/cli.js".to_string()
}

fn default_runtime() -> String {
    "node8".to_string()
}

fn default_arch() -> String {
    "x64".to_string()
}

fn default_pkg_config() -> String {
    "package.json".to_string()
}

/// Pieces of the packaging command line.
///
/// The packaging invocation is assembled as
/// `{tool} {entrypoint} --targets {runtime}-{platform}-{arch} --config {config} --output {output}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageSettings {
    /// Dependency install command, restricted to production dependencies
    #[serde(default = "default_install")]
    pub install: String,

    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    #[serde(default = "default_runtime")]
    pub runtime: String,

    #[serde(default = "default_arch")]
    pub arch: String,

    #[serde(default = "default_pkg_config")]
    pub config: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        PackageSettings {
            install: default_install(),
            tool: default_tool(),
            entrypoint: default_entrypoint(),
            runtime: default_runtime(),
            arch: default_arch(),
            config: default_pkg_config(),
        }
    }
}

fn default_scripts_dir() -> String {
    "scripts".to_string()
}

/// Where the platform installer scripts live.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InstallerSettings {
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        InstallerSettings {
            scripts_dir: default_scripts_dir(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_ALIAS_NAMESPACE.to_string()
}

/// Reserved namespace used by alias normalization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AliasConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for AliasConfig {
    fn default() -> Self {
        AliasConfig {
            namespace: default_namespace(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text and checks its values.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.alias.namespace.is_empty() || self.alias.namespace.contains('.') {
            return Err(RelkitError::config(format!(
                "alias.namespace must be a single non-empty segment, got '{}'",
                self.alias.namespace
            )));
        }
        if self.version.prerelease_id.is_empty() {
            return Err(RelkitError::config("version.prerelease_id must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relkit.toml` in current directory
/// 3. `.relkit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        debug!("loading config from {}", path);
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG).exists() {
        debug!("loading config from {}", LOCAL_CONFIG);
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            debug!("loading config from {}", config_path.display());
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
