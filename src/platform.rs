//! Target platform resolution
//!
//! The host identifier is always passed in explicitly; only [`host_platform_id`]
//! looks at the running process, and it is meant for the CLI edge.

use log::debug;
use std::fmt;

/// Canonical packaging target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Macos,
    Win,
    Linux,
}

impl Platform {
    /// Resolve a host platform identifier (`darwin`, `win32`, `linux`, ...).
    ///
    /// Anything that is not macOS or Windows resolves to [`Platform::Linux`].
    pub fn resolve(host_platform_id: &str) -> Self {
        let platform = match host_platform_id {
            "darwin" => Platform::Macos,
            "win32" => Platform::Win,
            _ => Platform::Linux,
        };
        debug!("resolved host '{}' to {}", host_platform_id, platform);
        platform
    }

    /// Whether `host_platform_id` maps to a platform without falling back
    pub fn is_known(host_platform_id: &str) -> bool {
        matches!(host_platform_id, "darwin" | "win32" | "linux")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Macos => "macos",
            Platform::Win => "win",
            Platform::Linux => "linux",
        }
    }

    /// Host identifier this platform is resolved from
    pub fn host_id(&self) -> &'static str {
        match self {
            Platform::Macos => "darwin",
            Platform::Win => "win32",
            Platform::Linux => "linux",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Win)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Host identifier of the running process, in the `darwin`/`win32`/`linux` vocabulary.
pub fn host_platform_id() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}
