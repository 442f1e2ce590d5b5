//! Packaging and installer command assembly.
//!
//! Nothing here runs a command; callers get strings to hand to a shell.

use crate::config::{InstallerSettings, PackageSettings};
use crate::platform::Platform;
use log::debug;

const POWERSHELL_PREFIX: &str = "PowerShell -NoProfile -ExecutionPolicy Bypass -Command";
const POWERSHELL_SUFFIX: &str = "&& EXIT /B %errorlevel%";

/// Delay appended after packaging on POSIX targets
const SETTLE_COMMAND: &str = "sleep 2";

/// Builds the ordered shell commands that package an executable at `output`.
///
/// Always: dependency install, then the packaging invocation with `output` as its
/// final argument. Non-Windows targets also get `chmod +x {output}` and `sleep 2`.
pub fn pkg_commands(output: &str, platform: Platform, settings: &PackageSettings) -> Vec<String> {
    let mut commands = vec![
        settings.install.clone(),
        format!(
            "{} {} --targets {}-{}-{} --config {} --output {}",
            settings.tool,
            settings.entrypoint,
            settings.runtime,
            platform,
            settings.arch,
            settings.config,
            output
        ),
    ];

    if !platform.is_windows() {
        commands.push(format!("chmod +x {}", output));
        commands.push(SETTLE_COMMAND.to_string());
    }

    debug!("{} packaging commands for {}", commands.len(), platform);
    commands
}

/// Wraps `command` so it runs in a non-interactive PowerShell session that
/// bypasses the execution policy and propagates the exit code.
pub fn powershell_wrap(command: &str) -> Vec<String> {
    vec![
        POWERSHELL_PREFIX.to_string(),
        command.to_string(),
        POWERSHELL_SUFFIX.to_string(),
    ]
}

/// Path of the installer build script for `platform`.
///
/// Windows paths use backslashes since they are handed to PowerShell.
pub fn installer_script(platform: Platform, settings: &InstallerSettings) -> String {
    match platform {
        Platform::Win => format!(
            "{}\\build-{}.ps1",
            settings.scripts_dir.replace('/', "\\"),
            platform.host_id()
        ),
        _ => format!("{}/build-{}.sh", settings.scripts_dir, platform.host_id()),
    }
}

/// Invocation that runs the installer build for `platform`.
///
/// POSIX targets get the script path itself; Windows gets the script wrapped
/// through [`powershell_wrap`].
pub fn installer_invocation(platform: Platform, settings: &InstallerSettings) -> String {
    let script = installer_script(platform, settings);
    if platform.is_windows() {
        powershell_wrap(&script).join(" ")
    } else {
        script
    }
}
