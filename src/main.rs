use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use relkit::command::{parse_command, Descriptor};
use relkit::config::{self, Config};
use relkit::fallback::FallbackWarning;
use relkit::git_ops::GitRepo;
use relkit::packaging::{installer_invocation, pkg_commands};
use relkit::platform::{host_platform_id, Platform};
use relkit::ui;
use relkit::version::{bump_version, ReleaseType};

/// Version the bump starts from when a repository has no version tag
const INITIAL_VERSION: &str = "0.0.0";

#[derive(Parser)]
#[command(
    name = "relkit",
    version,
    about = "Build-script helpers: version bumps, target detection and packaging commands"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the next version
    Bump {
        #[arg(help = "Version to bump", required_unless_present = "from_tag")]
        version: Option<String>,

        #[arg(
            short = 't',
            long = "type",
            default_value = "patch",
            help = "major, minor, patch or prerelease"
        )]
        release_type: String,

        #[arg(long, help = "Prerelease identifier for releases without one")]
        preid: Option<String>,

        #[arg(
            long,
            conflicts_with = "version",
            help = "Bump the highest version tag in the repository"
        )]
        from_tag: bool,

        #[arg(long, default_value = ".", help = "Repository used with --from-tag")]
        repo: String,
    },
    /// Print the canonical target platform
    Target {
        #[arg(long, help = "Host platform id (darwin, win32, linux); defaults to this host")]
        host: Option<String>,
    },
    /// Print the commands that package an executable
    Pkg {
        #[arg(help = "Path of the packaged executable")]
        output: String,

        #[arg(long, help = "Host platform id (darwin, win32, linux); defaults to this host")]
        host: Option<String>,
    },
    /// Print the installer build invocation
    Installer {
        #[arg(long, help = "Host platform id (darwin, win32, linux); defaults to this host")]
        host: Option<String>,
    },
    /// Print a command line as a command descriptor
    Parse {
        #[arg(help = "Whitespace separated command line")]
        line: String,
    },
    /// Print a descriptor with its alias normalized
    Alias {
        #[arg(long = "field", value_parser = parse_key_val, help = "Descriptor field as KEY=VALUE")]
        fields: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args.command, &config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Bump {
            version,
            release_type,
            preid,
            from_tag: _,
            repo,
        } => {
            if let Some(warning) = FallbackWarning::for_release_type(&release_type) {
                ui::display_fallback_warning(&warning);
            }

            let current = match version {
                Some(version) => version,
                None => {
                    debug!("reading version tags from {}", repo);
                    match GitRepo::open(&repo)?.latest_version_tag()? {
                        Some(tag) => {
                            ui::display_status(&format!("Latest version tag: {}", tag.name));
                            tag.version.to_string()
                        }
                        None => {
                            let warning = FallbackWarning::NoVersionTag { repo: repo.clone() };
                            ui::display_fallback_warning(&warning);
                            INITIAL_VERSION.to_string()
                        }
                    }
                }
            };

            let prerelease_id = preid.as_deref().unwrap_or(&config.version.prerelease_id);
            let next = bump_version(&current, ReleaseType::from_tag(&release_type), prerelease_id)?;
            ui::display_status(&ui::format_bump(&current, &next));
            println!("{}", next);
        }
        Command::Target { host } => {
            println!("{}", resolve_host(host.as_deref()));
        }
        Command::Pkg { output, host } => {
            let platform = resolve_host(host.as_deref());
            ui::display_commands(&pkg_commands(&output, platform, &config.package));
        }
        Command::Installer { host } => {
            let platform = resolve_host(host.as_deref());
            println!("{}", installer_invocation(platform, &config.installer));
        }
        Command::Parse { line } => {
            let descriptor = parse_command(&line)?;
            print!("{}", toml::to_string(&descriptor)?);
        }
        Command::Alias { fields } => {
            let descriptor: Descriptor = fields.into_iter().collect();
            let normalized = descriptor.normalize_alias(&config.alias.namespace);
            print!("{}", toml::to_string(&normalized)?);
        }
    }

    Ok(())
}

fn resolve_host(host: Option<&str>) -> Platform {
    let host = host.unwrap_or(host_platform_id());
    if let Some(warning) = FallbackWarning::for_platform(host) {
        ui::display_fallback_warning(&warning);
    }
    Platform::resolve(host)
}
