//! gmcfg: command-line tools for GateMate text configurations.
//!
//! Provides `gmcfg fmt` to canonicalize a configuration file, `gmcfg check`
//! to validate it against a device, `gmcfg roundtrip` to push it through a
//! chip image and back, and `gmcfg profiles` to list known devices.

#![warn(missing_docs)]

mod check;
mod context;
mod fmt;
mod profiles;
mod roundtrip;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// gmcfg: GateMate configuration tools.
#[derive(Parser, Debug)]
#[command(name = "gmcfg", version, about = "GateMate configuration tools")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `gmcfg.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite a configuration file in canonical form.
    Fmt(FmtArgs),
    /// Validate a configuration file against its device.
    Check(CheckArgs),
    /// Convert a configuration to a chip image and back.
    Roundtrip(RoundtripArgs),
    /// List known device profiles.
    Profiles(ProfilesArgs),
}

/// Arguments for the `gmcfg fmt` subcommand.
#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// Configuration file to format.
    pub input: PathBuf,

    /// Output path (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only report whether the file is already canonical.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `gmcfg check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Configuration file to validate.
    pub input: PathBuf,

    /// Device to validate against (default: the device named in the file).
    #[arg(short, long)]
    pub device: Option<String>,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `gmcfg roundtrip` subcommand.
#[derive(Parser, Debug)]
pub struct RoundtripArgs {
    /// Configuration file to convert.
    pub input: PathBuf,

    /// Device to encode for (default: the device named in the file).
    #[arg(short, long)]
    pub device: Option<String>,

    /// Directory holding the translator tables.
    #[arg(short, long)]
    pub tables: Option<PathBuf>,

    /// Output path (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `gmcfg profiles` subcommand.
#[derive(Parser, Debug)]
pub struct ProfilesArgs {
    /// Output format for the listing.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Optional path to a configuration file.
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Prints a status line unless `--quiet` was given.
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Prints a detail line only with `--verbose`.
    pub fn detail(&self, message: impl std::fmt::Display) {
        if self.verbose && !self.quiet {
            eprintln!("{message}");
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Fmt(ref args) => fmt::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Roundtrip(ref args) => roundtrip::run(args, &global),
        Command::Profiles(ref args) => profiles::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_fmt_default() {
        let cli = Cli::parse_from(["gmcfg", "fmt", "design.cfg"]);
        match cli.command {
            Command::Fmt(ref args) => {
                assert_eq!(args.input, PathBuf::from("design.cfg"));
                assert!(args.output.is_none());
                assert!(!args.check);
            }
            _ => panic!("expected Fmt command"),
        }
    }

    #[test]
    fn parse_fmt_with_output() {
        let cli = Cli::parse_from(["gmcfg", "fmt", "in.cfg", "-o", "out.cfg", "--check"]);
        match cli.command {
            Command::Fmt(ref args) => {
                assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.cfg")));
                assert!(args.check);
            }
            _ => panic!("expected Fmt command"),
        }
    }

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["gmcfg", "check", "design.cfg"]);
        match cli.command {
            Command::Check(ref args) => {
                assert!(args.device.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from([
            "gmcfg", "check", "design.cfg", "--device", "CCGM1A2", "--format", "json",
        ]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.device.as_deref(), Some("CCGM1A2"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_roundtrip_with_tables() {
        let cli = Cli::parse_from([
            "gmcfg",
            "roundtrip",
            "design.cfg",
            "--tables",
            "db",
            "-o",
            "back.cfg",
        ]);
        match cli.command {
            Command::Roundtrip(ref args) => {
                assert_eq!(args.tables, Some(PathBuf::from("db")));
                assert_eq!(args.output, Some(PathBuf::from("back.cfg")));
                assert!(args.device.is_none());
            }
            _ => panic!("expected Roundtrip command"),
        }
    }

    #[test]
    fn parse_profiles() {
        let cli = Cli::parse_from(["gmcfg", "profiles", "-f", "json"]);
        match cli.command {
            Command::Profiles(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected Profiles command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["gmcfg", "--quiet", "profiles"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gmcfg", "profiles", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["gmcfg", "--config", "/etc/gmcfg.toml", "profiles"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/gmcfg.toml")));
    }

    #[test]
    fn missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["gmcfg", "check"]).is_err());
    }
}
