//! `gmcfg check`: validate a configuration against its device.
//!
//! 1. Load `gmcfg.toml` (if any)
//! 2. Parse the document
//! 3. Resolve the device profile
//! 4. Collect device and geometry mismatches
//! 5. Report as text or JSON

use gm_chip::ChipProfile;
use gm_textcfg::{geometry_issues, ChipConfiguration, DocumentStats, TransformError};
use serde::Serialize;

use crate::context::{device_name, load_tool_config, read_document};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Machine-readable result of `gmcfg check`.
#[derive(Debug, Serialize)]
struct CheckReport {
    file: String,
    device: String,
    die_count: u32,
    stats: DocumentStats,
    issues: Vec<String>,
}

/// Runs the `gmcfg check` command.
///
/// Returns exit code 0 if the document fits the device, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let doc = read_document(&args.input)?;
    let device = device_name(args.device.as_deref(), &doc, &config)?;
    let profile = gm_config::resolve_profile(&config, &device)?;

    if args.format == ReportFormat::Text {
        global.status(format_args!(
            "    Checking {} against {} ({} die(s))",
            args.input.display(),
            profile.name,
            profile.die_count
        ));
    }

    let issues = collect_issues(&doc, &profile);
    let stats = doc.stats();

    match args.format {
        ReportFormat::Text => {
            global.detail(format_args!(
                "     Records {} config, {} serdes, {} tile, {} bram, {} bram_init ({} bytes)",
                stats.configs,
                stats.serdes,
                stats.tiles,
                stats.brams,
                stats.bram_inits,
                stats.bram_init_bytes
            ));
            for issue in &issues {
                eprintln!("error: {issue}");
            }
            global.status(format_args!("   Result: {} issue(s)", issues.len()));
        }
        ReportFormat::Json => {
            let report = CheckReport {
                file: args.input.display().to_string(),
                device: profile.name.clone(),
                die_count: profile.die_count,
                stats,
                issues: issues.iter().map(ToString::to_string).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if issues.is_empty() { 0 } else { 1 })
}

/// Lists every reason `doc` cannot be encoded for `profile`.
fn collect_issues(doc: &ChipConfiguration, profile: &ChipProfile) -> Vec<TransformError> {
    let mut issues = Vec::new();
    if !doc.chip_name.is_empty() && !doc.chip_name.eq_ignore_ascii_case(&profile.name) {
        issues.push(TransformError::DeviceMismatch {
            document: doc.chip_name.clone(),
            profile: profile.name.clone(),
        });
    }
    issues.extend(geometry_issues(doc, profile));
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    fn check(input: &Path, device: Option<&str>) -> i32 {
        let args = CheckArgs {
            input: input.to_path_buf(),
            device: device.map(str::to_string),
            format: ReportFormat::Json,
        };
        run(&args, &quiet()).unwrap()
    }

    #[test]
    fn valid_document_passes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ok.cfg");
        std::fs::write(&input, ".device CCGM1A2\n.tile 1 81 65\nCPE.A 1\n").unwrap();
        assert_eq!(check(&input, None), 0);
    }

    #[test]
    fn die_beyond_device_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.cfg");
        std::fs::write(&input, ".device CCGM1A1\n.tile 1 0 0\nCPE.A 1\n").unwrap();
        assert_eq!(check(&input, None), 1);
    }

    #[test]
    fn device_override_reports_mismatch() {
        let doc = ChipConfiguration::new("CCGM1A1");
        let profile = ChipProfile::builtin("CCGM1A4").unwrap();
        let issues = collect_issues(&doc, &profile);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], TransformError::DeviceMismatch { .. }));
    }

    #[test]
    fn unnamed_document_uses_requested_device() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("anon.cfg");
        std::fs::write(&input, ".config 3\nGPIO.A 1\n").unwrap();
        assert_eq!(check(&input, Some("CCGM1A4")), 0);
        assert_eq!(check(&input, Some("CCGM1A2")), 1);
    }

    #[test]
    fn unknown_device_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("x.cfg");
        std::fs::write(&input, ".device XC7A35T\n").unwrap();
        let args = CheckArgs {
            input,
            device: None,
            format: ReportFormat::Text,
        };
        let err = run(&args, &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "unknown device 'XC7A35T'");
    }
}
