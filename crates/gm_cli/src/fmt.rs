//! `gmcfg fmt`: rewrite a configuration in canonical form.

use gm_textcfg::ChipConfiguration;

use crate::context::write_output;
use crate::{FmtArgs, GlobalArgs};

/// Runs the `gmcfg fmt` command.
///
/// With `--check`, nothing is written and the exit code is 1 when the
/// input differs from its canonical form.
pub fn run(args: &FmtArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let original = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;
    let doc = ChipConfiguration::parse(&original)
        .map_err(|e| format!("{}: {e}", args.input.display()))?;
    let canonical = doc.to_text();

    if args.check {
        if canonical == original {
            global.status(format_args!("   Canonical {}", args.input.display()));
            return Ok(0);
        }
        global.status(format_args!("   Reformat {}", args.input.display()));
        return Ok(1);
    }

    write_output(args.output.as_deref(), &canonical)?;
    if let Some(output) = &args.output {
        global.status(format_args!(
            "   Formatted {} -> {}",
            args.input.display(),
            output.display()
        ));
    }
    Ok(0)
}
