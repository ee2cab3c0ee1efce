//! `gmcfg profiles`: list known device profiles.

use gm_chip::ChipProfile;

use crate::context::load_tool_config;
use crate::{GlobalArgs, ProfilesArgs, ReportFormat};

/// Runs the `gmcfg profiles` command.
pub fn run(args: &ProfilesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let profiles = gm_config::known_profiles(&config)?;

    match args.format {
        ReportFormat::Text => print!("{}", render_table(&profiles)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&profiles)?),
    }
    Ok(0)
}

fn render_table(profiles: &[ChipProfile]) -> String {
    let mut out = format!(
        "{:<12} {:>4} {:>7} {:>5} {:>8}\n",
        "DEVICE", "DIES", "TILES", "RAMS", "MEMORY"
    );
    for p in profiles {
        let tiles = format!("{}x{}", p.die.max_col, p.die.max_row);
        let rams = format!("{}x{}", p.die.max_ram_col, p.die.max_ram_row);
        out.push_str(&format!(
            "{:<12} {:>4} {:>7} {:>5} {:>8}\n",
            p.name, p.die_count, tiles, rams, p.die.memory_size
        ));
    }
    out
}
