//! `gmcfg roundtrip`: text to chip image and back.
//!
//! Encodes the document into a [`ChipImage`] through table-driven
//! translators, decodes the image again, and writes the result as text.
//! Comparing the output with `gmcfg fmt` of the input shows what the
//! tables do not cover.

use gm_chip::ChipImage;
use gm_textcfg::{from_chip_image, to_chip_image, TableTranslators};

use crate::context::{device_name, load_tool_config, read_document, write_output};
use crate::{GlobalArgs, RoundtripArgs};

/// Runs the `gmcfg roundtrip` command.
pub fn run(args: &RoundtripArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let doc = read_document(&args.input)?;
    let device = device_name(args.device.as_deref(), &doc, &config)?;
    let profile = gm_config::resolve_profile(&config, &device)?;

    let tables_dir = args.tables.as_ref().or(config.tables.dir.as_ref());
    let translators = match tables_dir {
        Some(dir) => {
            let tables = TableTranslators::load_dir(dir, &profile.die)?;
            global.detail(format_args!(
                "      Tables {} ({} words)",
                dir.display(),
                tables.word_count()
            ));
            tables
        }
        None => {
            global.status("warning: no translator tables configured; every set bit decodes as unknown");
            TableTranslators::empty(&profile.die)
        }
    };

    global.status(format_args!(
        "    Encoding {} for {}",
        args.input.display(),
        profile.name
    ));
    let image = to_chip_image(&doc, &translators, &profile)?;
    global.detail(format_args!("     Written {}", written_summary(&image)));

    let back = from_chip_image(&image, &translators)?;
    write_output(args.output.as_deref(), &back.to_text())?;
    Ok(0)
}

/// Counts the tile and RAM blocks holding data in `image`.
fn written_summary(image: &ChipImage) -> String {
    let mut latches = 0;
    let mut rams = 0;
    for die in image.dies() {
        for y in 0..die.max_row() {
            for x in 0..die.max_col() {
                if die.is_latch_empty(x, y) == Ok(false) {
                    latches += 1;
                }
            }
        }
        for y in 0..die.max_ram_row() {
            for x in 0..die.max_ram_col() {
                if die.is_ram_empty(x, y) == Ok(false) {
                    rams += 1;
                }
            }
        }
    }
    format!(
        "{latches} latch block(s), {rams} RAM block(s) over {} die(s)",
        image.die_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_chip::ChipProfile;
    use gm_textcfg::ChipConfiguration;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn roundtrip_with_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("db");
        std::fs::create_dir(&db).unwrap();
        std::fs::write(db.join("tile.db"), "CPE.A 0 1\n").unwrap();
        let input = dir.path().join("in.cfg");
        let output = dir.path().join("out.cfg");
        std::fs::write(&input, ".device CCGM1A1\n.tile 0 3 4\nCPE.A 01\nunknown: 9\n").unwrap();

        let args = RoundtripArgs {
            input,
            device: None,
            tables: Some(db),
            output: Some(output.clone()),
        };
        assert_eq!(run(&args, &quiet()).unwrap(), 0);

        let back = ChipConfiguration::parse(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let tile = &back.tiles[&gm_chip::Location::new(0, 3, 4)];
        assert_eq!(tile.to_string(), "CPE.A 01\nunknown: 9\n");
        assert_eq!(back.configs.len(), 1);
    }

    #[test]
    fn named_words_need_tables() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.cfg");
        std::fs::write(&input, ".device CCGM1A1\n.tile 0 3 4\nCPE.A 01\n").unwrap();
        let args = RoundtripArgs {
            input,
            device: None,
            tables: None,
            output: Some(dir.path().join("out.cfg")),
        };
        let err = run(&args, &quiet()).unwrap_err();
        assert!(err.to_string().contains("unknown config word 'CPE.A'"));
    }

    #[test]
    fn unnamed_input_takes_requested_device() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("anon.cfg");
        let output = dir.path().join("out.cfg");
        std::fs::write(&input, ".tile 0 1 1\nunknown: 3\n").unwrap();

        let args = RoundtripArgs {
            input,
            device: Some("CCGM1A1".into()),
            tables: None,
            output: Some(output.clone()),
        };
        assert_eq!(run(&args, &quiet()).unwrap(), 0);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with(".device CCGM1A1\n"));
        let back = ChipConfiguration::parse(&text).unwrap();
        assert_eq!(back.chip_name, "CCGM1A1");
        let tile = &back.tiles[&gm_chip::Location::new(0, 1, 1)];
        assert_eq!(tile.to_string(), "unknown: 3\n");
    }

    #[test]
    fn summary_counts_written_blocks() {
        let profile = ChipProfile::builtin("CCGM1A2").unwrap();
        let mut image = ChipImage::new(profile);
        image.die_mut(1).unwrap().write_latch(0, 0, &[1]).unwrap();
        image.die_mut(0).unwrap().write_ram(1, 1, &[]).unwrap();
        assert_eq!(
            written_summary(&image),
            "1 latch block(s), 1 RAM block(s) over 2 die(s)"
        );
    }
}
