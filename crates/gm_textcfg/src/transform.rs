//! Conversion between a [`ChipConfiguration`] and a [`ChipImage`].
//!
//! Encoding first checks that every sparse entry fits the target device,
//! then fills one die at a time. Decoding walks the full grid of every die
//! and keeps only blocks that have been written.

use gm_chip::{ChipImage, ChipProfile, Location};

use crate::document::ChipConfiguration;
use crate::entry_set::ConfigEntrySet;
use crate::error::{TransformError, TranslateError};
use crate::translate::TranslatorSet;

/// Collects every entry of `doc` that does not fit `profile`.
///
/// Tiles are checked against the tile grid, RAM blocks and RAM contents
/// against the RAM grid, and per-die records against the die count.
pub fn geometry_issues(doc: &ChipConfiguration, profile: &ChipProfile) -> Vec<TransformError> {
    let mut issues = Vec::new();
    let die_issue = |category, die: u32| TransformError::DieMismatch {
        category,
        die,
        device: profile.name.clone(),
        die_count: profile.die_count,
    };
    let location_issue = |category, location| TransformError::GeometryMismatch {
        category,
        location,
        device: profile.name.clone(),
    };

    for &die in doc.configs.keys().filter(|&&d| d >= profile.die_count) {
        issues.push(die_issue("config", die));
    }
    for &die in doc.serdes.keys().filter(|&&d| d >= profile.die_count) {
        issues.push(die_issue("serdes", die));
    }
    for &loc in doc.tiles.keys().filter(|&&l| !profile.contains_tile(l)) {
        issues.push(location_issue("tile", loc));
    }
    for &loc in doc.brams.keys().filter(|&&l| !profile.contains_ram(l)) {
        issues.push(location_issue("bram", loc));
    }
    for &loc in doc.bram_data.keys().filter(|&&l| !profile.contains_ram(l)) {
        issues.push(location_issue("bram_init", loc));
    }
    issues
}

/// Fails with the first entry of `doc` that does not fit `profile`.
pub fn validate_geometry(doc: &ChipConfiguration, profile: &ChipProfile) -> Result<(), TransformError> {
    match geometry_issues(doc, profile).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Encodes `doc` into a fresh image of `profile`.
///
/// A named document must name `profile` (ignoring case); an unnamed one is
/// encoded for whatever profile the caller chose.
///
/// Every die gets its die-level and SERDES buffers written, from an empty
/// entry set when the document has none. RAM contents are written at
/// address 0 whether or not the block also has a configuration.
pub fn to_chip_image(
    doc: &ChipConfiguration,
    translators: &dyn TranslatorSet,
    profile: &ChipProfile,
) -> Result<ChipImage, TransformError> {
    if !doc.chip_name.is_empty() && !doc.chip_name.eq_ignore_ascii_case(&profile.name) {
        return Err(TransformError::DeviceMismatch {
            document: doc.chip_name.clone(),
            profile: profile.name.clone(),
        });
    }
    validate_geometry(doc, profile)?;

    let empty = ConfigEntrySet::new();
    let mut image = ChipImage::new(profile.clone());
    for d in 0..image.die_count() {
        let die = image.die_mut(d)?;

        for y in 0..die.max_row() {
            for x in 0..die.max_col() {
                let loc = Location::new(d, x, y);
                if let Some(config) = doc.tiles.get(&loc) {
                    let data = translators
                        .tile(x, y)
                        .encode(config)
                        .map_err(|e| translate_error("tile", loc.to_string(), e))?;
                    die.write_latch(x, y, &data)?;
                }
            }
        }

        for y in 0..die.max_ram_row() {
            for x in 0..die.max_ram_col() {
                let loc = Location::new(d, x, y);
                if let Some(config) = doc.brams.get(&loc) {
                    let data = translators
                        .ram()
                        .encode(config)
                        .map_err(|e| translate_error("bram", loc.to_string(), e))?;
                    die.write_ram(x, y, &data)?;
                }
                if let Some(data) = doc.bram_data.get(&loc) {
                    die.write_ram_data(x, y, data, 0)?;
                }
            }
        }

        let config = doc.configs.get(&d).unwrap_or(&empty);
        let data = translators
            .die_config()
            .encode(config)
            .map_err(|e| translate_error("config", format!("for die {d}"), e))?;
        die.write_die_config(&data)?;

        let serdes = doc.serdes.get(&d).unwrap_or(&empty);
        let data = translators
            .serdes()
            .encode(serdes)
            .map_err(|e| translate_error("serdes", format!("for die {d}"), e))?;
        die.write_serdes_config(&data)?;
    }
    Ok(image)
}

/// Decodes every written block of `image` into a document.
///
/// Tiles and RAM blocks that decode to an empty entry set are left out.
/// RAM contents are only read back for RAM blocks that are configured.
pub fn from_chip_image(
    image: &ChipImage,
    translators: &dyn TranslatorSet,
) -> Result<ChipConfiguration, TransformError> {
    let mut doc = ChipConfiguration::new(image.name());
    for d in 0..image.die_count() {
        let die = image.die(d)?;

        for y in 0..die.max_row() {
            for x in 0..die.max_col() {
                if !die.is_latch_empty(x, y)? {
                    let config = translators.tile(x, y).decode(die.latch_config(x, y)?);
                    doc.set_tile(Location::new(d, x, y), config);
                }
            }
        }

        for y in 0..die.max_ram_row() {
            for x in 0..die.max_ram_col() {
                if die.is_ram_empty(x, y)? {
                    continue;
                }
                let loc = Location::new(d, x, y);
                doc.set_bram(loc, translators.ram().decode(die.ram_config(x, y)?));
                if !die.is_ram_data_empty(x, y)? {
                    doc.set_bram_data(loc, die.ram_data(x, y)?.to_vec());
                }
            }
        }

        doc.configs
            .insert(d, translators.die_config().decode(die.die_config()));
        doc.serdes
            .insert(d, translators.serdes().decode(die.serdes_config()));
    }
    Ok(doc)
}

fn translate_error(category: &'static str, position: String, source: TranslateError) -> TransformError {
    TransformError::Translate {
        category,
        position,
        source,
    }
}
