//! Text encodings of a [`Level`].
//!
//! The canonical format is a single colon-delimited line and is the only one
//! written. The legacy multi-line format is accepted on input only.

use core::str::FromStr;

use crate::*;
pub use canonical::*;
pub use legacy::*;

mod canonical;
mod legacy;

/// Parses a level in either supported format.
pub fn parse(text: &str) -> Result<Level> {
    let text = text.trim_start();
    if text.starts_with(CANONICAL_HEADER) {
        log::debug!("Parsing canonical level");
        parse_canonical(text)
    } else if text.lines().next().map(str::trim_end) == Some(LEGACY_HEADER) {
        log::debug!("Parsing legacy level");
        parse_legacy(text)
    } else {
        Err(LevelError::FormatUnrecognized)
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(text: &str) -> Result<Self> {
        parse(text)
    }
}

fn angle_from_glyph(glyph: char) -> Option<Angle> {
    match glyph {
        '|' => Some(Angle::Down),
        '/' => Some(Angle::DownLeft),
        '\\' => Some(Angle::DownRight),
        _ => None,
    }
}

fn full_precision(precision: Precision, coords: Coord2) -> FullPrecision {
    if precision == Precision::Precise {
        log::warn!("Full cell at {coords:?} cannot be precise, reading as a number");
    }
    FullPrecision::narrow(precision)
}

fn column_precision(precision: Precision, coords: Coord2) -> ColumnPrecision {
    if precision == Precision::None {
        log::warn!("Column hint at {coords:?} needs a number, reading as one");
    }
    ColumnPrecision::narrow(precision)
}
