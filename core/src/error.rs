use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::Coord2;

/// Level field named in parse and serialize errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Mistakes,
    Title,
    Author,
    Flavor,
    Width,
    Height,
    CellData,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mistakes => "mistakes",
            Self::Title => "title",
            Self::Author => "author",
            Self::Flavor => "flavor",
            Self::Width => "width",
            Self::Height => "height",
            Self::CellData => "cell data",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: Field, value: String },
    #[error("{field} must be between 1 and 255, got {value}")]
    OutOfRange { field: Field, value: usize },
    #[error("cell data has {found} characters, expected {expected}")]
    DataLength { expected: usize, found: usize },
    #[error("grid line {line} has {found} characters, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("Unsupported level format")]
    FormatUnrecognized,
    #[error("Missing {0}")]
    MissingField(Field),
    #[error("Invalid dimension: {0}")]
    InvalidDimension(#[from] DimensionError),
    #[error("Unknown character {token:?} at position {position}")]
    UnknownToken { token: char, position: usize },
    #[error("Cell on padding slot at line {line}, column {column}")]
    Misaligned { line: usize, column: usize },
    #[error("The {0} must not contain ':'")]
    ReservedCharacter(Field),
    #[error("Cell at slot {slot:?} claims coords {found:?}")]
    DisplacedCell { slot: Coord2, found: Coord2 },
}

pub type Result<T> = core::result::Result<T, LevelError>;
