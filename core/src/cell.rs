use serde::{Deserialize, Serialize};

use crate::*;

/// How much a clue discloses about the cells it covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    None,
    Number,
    Precise,
}

/// Precision range available to [`CellKind::Full`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FullPrecision {
    None,
    Number,
}

/// Precision range available to [`CellKind::ColumnHint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnPrecision {
    Number,
    Precise,
}

impl From<FullPrecision> for Precision {
    fn from(precision: FullPrecision) -> Self {
        match precision {
            FullPrecision::None => Self::None,
            FullPrecision::Number => Self::Number,
        }
    }
}

impl From<ColumnPrecision> for Precision {
    fn from(precision: ColumnPrecision) -> Self {
        match precision {
            ColumnPrecision::Number => Self::Number,
            ColumnPrecision::Precise => Self::Precise,
        }
    }
}

impl FullPrecision {
    /// Narrows a general precision, `Precise` collapses to `Number`.
    pub const fn narrow(precision: Precision) -> Self {
        match precision {
            Precision::None => Self::None,
            Precision::Number | Precision::Precise => Self::Number,
        }
    }
}

impl ColumnPrecision {
    /// Narrows a general precision, `None` widens to `Number`.
    pub const fn narrow(precision: Precision) -> Self {
        match precision {
            Precision::Precise => Self::Precise,
            Precision::None | Precision::Number => Self::Number,
        }
    }
}

/// Visibility of a cell's computed clue label.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintLevel {
    Hidden,
    #[default]
    None,
    Shown,
}


/// Direction of a column ray, in 60° clockwise steps starting straight down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Angle {
    Down,
    DownLeft,
    UpLeft,
    Up,
    UpRight,
    DownRight,
}

impl Angle {
    pub const ALL: [Angle; 6] = [
        Angle::Down,
        Angle::DownLeft,
        Angle::UpLeft,
        Angle::Up,
        Angle::UpRight,
        Angle::DownRight,
    ];

    pub const fn new(steps: u8) -> Option<Self> {
        if (steps as usize) < Self::ALL.len() {
            Some(Self::ALL[steps as usize])
        } else {
            None
        }
    }

    pub const fn steps(self) -> u8 {
        self as u8
    }

    pub const fn opposite(self) -> Self {
        Self::ALL[(self as usize + 3) % 6]
    }

    /// Glyph of the axis this angle lies on; upward rays share their
    /// downward twin's glyph.
    pub const fn glyph(self) -> char {
        match self {
            Self::Down | Self::Up => '|',
            Self::DownLeft | Self::UpRight => '/',
            Self::DownRight | Self::UpLeft => '\\',
        }
    }
}

/// Variant-specific state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty {
        hidden: bool,
        precision: Precision,
    },
    Full {
        hidden: bool,
        precision: FullPrecision,
    },
    ColumnHint {
        precision: ColumnPrecision,
        angle: Angle,
    },
}

impl CellKind {
    pub const fn empty(hidden: bool, precision: Precision) -> Self {
        Self::Empty { hidden, precision }
    }

    pub const fn full(hidden: bool, precision: FullPrecision) -> Self {
        Self::Full { hidden, precision }
    }

    pub const fn column_hint(precision: ColumnPrecision, angle: Angle) -> Self {
        Self::ColumnHint { precision, angle }
    }
}

/// One populated slot of the board.
///
/// `coords` always equals the slot the cell occupies in its [`Level`]; only
/// `hidden` and `hint` change after creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    kind: CellKind,
    hint: HintLevel,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2, kind: CellKind) -> Self {
        Self {
            coords,
            kind,
            hint: HintLevel::None,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn hint(&self) -> HintLevel {
        self.hint
    }

    pub(crate) fn set_hint(&mut self, hint: HintLevel) {
        self.hint = hint;
    }

    pub const fn precision(&self) -> Precision {
        match self.kind {
            CellKind::Empty { precision, .. } => precision,
            CellKind::Full { precision, .. } => match precision {
                FullPrecision::None => Precision::None,
                FullPrecision::Number => Precision::Number,
            },
            CellKind::ColumnHint { precision, .. } => match precision {
                ColumnPrecision::Number => Precision::Number,
                ColumnPrecision::Precise => Precision::Precise,
            },
        }
    }

    /// Column hints are never hidden.
    pub const fn is_hidden(&self) -> bool {
        match self.kind {
            CellKind::Empty { hidden, .. } | CellKind::Full { hidden, .. } => hidden,
            CellKind::ColumnHint { .. } => false,
        }
    }

    pub const fn is_column_hint(&self) -> bool {
        matches!(self.kind, CellKind::ColumnHint { .. })
    }

    pub const fn is_full(&self) -> bool {
        matches!(self.kind, CellKind::Full { .. })
    }

    /// Whether this cell no longer blocks a clue from being fully resolved.
    pub const fn is_resolved(&self) -> bool {
        self.is_column_hint() || !self.is_hidden()
    }

    /// Whether a click on this cell can do anything at all.
    pub const fn is_interactable(&self) -> bool {
        self.is_column_hint() || self.is_hidden() || !matches!(self.precision(), Precision::None)
    }

    pub(crate) fn reveal(&mut self) {
        match &mut self.kind {
            CellKind::Empty { hidden, .. } | CellKind::Full { hidden, .. } => *hidden = false,
            CellKind::ColumnHint { .. } => {}
        }
    }
}

/// A missing slot counts as resolved.
pub fn is_column_hint_or_uncovered(cell: Option<&Cell>) -> bool {
    cell.is_none_or(Cell::is_resolved)
}
