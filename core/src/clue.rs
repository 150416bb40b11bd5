use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Label a cell displays about the full cells it covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clue {
    /// Uncovered empty cell that tells nothing.
    Unknown,
    Count(u8),
    /// The full cells form a single unbroken run.
    Contiguous(u8),
    /// The full cells are split into several runs.
    Scattered(u8),
}

impl Clue {
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::Count(n) | Self::Contiguous(n) | Self::Scattered(n) => Some(n),
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("?"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Contiguous(n) => write!(f, "{{{n}}}"),
            Self::Scattered(n) => write!(f, "-{n}-"),
        }
    }
}

/// What the cell at `coords` displays, `None` when it displays nothing.
pub fn clue_at(level: &Level, coords: Coord2) -> Option<Clue> {
    let cell = level.cell_at(coords)?;
    if cell.is_hidden() {
        return None;
    }

    match cell.kind() {
        CellKind::Empty { precision, .. } => {
            let ring = level.immediate_neighbours(coords).map(is_full);
            match precision {
                Precision::None => Some(Clue::Unknown),
                Precision::Number => Some(Clue::Count(count(&ring))),
                Precision::Precise => Some(precise(&ring, runs_cyclic(&ring))),
            }
        }
        CellKind::Full { precision, .. } => match precision {
            FullPrecision::None => None,
            FullPrecision::Number => {
                let area = level.distant_neighbours(coords).map(is_full);
                Some(Clue::Count(count(&area)))
            }
        },
        CellKind::ColumnHint { precision, angle } => {
            let line: alloc::vec::Vec<bool> = level.in_column(coords, angle).map(is_full).collect();
            match precision {
                ColumnPrecision::Number => Some(Clue::Count(count(&line))),
                ColumnPrecision::Precise => Some(precise(&line, runs_linear(&line))),
            }
        }
    }
}

fn is_full(cell: Option<&Cell>) -> bool {
    cell.is_some_and(Cell::is_full)
}

fn count(slots: &[bool]) -> u8 {
    // at most a full column of a 255-tall board
    slots.iter().filter(|&&full| full).count().min(u8::MAX.into()) as u8
}

/// No full cell at all counts as a single, empty run.
fn precise(slots: &[bool], runs: usize) -> Clue {
    match count(slots) {
        n if runs <= 1 => Clue::Contiguous(n),
        n => Clue::Scattered(n),
    }
}

fn runs_linear(slots: &[bool]) -> usize {
    let starts = slots.windows(2).filter(|pair| !pair[0] && pair[1]).count();
    starts + usize::from(slots.first().copied().unwrap_or(false))
}

/// Runs around a closed ring, where the last slot touches the first.
fn runs_cyclic(slots: &[bool]) -> usize {
    if slots.iter().all(|&full| full) {
        return 1;
    }
    (0..slots.len())
        .filter(|&i| slots[i] && !slots[(i + slots.len() - 1) % slots.len()])
        .count()
}
