use alloc::string::String;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryCache;
use crate::*;

/// Descriptive text attached to a level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub title: String,
    pub author: String,
    pub flavor: Option<String>,
}

impl LevelInfo {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            flavor: None,
        }
    }

    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }
}

/// A board of hex cells indexed `[x, y]`, plus the player's counters.
///
/// Slots are fixed at construction: a `None` slot never gains a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr")]
pub struct Level {
    info: LevelInfo,
    cells: Array2<Option<Cell>>,
    mistakes: u32,
    moves: u32,
    #[serde(skip)]
    geometry: GeometryCache,
}

impl Level {
    /// Builds a level from cell kinds, stamping every cell with its own slot.
    pub fn from_kinds(info: LevelInfo, kinds: Array2<Option<CellKind>>) -> Result<Self> {
        let (width, height) = kinds.dim();
        check_dimension(Field::Width, width)?;
        check_dimension(Field::Height, height)?;

        let cells = Array2::from_shape_fn((width, height), |(x, y)| {
            // both axes were checked to fit a Coord above
            kinds[(x, y)].map(|kind| Cell::new((x as Coord, y as Coord), kind))
        });

        Ok(Self {
            info,
            cells,
            mistakes: 0,
            moves: 0,
            geometry: GeometryCache::default(),
        })
    }

    pub fn info(&self) -> &LevelInfo {
        &self.info
    }

    pub fn set_info(&mut self, info: LevelInfo) {
        self.info = info;
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    pub fn author(&self) -> &str {
        &self.info.author
    }

    pub fn flavor(&self) -> Option<&str> {
        self.info.flavor.as_deref()
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        // guaranteed by from_kinds
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn set_mistakes(&mut self, mistakes: u32) {
        self.mistakes = mistakes;
    }

    pub(crate) fn record_move(&mut self, mistake: bool) {
        self.moves = self.moves.saturating_add(1);
        if mistake {
            self.mistakes = self.mistakes.saturating_add(1);
        }
    }

    /// The cell at `coords`, `None` for gaps and off-board positions.
    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        in_bounds(coords, self.size()).and_then(|coords| self.cells[coords.to_nd_index()].as_ref())
    }

    pub(crate) fn cell_at_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        in_bounds(coords, self.size())
            .and_then(|coords| self.cells[coords.to_nd_index()].as_mut())
    }

    /// All populated cells, column by column.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn immediate_neighbours(&self, coords: Coord2) -> [Option<&Cell>; 6] {
        self.geometry
            .immediate(coords, self.size())
            .map(|pos| pos.and_then(|pos| self.cell_at(pos)))
    }

    pub fn distant_neighbours(&self, coords: Coord2) -> [Option<&Cell>; 18] {
        self.geometry
            .distant(coords, self.size())
            .map(|pos| pos.and_then(|pos| self.cell_at(pos)))
    }

    pub fn in_column(&self, coords: Coord2, angle: Angle) -> impl Iterator<Item = Option<&Cell>> {
        self.geometry
            .column(coords, angle, self.size())
            .into_iter()
            .map(|pos| pos.and_then(|pos| self.cell_at(pos)))
    }

    /// Slots a cell's own clue is computed from.
    pub(crate) fn dependencies(&self, cell: &Cell) -> ColumnRay {
        let (coords, size) = (cell.coords(), self.size());
        match cell.kind() {
            CellKind::Empty { .. } => self.geometry.immediate(coords, size).into_iter().collect(),
            CellKind::Full { .. } => self.geometry.distant(coords, size).into_iter().collect(),
            CellKind::ColumnHint { angle, .. } => self.geometry.column(coords, angle, size),
        }
    }

    /// Slots whose clue may cover `coords`: every cell within two steps plus
    /// every ray through it.
    pub(crate) fn dependents(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        let distant = self.geometry.distant(coords, size);
        let rays: alloc::vec::Vec<_> = Angle::ALL
            .into_iter()
            .flat_map(|angle| self.geometry.column(coords, angle, size))
            .collect();
        distant.into_iter().chain(rays).flatten()
    }

    /// Whether every slot `cell`'s clue depends on has been resolved.
    pub fn is_clue_resolved(&self, cell: &Cell) -> bool {
        self.dependencies(cell)
            .into_iter()
            .all(|pos| is_column_hint_or_uncovered(pos.and_then(|pos| self.cell_at(pos))))
    }

    /// Hides every clue that has nothing left to tell.
    pub fn collapse_resolved_hints(&mut self) {
        let resolved: alloc::vec::Vec<Coord2> = self
            .iter_cells()
            .filter(|cell| self.is_clue_resolved(cell))
            .map(Cell::coords)
            .collect();

        for coords in resolved {
            if let Some(cell) = self.cell_at_mut(coords) {
                cell.set_hint(HintLevel::Hidden);
            }
        }
    }

    /// Full cells the player still has to find.
    pub fn remaining_full_count(&self) -> usize {
        self.iter_cells()
            .filter(|cell| cell.is_full() && cell.is_hidden())
            .count()
    }

    /// True once no Empty or Full cell remains hidden.
    pub fn is_finished(&self) -> bool {
        !self.iter_cells().any(Cell::is_hidden)
    }
}

/// True once no Empty or Full cell in `level` remains hidden.
pub fn is_finished(level: &Level) -> bool {
    level.is_finished()
}

/// Deserialized shape of a [`Level`], checked before it becomes one.
#[derive(Deserialize)]
struct LevelRepr {
    info: LevelInfo,
    cells: Array2<Option<Cell>>,
    mistakes: u32,
    moves: u32,
}

impl TryFrom<LevelRepr> for Level {
    type Error = LevelError;

    fn try_from(repr: LevelRepr) -> Result<Self> {
        let (width, height) = repr.cells.dim();
        check_dimension(Field::Width, width)?;
        check_dimension(Field::Height, height)?;

        for ((x, y), cell) in repr.cells.indexed_iter() {
            let slot = (x as Coord, y as Coord);
            if let Some(cell) = cell.as_ref().filter(|cell| cell.coords() != slot) {
                return Err(LevelError::DisplacedCell {
                    slot,
                    found: cell.coords(),
                });
            }
        }

        Ok(Self {
            info: repr.info,
            cells: repr.cells,
            mistakes: repr.mistakes,
            moves: repr.moves,
            geometry: GeometryCache::default(),
        })
    }
}

fn check_dimension(field: Field, value: usize) -> Result<()> {
    if value == 0 || value > usize::from(Coord::MAX) {
        Err(DimensionError::OutOfRange { field, value }.into())
    } else {
        Ok(())
    }
}
