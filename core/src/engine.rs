use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which gesture the player made. `Primary` always asserts "this cell is full".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Primary,
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionResult {
    Nothing,
    Correct,
    Incorrect,
}

impl InteractionResult {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Nothing => false,
            Self::Correct | Self::Incorrect => true,
        }
    }
}

/// Mutation decided by [`interact`], carried out by [`PendingInteraction::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Effect {
    NoOp,
    SetHint(HintLevel),
    Reveal,
    Mistake,
}

/// An interaction whose verdict is known but whose effect is not committed yet.
///
/// Lets a front-end play feedback before the board changes. Dropping it
/// without calling [`apply`](Self::apply) leaves the level untouched.
#[must_use = "the level only changes once the interaction is applied"]
#[derive(Debug)]
pub struct PendingInteraction<'a> {
    level: &'a mut Level,
    coords: Coord2,
    result: InteractionResult,
    effect: Effect,
}

impl PendingInteraction<'_> {
    pub fn result(&self) -> InteractionResult {
        self.result
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    /// The level as it was before this interaction.
    pub fn level(&self) -> &Level {
        self.level
    }

    pub fn apply(self) -> InteractionResult {
        let Self {
            level,
            coords,
            result,
            effect,
        } = self;

        match effect {
            Effect::NoOp => {}
            Effect::SetHint(hint) => {
                if let Some(cell) = level.cell_at_mut(coords) {
                    cell.set_hint(hint);
                }
            }
            Effect::Reveal => {
                if let Some(cell) = level.cell_at_mut(coords) {
                    cell.reveal();
                }
                level.record_move(false);
                hide_neighbours_hints(level, coords);
            }
            Effect::Mistake => level.record_move(true),
        }

        result
    }
}

/// Judges a gesture on `coords` without touching the level yet.
///
/// Gaps and off-board positions yield [`InteractionResult::Nothing`].
pub fn interact(
    level: &mut Level,
    coords: Coord2,
    kind: InteractionKind,
) -> PendingInteraction<'_> {
    use InteractionKind::*;
    use InteractionResult::*;

    let (result, effect) = match level.cell_at(coords) {
        None => (Nothing, Effect::NoOp),
        Some(cell) if cell.is_resolved() => match kind {
            Primary => {
                let hint = match cell.hint() {
                    HintLevel::Shown => HintLevel::None,
                    HintLevel::None | HintLevel::Hidden => HintLevel::Shown,
                };
                (Nothing, Effect::SetHint(hint))
            }
            Secondary => (Nothing, Effect::SetHint(HintLevel::Hidden)),
        },
        Some(cell) => match (cell.kind(), kind) {
            (CellKind::Empty { .. }, Secondary) | (CellKind::Full { .. }, Primary) => {
                (Correct, Effect::Reveal)
            }
            (CellKind::Empty { .. }, Primary) | (CellKind::Full { .. }, Secondary) => {
                (Incorrect, Effect::Mistake)
            }
            (CellKind::ColumnHint { .. }, _) => (Nothing, Effect::NoOp),
        },
    };

    log::debug!("interact {kind:?} at {coords:?}: {result:?}");

    PendingInteraction {
        level,
        coords,
        result,
        effect,
    }
}

/// Hides the hint of every clue covering `coords` that has become fully resolved.
///
/// Only cells whose clue can see `coords` directly are rechecked, the check
/// does not spread further.
fn hide_neighbours_hints(level: &mut Level, coords: Coord2) {
    let to_check: BTreeSet<Coord2> = level.dependents(coords).collect();

    let to_hide: BTreeSet<Coord2> = to_check
        .into_iter()
        .filter_map(|pos| level.cell_at(pos))
        .filter(|cell| cell.hint() != HintLevel::Hidden)
        .filter(|cell| level.is_clue_resolved(cell))
        .map(Cell::coords)
        .collect();

    log::debug!("reveal at {coords:?} hides {} hints", to_hide.len());

    for pos in to_hide {
        if let Some(cell) = level.cell_at_mut(pos) {
            cell.set_hint(HintLevel::Hidden);
        }
    }
}

impl Level {
    /// Shorthand for [`interact`] followed by an immediate apply.
    pub fn interact(&mut self, coords: Coord2, kind: InteractionKind) -> InteractionResult {
        interact(self, coords, kind).apply()
    }
}
