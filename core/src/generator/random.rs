use core::ops::Range;

use ndarray::Array2;

use super::*;

/// Fills every slot independently at random, with no guarantee the result is
/// solvable. Mostly useful for exercising a front-end.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLevelGenerator {
    info: LevelInfo,
    width: Range<Coord>,
    height: Range<Coord>,
}

impl RandomLevelGenerator {
    pub fn new(info: LevelInfo, width: Range<Coord>, height: Range<Coord>) -> Self {
        Self {
            info,
            width,
            height,
        }
    }
}

impl Default for RandomLevelGenerator {
    fn default() -> Self {
        Self::new(
            LevelInfo::new("Test", "DrFill").with_flavor("This is a test\nover two lines"),
            10..15,
            10..15,
        )
    }
}

impl LevelGenerator for RandomLevelGenerator {
    fn generate<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Result<Level> {
        use rand::prelude::*;

        let width = pick_dimension(rng, &self.width);
        let height = pick_dimension(rng, &self.height);

        let kinds = Array2::from_shape_simple_fn((usize::from(width), usize::from(height)), || {
            let roll: f64 = rng.random();
            let hidden = rng.random_bool(0.5);
            if roll < 0.2 {
                let precision = if rng.random_bool(0.5) {
                    FullPrecision::None
                } else {
                    FullPrecision::Number
                };
                Some(CellKind::full(hidden, precision))
            } else if roll < 0.3 {
                let precision = if rng.random_bool(0.5) {
                    ColumnPrecision::Precise
                } else {
                    ColumnPrecision::Number
                };
                let angle = Angle::ALL[rng.random_range(0..Angle::ALL.len())];
                Some(CellKind::column_hint(precision, angle))
            } else if roll < 0.8 {
                let precision = [Precision::None, Precision::Number, Precision::Precise]
                    [rng.random_range(0..3)];
                Some(CellKind::empty(hidden, precision))
            } else {
                None
            }
        });

        let mut level = Level::from_kinds(self.info.clone(), kinds)?;
        level.collapse_resolved_hints();

        log::debug!(
            "Generated {}x{} level with {} full cells",
            width,
            height,
            level.remaining_full_count()
        );
        Ok(level)
    }
}

fn pick_dimension<R: rand::Rng + ?Sized>(rng: &mut R, range: &Range<Coord>) -> Coord {
    use rand::prelude::*;

    if range.start >= range.end {
        log::warn!("Empty dimension range {range:?}, using its start");
        return range.start.max(1);
    }
    rng.random_range(range.clone()).max(1)
}
