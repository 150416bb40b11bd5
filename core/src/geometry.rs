//! Neighbour relations over an offset-column hex grid.
//!
//! Odd columns sit half a row lower than even ones. Internally positions are
//! handled in "doubled" form `(x, v)` with `v = 2y + (x & 1)`, which turns
//! every hex step into a fixed delta regardless of column parity.

use core::cell::RefCell;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::*;

/// Slots along a column ray, in walk order.
pub type ColumnRay = SmallVec<[Option<Coord2>; 16]>;

/// Clockwise from straight up: N, NE, SE, S, SW, NW.
const RING_STEPS: [(i32, i32); 6] = [(0, -2), (1, -1), (1, 1), (0, 2), (-1, 1), (-1, -1)];

/// Doubled offsets of the outer ring, clockwise from two steps straight up.
const OUTER_RING: [(i32, i32); 12] = [
    (0, -4),
    (1, -3),
    (2, -2),
    (2, 0),
    (2, 2),
    (1, 3),
    (0, 4),
    (-1, 3),
    (-2, 2),
    (-2, 0),
    (-2, -2),
    (-1, -3),
];

const fn column_step(angle: Angle) -> (i32, i32) {
    match angle {
        Angle::Down => (0, 2),
        Angle::DownLeft => (-1, 1),
        Angle::UpLeft => (-1, -1),
        Angle::Up => (0, -2),
        Angle::UpRight => (1, -1),
        Angle::DownRight => (1, 1),
    }
}

const fn doubled((x, y): Coord2) -> (i32, i32) {
    let x = x as i32;
    (x, 2 * y as i32 + (x & 1))
}

fn undoubled(x: i32, v: i32, size: Coord2) -> Option<Coord2> {
    // v and x always share parity, so the division is exact
    from_signed(x, (v - (x & 1)).div_euclid(2), size)
}

fn offset(coords: Coord2, (dx, dv): (i32, i32), size: Coord2) -> Option<Coord2> {
    let (x, v) = doubled(coords);
    undoubled(x + dx, v + dv, size)
}

/// The 6 touching cells, clockwise from the one directly above.
pub fn immediate_neighbours(coords: Coord2, size: Coord2) -> [Option<Coord2>; 6] {
    RING_STEPS.map(|step| offset(coords, step, size))
}

/// The 18 cells within two hex steps: the inner ring followed by the outer ring,
/// each clockwise from straight up.
pub fn distant_neighbours(coords: Coord2, size: Coord2) -> [Option<Coord2>; 18] {
    let mut neighbours = [None; 18];
    for (slot, step) in neighbours.iter_mut().zip(RING_STEPS.iter().chain(OUTER_RING.iter())) {
        *slot = offset(coords, *step, size);
    }
    neighbours
}

/// Walks a straight ray from `coords` (exclusive) in direction `angle`.
///
/// The walk stops once the position has left the closed box spanning the
/// board, so a ray ends with the off-board slots it stepped onto.
pub fn in_column(coords: Coord2, angle: Angle, size: Coord2) -> ColumnRay {
    let (dx, dv) = column_step(angle);
    let (mut x, mut v) = doubled(coords);
    let (width, height) = (i32::from(size.0), i32::from(size.1));

    let mut ray = ColumnRay::new();
    loop {
        x += dx;
        v += dv;
        ray.push(undoubled(x, v, size));
        if x < 0 || x > width || v < 0 || v > 2 * height {
            return ray;
        }
    }
}

/// Memoized neighbour lookups for a single board geometry.
///
/// Owned by one [`Level`], whose dimensions never change, so entries never
/// need invalidating. A fresh cache is always equivalent to a warm one.
#[derive(Clone, Debug, Default)]
pub(crate) struct GeometryCache {
    immediate: RefCell<HashMap<Coord2, [Option<Coord2>; 6]>>,
    distant: RefCell<HashMap<Coord2, [Option<Coord2>; 18]>>,
    columns: RefCell<HashMap<(Coord2, Angle), ColumnRay>>,
}

impl GeometryCache {
    pub fn immediate(&self, coords: Coord2, size: Coord2) -> [Option<Coord2>; 6] {
        *self
            .immediate
            .borrow_mut()
            .entry(coords)
            .or_insert_with(|| immediate_neighbours(coords, size))
    }

    pub fn distant(&self, coords: Coord2, size: Coord2) -> [Option<Coord2>; 18] {
        *self
            .distant
            .borrow_mut()
            .entry(coords)
            .or_insert_with(|| distant_neighbours(coords, size))
    }

    pub fn column(&self, coords: Coord2, angle: Angle, size: Coord2) -> ColumnRay {
        self.columns
            .borrow_mut()
            .entry((coords, angle))
            .or_insert_with(|| in_column(coords, angle, size))
            .clone()
    }
}

impl PartialEq for GeometryCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn immediate_neighbours_of_even_column() {
        let neighbours = immediate_neighbours((2, 2), (5, 5));
        assert_eq!(
            neighbours,
            [
                Some((2, 1)),
                Some((3, 1)),
                Some((3, 2)),
                Some((2, 3)),
                Some((1, 2)),
                Some((1, 1)),
            ]
        );
    }

    #[test]
    fn immediate_neighbours_of_odd_column() {
        let neighbours = immediate_neighbours((1, 1), (5, 5));
        assert_eq!(
            neighbours,
            [
                Some((1, 0)),
                Some((2, 1)),
                Some((2, 2)),
                Some((1, 2)),
                Some((0, 2)),
                Some((0, 1)),
            ]
        );
    }

    #[test]
    fn neighbour_lists_keep_fixed_length_at_corners() {
        let immediate = immediate_neighbours((0, 0), (5, 5));
        assert_eq!(immediate.len(), 6);
        assert_eq!(immediate.iter().flatten().count(), 2);

        let distant = distant_neighbours((0, 0), (5, 5));
        assert_eq!(distant.len(), 18);
        assert!(distant.iter().flatten().all(|&(x, y)| x < 5 && y < 5));
    }

    #[test]
    fn distant_neighbours_match_offset_table() {
        // Even column: rows shift up on the diagonals.
        let distant: Vec<_> = distant_neighbours((4, 4), (9, 9)).into_iter().flatten().collect();
        assert_eq!(distant.len(), 18);
        for expected in [(2, 3), (2, 4), (2, 5), (3, 2), (3, 5), (4, 2), (4, 6), (5, 2), (5, 5)] {
            assert!(distant.contains(&expected), "missing {expected:?}");
        }
        assert!(!distant.contains(&(4, 4)));
        assert!(!distant.contains(&(3, 6)));

        // Odd column: rows shift down on the diagonals.
        let distant: Vec<_> = distant_neighbours((3, 4), (9, 9)).into_iter().flatten().collect();
        for expected in [(2, 3), (2, 6), (4, 3), (4, 6), (1, 3), (1, 5), (3, 2), (3, 6)] {
            assert!(distant.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn in_column_walks_down_past_the_edge() {
        let ray = in_column((4, 2), Angle::Down, (5, 5));
        assert_eq!(ray.as_slice(), &[Some((4, 3)), Some((4, 4)), None, None]);
    }

    #[test]
    fn in_column_diagonals_alternate_rows() {
        let ray = in_column((0, 0), Angle::DownRight, (4, 4));
        assert_eq!(&ray[..4], &[Some((1, 0)), Some((2, 1)), Some((3, 1)), None]);
        assert!(ray.iter().skip(3).all(Option::is_none));

        let ray = in_column((3, 3), Angle::UpLeft, (4, 4));
        assert_eq!(&ray[..3], &[Some((2, 3)), Some((1, 2)), Some((0, 2))]);
    }

    #[test]
    fn in_column_opposite_rays_pass_through_each_other() {
        let size = (7, 7);
        for angle in Angle::ALL {
            for hit in in_column((3, 3), angle, size).into_iter().flatten() {
                let back = in_column(hit, angle.opposite(), size);
                assert!(back.contains(&Some((3, 3))), "{angle:?} from {hit:?}");
            }
        }
    }

    #[test]
    fn cache_matches_uncached_lookups() {
        let cache = GeometryCache::default();
        let size = (6, 4);
        for _ in 0..2 {
            assert_eq!(cache.immediate((3, 1), size), immediate_neighbours((3, 1), size));
            assert_eq!(cache.distant((3, 1), size), distant_neighbours((3, 1), size));
            assert_eq!(
                cache.column((3, 1), Angle::UpRight, size),
                in_column((3, 1), Angle::UpRight, size)
            );
        }
    }
}
