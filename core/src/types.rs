/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Two-dimensional board coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Returns `coords` only when they fall inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> Option<Coord2> {
    if coords.0 < size.0 && coords.1 < size.1 {
        Some(coords)
    } else {
        None
    }
}

/// Converts signed coordinates back into board coordinates, `None` when off-board.
pub(crate) fn from_signed(x: i32, y: i32, size: Coord2) -> Option<Coord2> {
    let x = Coord::try_from(x).ok()?;
    let y = Coord::try_from(y).ok()?;
    in_bounds((x, y), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_signed_rejects_negative_and_oversized() {
        assert_eq!(from_signed(-1, 0, (3, 3)), None);
        assert_eq!(from_signed(0, 3, (3, 3)), None);
        assert_eq!(from_signed(300, 0, (3, 3)), None);
        assert_eq!(from_signed(2, 1, (3, 3)), Some((2, 1)));
    }
}
