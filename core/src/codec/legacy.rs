use alloc::string::String;
use alloc::vec::Vec;

use ndarray::Array2;

use super::*;

pub const LEGACY_HEADER: &str = "Hexcells level v1";

/// Header lines before the grid: version, title, author and two flavor lines.
const HEADER_LINES: usize = 5;

/// Parses the multi-line legacy format.
///
/// The grid stores every hex as two characters on a board of text twice as
/// tall as the hex board: column `x` of hex row `y` sits on text line
/// `2y + x % 2`, and the slots in between are `..` padding. Legacy files pad
/// the board to a fixed size, so empty border rows and columns are trimmed.
///
/// Error positions count characters of the grid, line after line.
pub fn parse_legacy(text: &str) -> Result<Level> {
    let mut lines = text.lines();
    if lines.next().map(str::trim_end) != Some(LEGACY_HEADER) {
        return Err(LevelError::FormatUnrecognized);
    }

    let title = lines
        .next()
        .filter(|title| !title.trim().is_empty())
        .ok_or(LevelError::MissingField(Field::Title))?;
    let author = lines.next().ok_or(LevelError::MissingField(Field::Author))?;
    let flavor_lines = [
        lines.next().ok_or(LevelError::MissingField(Field::Flavor))?,
        lines.next().ok_or(LevelError::MissingField(Field::Flavor))?,
    ];

    let mut grid: Vec<Vec<char>> = lines.map(|line| line.chars().collect()).collect();
    while grid.last().is_some_and(|line| line.iter().all(|c| c.is_whitespace())) {
        grid.pop();
    }
    let kinds = decode_grid(&grid)?;
    let kinds = trim_columns(kinds)
        .and_then(trim_rows)
        .ok_or(LevelError::MissingField(Field::CellData))?;

    let info = LevelInfo {
        title: title.trim().into(),
        author: author.trim().into(),
        flavor: join_flavor(flavor_lines[0], flavor_lines[1]),
    };
    Level::from_kinds(info, kinds)
}

/// Reconstructs hex rows from the interleaved text lines.
fn decode_grid(grid: &[Vec<char>]) -> Result<Array2<Option<CellKind>>> {
    let first = grid.first().ok_or(LevelError::MissingField(Field::CellData))?;
    let line_width = first.len() + first.len() % 2;
    if line_width == 0 {
        return Err(LevelError::MissingField(Field::CellData));
    }

    let width = line_width / 2;
    let height = grid.len().div_ceil(2);
    let mut kinds: Array2<Option<CellKind>> = Array2::default((width, height));

    for (line, chars) in grid.iter().enumerate() {
        if chars.len() != line_width {
            return Err(DimensionError::RaggedLine {
                line: HEADER_LINES + line + 1,
                expected: line_width,
                found: chars.len(),
            }
            .into());
        }

        for (x, pair) in chars.chunks_exact(2).enumerate() {
            let position = line * line_width + x * 2;
            if line % 2 != x % 2 {
                if pair != ['.', '.'] {
                    return Err(LevelError::Misaligned {
                        line: HEADER_LINES + line + 1,
                        column: x * 2 + 1,
                    });
                }
                continue;
            }

            let y = line / 2;
            kinds[(x, y)] = decode_cell(pair[0], pair[1], position, (x, y))?;
        }
    }

    Ok(kinds)
}

fn decode_precision(glyph: char, position: usize) -> Result<Precision> {
    match glyph {
        '.' => Ok(Precision::None),
        '+' => Ok(Precision::Number),
        'c' | 'n' => Ok(Precision::Precise),
        token => Err(LevelError::UnknownToken { token, position }),
    }
}

fn decode_cell(
    kind: char,
    precision: char,
    position: usize,
    (x, y): (usize, usize),
) -> Result<Option<CellKind>> {
    // only used for log messages, the final position is known after trimming
    let coords = (x as Coord, y as Coord);
    let cell = match kind {
        '.' => return Ok(None),
        'o' | 'O' => CellKind::empty(kind == 'o', decode_precision(precision, position + 1)?),
        'x' | 'X' => {
            let precision = decode_precision(precision, position + 1)?;
            CellKind::full(kind == 'x', full_precision(precision, coords))
        }
        glyph => match angle_from_glyph(glyph) {
            Some(angle) => {
                let precision = decode_precision(precision, position + 1)?;
                CellKind::column_hint(column_precision(precision, coords), angle)
            }
            None => return Err(LevelError::UnknownToken { token: kind, position }),
        },
    };
    Ok(Some(cell))
}

/// Drops empty border columns, `None` if no column holds a cell.
///
/// Dropping an odd number of leading columns flips every column's parity;
/// moving the new even columns down one row keeps all adjacencies intact.
fn trim_columns(kinds: Array2<Option<CellKind>>) -> Option<Array2<Option<CellKind>>> {
    let (width, height) = kinds.dim();
    let occupied = |x: usize| (0..height).any(|y| kinds[(x, y)].is_some());
    let first = (0..width).find(|&x| occupied(x))?;
    let last = (0..width).rev().find(|&x| occupied(x))?;

    let shift = first % 2;
    let trimmed = Array2::from_shape_fn((last - first + 1, height + shift), |(x, y)| {
        let y = if shift == 1 && x % 2 == 0 {
            y.checked_sub(1)?
        } else {
            y
        };
        kinds.get((x + first, y)).copied().flatten()
    });
    if shift == 1 {
        log::debug!("Trimmed an odd number of leading columns, shifting board half a row");
    }
    Some(trimmed)
}

/// Drops empty border rows, `None` if no row holds a cell.
fn trim_rows(kinds: Array2<Option<CellKind>>) -> Option<Array2<Option<CellKind>>> {
    let (width, height) = kinds.dim();
    let occupied = |y: usize| (0..width).any(|x| kinds[(x, y)].is_some());
    let first = (0..height).find(|&y| occupied(y))?;
    let last = (0..height).rev().find(|&y| occupied(y))?;

    Some(Array2::from_shape_fn((width, last - first + 1), |(x, y)| {
        kinds[(x, y + first)]
    }))
}

/// Joins the two flavor lines, skipping blank ones.
fn join_flavor(first: &str, second: &str) -> Option<String> {
    match (first.trim(), second.trim()) {
        ("", "") => None,
        (line, "") | ("", line) => Some(line.into()),
        (first, second) => Some(alloc::format!("{first}\n{second}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(grid: &[&str]) -> String {
        let mut text = String::from("Hexcells level v1\nLegacy\nSomeone\nFirst line\n\n");
        for line in grid {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn decodes_interleaved_rows() {
        // Columns 0 and 2 live on even lines, column 1 on odd lines.
        let text = legacy(&["o+..X.", "..x+..", "|.../c", "..O...", "......"]);
        let level = parse_legacy(&text).unwrap();

        assert_eq!(level.title(), "Legacy");
        assert_eq!(level.author(), "Someone");
        assert_eq!(level.flavor(), Some("First line"));
        assert_eq!(level.size(), (3, 2));
        assert_eq!(
            level.cell_at((0, 0)).map(Cell::kind),
            Some(CellKind::empty(true, Precision::Number))
        );
        assert_eq!(
            level.cell_at((2, 0)).map(Cell::kind),
            Some(CellKind::full(false, FullPrecision::None))
        );
        assert_eq!(
            level.cell_at((1, 0)).map(Cell::kind),
            Some(CellKind::full(true, FullPrecision::Number))
        );
        assert_eq!(
            level.cell_at((0, 1)).map(Cell::kind),
            Some(CellKind::column_hint(ColumnPrecision::Number, Angle::Down))
        );
        assert_eq!(
            level.cell_at((2, 1)).map(Cell::kind),
            Some(CellKind::column_hint(ColumnPrecision::Precise, Angle::DownLeft))
        );
        assert_eq!(
            level.cell_at((1, 1)).map(Cell::kind),
            Some(CellKind::empty(false, Precision::None))
        );
    }

    #[test]
    fn trims_padding_rows_and_columns() {
        let text = legacy(&[
            "..........",
            "..........",
            "....o.....",
            "..........",
            "....x+....",
            "..........",
        ]);
        let level = parse_legacy(&text).unwrap();

        assert_eq!(level.size(), (1, 2));
        assert!(level.cell_at((0, 0)).is_some_and(|cell| !cell.is_full()));
        assert!(level.cell_at((0, 1)).is_some_and(Cell::is_full));
    }

    #[test]
    fn odd_leading_trim_keeps_adjacency() {
        // Column 1 at rows 0 and 1, column 2 at row 1; (1,1) and (2,1) touch.
        let text = legacy(&["......", "..o...", "....x.", "..o...", "......"]);
        let level = parse_legacy(&text).unwrap();

        // Former column 1 is now column 0, moved down a row before the
        // empty top row was trimmed again.
        assert_eq!(level.size(), (2, 2));
        assert!(level.cell_at((0, 0)).is_some_and(|cell| !cell.is_full()));
        assert!(level.cell_at((0, 1)).is_some_and(|cell| !cell.is_full()));
        assert!(level.cell_at((1, 0)).is_some_and(Cell::is_full));
        assert!(level.cell_at((1, 1)).is_none());

        let touching = level.immediate_neighbours((1, 0));
        assert!(touching.iter().flatten().any(|cell| cell.coords() == (0, 0)));
        assert!(touching.iter().flatten().any(|cell| cell.coords() == (0, 1)));
    }

    #[test]
    fn rejects_cells_on_padding_slots() {
        let text = legacy(&["..o.", "...."]);
        assert_eq!(
            parse_legacy(&text),
            Err(LevelError::Misaligned { line: 6, column: 3 })
        );
    }

    #[test]
    fn rejects_ragged_lines_and_unknown_tokens() {
        assert_eq!(
            parse_legacy(&legacy(&["o+..", "..."])),
            Err(LevelError::InvalidDimension(DimensionError::RaggedLine {
                line: 7,
                expected: 4,
                found: 3
            }))
        );
        assert_eq!(
            parse_legacy(&legacy(&["o?.."])),
            Err(LevelError::UnknownToken {
                token: '?',
                position: 1
            })
        );
        assert_eq!(
            parse_legacy(&legacy(&["k+.."])),
            Err(LevelError::UnknownToken {
                token: 'k',
                position: 0
            })
        );
    }

    #[test]
    fn rejects_missing_header_lines_and_empty_boards() {
        assert_eq!(
            parse_legacy("Hexcells level v1\nTitle\nAuthor\n"),
            Err(LevelError::MissingField(Field::Flavor))
        );
        assert_eq!(
            parse_legacy(&legacy(&["....", "...."])),
            Err(LevelError::MissingField(Field::CellData))
        );
        assert_eq!(
            parse_legacy(&legacy(&[])),
            Err(LevelError::MissingField(Field::CellData))
        );
    }

    #[test]
    fn flavor_lines_join() {
        assert_eq!(join_flavor("  ", ""), None);
        assert_eq!(join_flavor("a", "b").as_deref(), Some("a\nb"));
        assert_eq!(join_flavor("", "b").as_deref(), Some("b"));
    }
}
