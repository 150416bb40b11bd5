use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use ndarray::Array2;

use super::*;

pub const CANONICAL_HEADER: &str = "Webcells level v1";

/// Parses `Webcells level v1:<mistakes>:<title>:<author>:<flavor>:<width>:<height>:<cells>`.
///
/// Cells are two characters each, row by row. Error positions index into the
/// cell data.
pub fn parse_canonical(text: &str) -> Result<Level> {
    let mut fields = text.trim().splitn(8, ':');
    if fields.next() != Some(CANONICAL_HEADER) {
        return Err(LevelError::FormatUnrecognized);
    }

    let mistakes = parse_mistakes(fields.next().unwrap_or_default())?;
    let title = fields
        .next()
        .filter(|title| !title.is_empty())
        .ok_or(LevelError::MissingField(Field::Title))?;
    let author = fields.next().unwrap_or_default();
    let flavor = fields.next().filter(|flavor| !flavor.is_empty());
    let width = parse_dimension(fields.next(), Field::Width)?;
    let height = parse_dimension(fields.next(), Field::Height)?;
    let data: Vec<char> = fields
        .next()
        .filter(|data| !data.is_empty())
        .ok_or(LevelError::MissingField(Field::CellData))?
        .chars()
        .collect();

    let expected = usize::from(width) * usize::from(height) * 2;
    if data.len() != expected {
        return Err(DimensionError::DataLength {
            expected,
            found: data.len(),
        }
        .into());
    }

    let mut kinds: Array2<Option<CellKind>> =
        Array2::default((usize::from(width), usize::from(height)));
    for (index, token) in data.chunks_exact(2).enumerate() {
        let coords = (
            (index % usize::from(width)) as Coord,
            (index / usize::from(width)) as Coord,
        );
        kinds[coords.to_nd_index()] = decode_cell(token[0], token[1], index * 2, coords)?;
    }

    let info = LevelInfo {
        title: title.into(),
        author: author.into(),
        flavor: flavor.map(Into::into),
    };
    let mut level = Level::from_kinds(info, kinds)?;
    level.set_mistakes(mistakes);
    Ok(level)
}

/// Writes `level` in the canonical format.
///
/// Hints and the move counter are not part of the format.
pub fn serialize(level: &Level) -> Result<String> {
    if level.title().is_empty() {
        return Err(LevelError::MissingField(Field::Title));
    }
    for (field, value) in [
        (Field::Title, level.title()),
        (Field::Author, level.author()),
        (Field::Flavor, level.flavor().unwrap_or_default()),
    ] {
        if value.contains(':') {
            return Err(LevelError::ReservedCharacter(field));
        }
    }

    let (width, height) = level.size();
    let mut out = format!(
        "{CANONICAL_HEADER}:{}:{}:{}:{}:{}:{}:",
        level.mistakes(),
        level.title(),
        level.author(),
        level.flavor().unwrap_or_default(),
        width,
        height,
    );
    out.reserve(usize::from(width) * usize::from(height) * 2);

    for y in 0..height {
        for x in 0..width {
            let (kind, precision) = encode_cell(level.cell_at((x, y)));
            out.push(kind);
            out.push(precision);
        }
    }

    Ok(out)
}

fn parse_mistakes(field: &str) -> Result<u32> {
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().map_err(|_| {
        DimensionError::NotANumber {
            field: Field::Mistakes,
            value: field.into(),
        }
        .into()
    })
}

fn parse_dimension(field: Option<&str>, name: Field) -> Result<Coord> {
    let field = field
        .filter(|field| !field.is_empty())
        .ok_or(LevelError::MissingField(name))?;
    let value: usize = field.parse().map_err(|_| DimensionError::NotANumber {
        field: name,
        value: field.into(),
    })?;
    match Coord::try_from(value) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DimensionError::OutOfRange { field: name, value }.into()),
    }
}

fn decode_precision(glyph: char, position: usize) -> Result<Precision> {
    match glyph {
        'x' => Ok(Precision::None),
        'n' => Ok(Precision::Number),
        'p' => Ok(Precision::Precise),
        token => Err(LevelError::UnknownToken { token, position }),
    }
}

fn decode_cell(
    kind: char,
    precision: char,
    position: usize,
    coords: Coord2,
) -> Result<Option<CellKind>> {
    let cell = match kind {
        'x' => return Ok(None),
        'e' | 'E' => CellKind::empty(kind == 'e', decode_precision(precision, position + 1)?),
        'f' | 'F' => {
            let precision = decode_precision(precision, position + 1)?;
            CellKind::full(kind == 'f', full_precision(precision, coords))
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

fn encode_precision(precision: Precision) -> char {
    match precision {
        Precision::None => 'x',
        Precision::Number => 'n',
        Precision::Precise => 'p',
    }
}

fn encode_cell(cell: Option<&Cell>) -> (char, char) {
    let Some(cell) = cell else {
        return ('x', 'x');
    };
    let kind = match cell.kind() {
        CellKind::Empty { hidden: true, .. } => 'e',
        CellKind::Empty { hidden: false, .. } => 'E',
        CellKind::Full { hidden: true, .. } => 'f',
        CellKind::Full { hidden: false, .. } => 'F',
        CellKind::ColumnHint { angle, .. } => {
            if angle_from_glyph(angle.glyph()) != Some(angle) {
                log::warn!(
                    "Column hint at {:?} points {angle:?}, written along the same axis",
                    cell.coords()
                );
            }
            angle.glyph()
        }
    };
    (kind, encode_precision(cell.precision()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "Webcells level v1:2:Tiny:Me:Some flavor:2:2:fxEp|nxx";

    #[test]
    fn parses_header_and_row_major_cells() {
        let level = parse_canonical(TINY).unwrap();

        assert_eq!(level.mistakes(), 2);
        assert_eq!(level.title(), "Tiny");
        assert_eq!(level.author(), "Me");
        assert_eq!(level.flavor(), Some("Some flavor"));
        assert_eq!(level.size(), (2, 2));

        assert_eq!(
            level.cell_at((0, 0)).map(Cell::kind),
            Some(CellKind::full(true, FullPrecision::None))
        );
        assert_eq!(
            level.cell_at((1, 0)).map(Cell::kind),
            Some(CellKind::empty(false, Precision::Precise))
        );
        assert_eq!(
            level.cell_at((0, 1)).map(Cell::kind),
            Some(CellKind::column_hint(ColumnPrecision::Number, Angle::Down))
        );
        assert_eq!(level.cell_at((1, 1)), None);
    }

    #[test]
    fn serialize_reproduces_input() {
        let level = parse_canonical(TINY).unwrap();
        assert_eq!(serialize(&level).unwrap(), TINY);
    }

    #[test]
    fn empty_flavor_and_mistakes_are_optional() {
        let level = parse_canonical("Webcells level v1::Tiny:::1:1:en").unwrap();
        assert_eq!(level.mistakes(), 0);
        assert_eq!(level.flavor(), None);
        assert_eq!(
            serialize(&level).unwrap(),
            "Webcells level v1:0:Tiny:::1:1:en"
        );
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            parse_canonical("Webcells level v1:0::Me::1:1:en"),
            Err(LevelError::MissingField(Field::Title))
        );
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::1"),
            Err(LevelError::MissingField(Field::Height))
        );
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::1:1:"),
            Err(LevelError::MissingField(Field::CellData))
        );
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::one:1:en"),
            Err(LevelError::InvalidDimension(DimensionError::NotANumber {
                field: Field::Width,
                value: "one".into()
            }))
        );
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::0:1:en"),
            Err(LevelError::InvalidDimension(DimensionError::OutOfRange {
                field: Field::Width,
                value: 0
            }))
        );
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::2:1:en"),
            Err(LevelError::InvalidDimension(DimensionError::DataLength {
                expected: 4,
                found: 2
            }))
        );
    }

    #[test]
    fn rejects_unknown_tokens_with_position() {
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::2:1:enqn"),
            Err(LevelError::UnknownToken {
                token: 'q',
                position: 2
            })
        );
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::2:1:enez"),
            Err(LevelError::UnknownToken {
                token: 'z',
                position: 3
            })
        );
    }

    #[test]
    fn only_lowercase_x_marks_a_gap() {
        assert_eq!(
            parse_canonical("Webcells level v1:0:Tiny:Me::2:1:enXx"),
            Err(LevelError::UnknownToken {
                token: 'X',
                position: 2
            })
        );
    }

    #[test]
    fn rejects_wrong_header() {
        assert_eq!(
            parse_canonical("Webcells level v2:0:Tiny:Me::1:1:en"),
            Err(LevelError::FormatUnrecognized)
        );
    }

    #[test]
    fn narrows_out_of_range_precisions() {
        let level = parse_canonical("Webcells level v1:0:Tiny:Me::2:1:fp/x").unwrap();
        assert_eq!(
            level.cell_at((0, 0)).map(Cell::kind),
            Some(CellKind::full(true, FullPrecision::Number))
        );
        assert_eq!(
            level.cell_at((1, 0)).map(Cell::kind),
            Some(CellKind::column_hint(ColumnPrecision::Number, Angle::DownLeft))
        );
    }

    #[test]
    fn serialize_rejects_delimiter_in_text() {
        let mut level = parse_canonical(TINY).unwrap();
        level.set_info(LevelInfo::new("A:B", "Me"));
        assert_eq!(
            serialize(&level),
            Err(LevelError::ReservedCharacter(Field::Title))
        );
    }

    #[test]
    fn upward_angles_are_written_on_their_axis() {
        let kinds = Array2::from_shape_fn((3, 1), |(x, _)| {
            Some(CellKind::column_hint(
                ColumnPrecision::Precise,
                [Angle::Up, Angle::UpRight, Angle::UpLeft][x],
            ))
        });
        let level = Level::from_kinds(LevelInfo::new("Axes", "Me"), kinds).unwrap();

        assert_eq!(
            serialize(&level).unwrap(),
            "Webcells level v1:0:Axes:Me::3:1:|p/p\\p"
        );
    }
}
