use webcells_core::*;

/// Characters each hex column takes on a text line.
const COLUMN_WIDTH: usize = 4;

/// Draws the board on doubled text rows: column `x` of hex row `y` lands on
/// line `2y + x % 2`, so odd columns sit half a row lower.
pub fn render(level: &Level, labels: bool) -> String {
    let (width, height) = level.size();
    let lines = usize::from(height) * 2 + 1;
    let mut grid = vec![vec![' '; usize::from(width) * COLUMN_WIDTH]; lines];

    for cell in level.iter_cells() {
        let (x, y) = cell.coords();
        let line = usize::from(y) * 2 + usize::from(x % 2);
        let start = usize::from(x) * COLUMN_WIDTH;
        for (offset, c) in glyph(level, cell, labels).chars().take(COLUMN_WIDTH - 1).enumerate() {
            grid[line][start + offset] = c;
        }
    }

    let mut out = String::new();
    for line in grid {
        let line: String = line.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Three characters describing one cell.
fn glyph(level: &Level, cell: &Cell, labels: bool) -> String {
    if cell.is_hidden() {
        return " . ".into();
    }

    let label = labels
        .then(|| clue_at(level, cell.coords()))
        .flatten()
        .filter(|_| cell.hint() != HintLevel::Hidden)
        .map(|clue| clue.to_string());

    match (cell.kind(), label) {
        (CellKind::ColumnHint { angle, .. }, Some(clue)) => format!("{}{clue:<2}", angle.glyph()),
        (CellKind::ColumnHint { angle, .. }, None) => format!(" {} ", angle.glyph()),
        (_, Some(clue)) => format!("{clue:^3}"),
        (CellKind::Full { .. }, None) => " X ".into(),
        (CellKind::Empty { .. }, None) => " o ".into(),
    }
}
