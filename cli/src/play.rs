use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use webcells_core::*;

use crate::board::render;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Interact(InteractionKind, Coord2),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let kind = match words.next() {
        Some("p" | "primary") => InteractionKind::Primary,
        Some("s" | "secondary") => InteractionKind::Secondary,
        Some("show") => return Ok(Command::Show),
        Some("q" | "quit") => return Ok(Command::Quit),
        None => bail!("empty command"),
        Some(other) => bail!("unknown command {other:?}, expected p, s, show or quit"),
    };
    let mut coord = |axis: &str| -> Result<Coord> {
        words
            .next()
            .with_context(|| format!("missing {axis} coordinate"))?
            .parse()
            .with_context(|| format!("invalid {axis} coordinate"))
    };
    let x = coord("x")?;
    let y = coord("y")?;
    Ok(Command::Interact(kind, (x, y)))
}

/// Runs an interactive session until the board is solved or input ends.
pub fn play(level: &mut Level, input: impl BufRead, mut output: impl Write) -> Result<()> {
    writeln!(output, "{}", render(level, true))?;
    writeln!(output, "p X Y claims full, s X Y claims empty")?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }
        let (kind, coords) = match parse_command(&line) {
            Ok(Command::Interact(kind, coords)) => (kind, coords),
            Ok(Command::Show) => {
                writeln!(output, "{}", render(level, true))?;
                continue;
            }
            Ok(Command::Quit) => break,
            Err(err) => {
                writeln!(output, "{err:#}")?;
                continue;
            }
        };

        let pending = interact(level, coords, kind);
        let result = pending.result();
        match result {
            InteractionResult::Correct => writeln!(output, "correct")?,
            InteractionResult::Incorrect => {
                writeln!(output, "wrong, mistakes: {}", pending.level().mistakes() + 1)?
            }
            InteractionResult::Nothing => {}
        }
        pending.apply();
        log::debug!("{result:?} at {coords:?}, moves: {}", level.moves());

        if result.has_update() {
            writeln!(output, "{}", render(level, true))?;
        }
        if is_finished(level) {
            writeln!(
                output,
                "Solved in {} moves with {} mistakes",
                level.moves(),
                level.mistakes()
            )?;
            return Ok(());
        }
    }

    writeln!(output, "{} full cells left", level.remaining_full_count())?;
    Ok(())
}
