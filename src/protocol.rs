//! Line protocol for squad and single-rover messages.
//!
//! ```text
//! <maxX> <maxY>
//! <startX> <startY> <HEADING>
//! <commandString>
//! [<startX> <startY> <HEADING>
//! <commandString>]...
//! ```
//!
//! Messages are cleaned with [`clean_message`] before parsing: every line is
//! trimmed and blank lines are dropped, so line numbers in
//! [`MessageError`] count non-blank lines starting at 1.

use crate::error::MessageError;
use crate::nav::{Heading, RoverState};
use crate::plan::Grid;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Patterns are fixed literals, so compiling them cannot fail at runtime.
static GRID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s+([0-9]+)$").expect("grid line pattern is valid"));

static LANDING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\s+([0-9]+)\s+([NESW])$").expect("landing line pattern is valid")
});

static COMMAND_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[LRM]+$").expect("command line pattern is valid"));

/// Landing state and commands for one rover, as read from a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverSpec {
    pub start: RoverState,
    pub commands: String,
}

/// A parsed squad message: the grid followed by rovers in deployment order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadMessage {
    pub grid: Grid,
    pub rovers: Vec<RoverSpec>,
}

/// Trims every line and drops blank lines.
pub fn clean_message(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a full squad message.
///
/// The whole message is checked before anything is returned, so a caller
/// never sees a partially parsed squad.
pub fn parse_squad_message(message: &str) -> Result<SquadMessage, MessageError> {
    let cleaned = clean_message(message);
    let lines: Vec<&str> = cleaned.lines().collect();

    let (grid_line, rover_lines) = lines.split_first().ok_or(MessageError::Empty)?;
    let grid = parse_grid(1, grid_line)?;

    if rover_lines.is_empty() {
        return Err(MessageError::NoRovers);
    }
    if rover_lines.len() % 2 != 0 {
        return Err(MessageError::IncompleteRover {
            lines: rover_lines.len(),
        });
    }

    let rovers = rover_lines
        .chunks_exact(2)
        .enumerate()
        .map(|(idx, pair)| parse_rover_lines(2 + idx * 2, pair[0], pair[1]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SquadMessage { grid, rovers })
}

/// Parses a two-line single-rover message.
pub fn parse_rover_message(message: &str) -> Result<RoverSpec, MessageError> {
    let cleaned = clean_message(message);
    let lines: Vec<&str> = cleaned.lines().collect();

    match lines.as_slice() {
        [landing, commands] => parse_rover_lines(1, landing, commands),
        _ => Err(MessageError::RoverLineCount { lines: lines.len() }),
    }
}

fn parse_grid(line: usize, text: &str) -> Result<Grid, MessageError> {
    let caps = GRID_LINE
        .captures(text)
        .ok_or_else(|| MessageError::InvalidGrid {
            line,
            text: text.to_string(),
        })?;

    Ok(Grid::new(
        parse_coordinate(line, &caps[1])?,
        parse_coordinate(line, &caps[2])?,
    ))
}

/// `line` is the number of the landing line; commands follow on the next one.
fn parse_rover_lines(
    line: usize,
    landing: &str,
    commands: &str,
) -> Result<RoverSpec, MessageError> {
    let caps = LANDING_LINE
        .captures(landing)
        .ok_or_else(|| MessageError::InvalidLanding {
            line,
            text: landing.to_string(),
        })?;

    let x = parse_coordinate(line, &caps[1])?;
    let y = parse_coordinate(line, &caps[2])?;
    let heading = caps[3]
        .chars()
        .next()
        .and_then(Heading::from_symbol)
        .ok_or_else(|| MessageError::InvalidLanding {
            line,
            text: landing.to_string(),
        })?;

    if !COMMAND_LINE.is_match(commands) {
        return Err(MessageError::InvalidCommands {
            line: line + 1,
            text: commands.to_string(),
        });
    }

    Ok(RoverSpec {
        start: RoverState::new(i64::from(x), i64::from(y), heading),
        commands: commands.to_string(),
    })
}

fn parse_coordinate(line: usize, digits: &str) -> Result<i32, MessageError> {
    digits
        .parse()
        .map_err(|_| MessageError::CoordinateOverflow {
            line,
            value: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_trims_lines_and_drops_blanks() {
        let cleaned = clean_message("  5 5   \n\n  1 2 N \nLMLMLMLMM   \n");
        assert_eq!(cleaned, "5 5\n1 2 N\nLMLMLMLMM");
    }

    #[test]
    fn parses_two_rover_message() {
        let msg = parse_squad_message("5 5\n1 2 N\nLMLMLMLMM\n3 3 E\nMMRMMRMRRM").unwrap();
        assert_eq!(msg.grid, Grid::new(5, 5));
        assert_eq!(msg.rovers.len(), 2);
        assert_eq!(msg.rovers[0].start, RoverState::new(1, 2, Heading::N));
        assert_eq!(msg.rovers[1].commands, "MMRMMRMRRM");
    }

    #[test]
    fn rejects_non_numeric_grid() {
        let err = parse_squad_message("5 A\n1 2 N\nM").unwrap_err();
        assert!(matches!(err, MessageError::InvalidGrid { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_grid_line() {
        let err = parse_squad_message("\n0 0 E\nMRMLMLMMM").unwrap_err();
        assert!(matches!(err, MessageError::InvalidGrid { line: 1, .. }));
    }

    #[test]
    fn rejects_odd_rover_lines() {
        let err = parse_squad_message("5 5\n1 2 N\nM\n3 3 E").unwrap_err();
        assert_eq!(err, MessageError::IncompleteRover { lines: 3 });
    }

    #[test]
    fn rejects_unknown_command_token() {
        let err = parse_squad_message("5 5\n1 2 N\nLMB").unwrap_err();
        assert!(matches!(err, MessageError::InvalidCommands { line: 3, .. }));
    }

    #[test]
    fn rejects_negative_and_oversized_coordinates() {
        let err = parse_rover_message("-1 0 N\nM").unwrap_err();
        assert!(matches!(err, MessageError::InvalidLanding { .. }));

        let err = parse_squad_message("5 5\n99999999999 0 N\nM").unwrap_err();
        assert!(matches!(err, MessageError::CoordinateOverflow { line: 2, .. }));
    }

    #[test]
    fn single_rover_requires_two_lines() {
        let err = parse_rover_message("0 0 N").unwrap_err();
        assert_eq!(err, MessageError::RoverLineCount { lines: 1 });
    }
}
