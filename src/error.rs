//! Error taxonomy for squad messages.
//!
//! [`MessageError`] covers structural problems found while parsing; these
//! stop processing before any rover is simulated. [`Violation`] covers
//! problems found while validating the simulated plans; these are collected
//! across the whole squad so that one response reports all of them.

use crate::plan::{Grid, RoverId};
use glam::I64Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A message that does not follow the line protocol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message is empty")]
    Empty,

    #[error("line {line}: expected grid size `<x> <y>`, got {text:?}")]
    InvalidGrid { line: usize, text: String },

    #[error("line {line}: expected landing `<x> <y> <N|E|S|W>`, got {text:?}")]
    InvalidLanding { line: usize, text: String },

    #[error("line {line}: expected commands over `L`, `R`, `M`, got {text:?}")]
    InvalidCommands { line: usize, text: String },

    #[error("line {line}: coordinate {value:?} is out of range")]
    CoordinateOverflow { line: usize, value: String },

    #[error("rover commands incomplete: {lines} line(s) after the grid size")]
    IncompleteRover { lines: usize },

    #[error("message names no rovers")]
    NoRovers,

    #[error("expected 2 lines for a single rover, got {lines}")]
    RoverLineCount { lines: usize },
}

/// Kind tag for a [`Violation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    LandingOutOfGrid,
    LandingConflict,
    PathOutOfGrid,
    Collision,
}

impl ViolationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::LandingOutOfGrid => "LandingOutOfGrid",
            Self::LandingConflict => "LandingConflict",
            Self::PathOutOfGrid => "PathOutOfGrid",
            Self::Collision => "Collision",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A problem with a rover's planned deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Violation {
    #[error(
        "LandingOutOfGrid: Rover [{rover}]: coordinates [x: {}, y: {}] are outside the grid {grid} boundaries.",
        .position.x,
        .position.y
    )]
    LandingOutOfGrid {
        rover: RoverId,
        position: I64Vec2,
        grid: Grid,
    },

    #[error(
        "LandingConflict: Rover [{rover}]: another rover [ID: {other}] is to be deployed at [x: {}, y: {}] coordinates.",
        .position.x,
        .position.y
    )]
    LandingConflict {
        rover: RoverId,
        other: RoverId,
        position: I64Vec2,
    },

    #[error(
        "PathOutOfGrid: Rover [{rover}]: with given commands would navigate outside the grid {grid} at [x: {}, y: {}].",
        .waypoint.x,
        .waypoint.y
    )]
    PathOutOfGrid {
        rover: RoverId,
        waypoint: I64Vec2,
        grid: Grid,
    },

    #[error(
        "Collision: Rover [{rover}]: with given commands would collide with other rover(s) [ID: {}].",
        join_ids(.others)
    )]
    Collision { rover: RoverId, others: Vec<RoverId> },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::LandingOutOfGrid { .. } => ViolationKind::LandingOutOfGrid,
            Self::LandingConflict { .. } => ViolationKind::LandingConflict,
            Self::PathOutOfGrid { .. } => ViolationKind::PathOutOfGrid,
            Self::Collision { .. } => ViolationKind::Collision,
        }
    }

    /// The rover the violation was raised against.
    pub fn rover(&self) -> RoverId {
        match self {
            Self::LandingOutOfGrid { rover, .. }
            | Self::LandingConflict { rover, .. }
            | Self::PathOutOfGrid { rover, .. }
            | Self::Collision { rover, .. } => *rover,
        }
    }
}

fn join_ids(ids: &[RoverId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
