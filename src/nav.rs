//! Rover state and the operations a command symbol can map to.

use glam::I64Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass heading of a rover.
///
/// Headings form a cycle `N -> E -> S -> W -> N`. Turning right walks the
/// cycle forwards, turning left walks it backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    N,
    E,
    S,
    W,
}

impl Heading {
    /// Headings in clockwise order, starting at north.
    pub const CYCLE: [Heading; 4] = [Heading::N, Heading::E, Heading::S, Heading::W];

    fn index(self) -> usize {
        match self {
            Self::N => 0,
            Self::E => 1,
            Self::S => 2,
            Self::W => 3,
        }
    }

    /// The heading after a 90 degree turn to the left.
    pub fn rotate_left(self) -> Self {
        let len = Self::CYCLE.len();
        Self::CYCLE[(self.index() + len - 1) % len]
    }

    /// The heading after a 90 degree turn to the right.
    pub fn rotate_right(self) -> Self {
        Self::CYCLE[(self.index() + 1) % Self::CYCLE.len()]
    }

    /// Unit grid vector for one step along this heading (north is `+y`).
    pub fn step(self) -> I64Vec2 {
        match self {
            Self::N => I64Vec2::Y,
            Self::E => I64Vec2::X,
            Self::S => I64Vec2::NEG_Y,
            Self::W => I64Vec2::NEG_X,
        }
    }

    /// Parses the single-letter protocol form (`N`, `E`, `S`, `W`).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'N' => Some(Self::N),
            'E' => Some(Self::E),
            'S' => Some(Self::S),
            'W' => Some(Self::W),
            _ => None,
        }
    }

    /// The single-letter protocol form, the inverse of [`from_symbol`](Self::from_symbol).
    pub fn symbol(self) -> char {
        match self {
            Self::N => 'N',
            Self::E => 'E',
            Self::S => 'S',
            Self::W => 'W',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position and heading of a rover on the grid.
///
/// Coordinates are signed and wider than the grid's `i32` bounds: a
/// simulated rover may wander below zero or past the largest grid edge,
/// and it is up to the squad validator to decide whether that is acceptable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoverState {
    pub position: I64Vec2,
    pub heading: Heading,
}

impl RoverState {
    /// Creates a rover standing on `(x, y)` facing `heading`.
    pub fn new(x: i64, y: i64, heading: Heading) -> Self {
        Self {
            position: I64Vec2::new(x, y),
            heading,
        }
    }

    /// Rotates 90 degrees to the left without moving.
    pub fn turn_left(&mut self) {
        self.heading = self.heading.rotate_left();
    }

    /// Rotates 90 degrees to the right without moving.
    pub fn turn_right(&mut self) {
        self.heading = self.heading.rotate_right();
    }

    /// Moves `distance` cells along the current heading and returns the new position.
    ///
    /// Saturates at the `i64` limits, which lie far outside any grid, so a
    /// runaway rover is reported as leaving the grid rather than wrapping.
    pub fn advance(&mut self, distance: i32) -> I64Vec2 {
        let offset = self
            .heading
            .step()
            .saturating_mul(I64Vec2::splat(i64::from(distance)));
        self.position = self.position.saturating_add(offset);
        self.position
    }
}

/// Renders the reply form `"x y H"`.
impl fmt::Display for RoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.position.x, self.position.y, self.heading)
    }
}

/// Operations a rover can be commanded to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoverOp {
    /// Move forward one step along the current heading (`M`).
    Move,
    /// Rotate 90 degrees to the left in place (`L`).
    TurnLeft,
    /// Rotate 90 degrees to the right in place (`R`).
    TurnRight,
    /// No-op, the symbol has no registered meaning.
    Ignore,
}
