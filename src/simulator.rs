//! Motion simulator that turns a command string into a rover path.
//!
//! The entry point is [`MotionSimulator`]. Configure it with a [`NavConfig`],
//! register symbol-to-operation mappings via [`MotionSimulator::set_op`] or
//! [`MotionSimulator::populate_standard_symbols`], then call
//! [`MotionSimulator::simulate`] with a start state and a command string.

use crate::nav::{Heading, RoverOp, RoverState};
use glam::I64Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for motion simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Grid cells covered by a single move command.
    pub step_length: i32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { step_length: 1 }
    }
}

/// The outcome of simulating one command string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionPlan {
    pub start: RoverState,
    pub final_state: RoverState,
    /// Position reached after each move, in execution order.
    /// Rotations do not contribute waypoints.
    pub waypoints: Vec<I64Vec2>,
}

/// Interprets command strings against a start state.
#[derive(Clone, Debug)]
pub struct MotionSimulator {
    op_map: HashMap<char, RoverOp>,
    config: NavConfig,
}

impl Default for MotionSimulator {
    fn default() -> Self {
        Self::standard(NavConfig::default())
    }
}

impl MotionSimulator {
    /// Creates a new simulator with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`simulate`](Self::simulate).
    pub fn new(config: NavConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates a simulator with the standard `L`, `R`, `M` symbols registered.
    pub fn standard(config: NavConfig) -> Self {
        let mut simulator = Self::new(config);
        simulator.populate_standard_symbols();
        simulator
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, RoverOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`RoverOp`] to a command symbol.
    pub fn set_op(&mut self, symbol: char, op: RoverOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the protocol's command symbols.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('L', RoverOp::TurnLeft),
            ('R', RoverOp::TurnRight),
            ('M', RoverOp::Move),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Returns the operation registered for `symbol`, or [`RoverOp::Ignore`].
    pub fn op_for(&self, symbol: char) -> RoverOp {
        self.op_map.get(&symbol).copied().unwrap_or(RoverOp::Ignore)
    }

    /// Runs `commands` left to right from `start` and returns the resulting plan.
    ///
    /// No bounds checking happens here: the rover may end up at negative
    /// coordinates or beyond any grid. Symbols with no registered mapping
    /// are skipped; rejecting them is the caller's responsibility.
    pub fn simulate(&self, start: RoverState, commands: &str) -> MotionPlan {
        let mut rover = start;
        let mut waypoints = Vec::new();

        for symbol in commands.chars() {
            match self.op_for(symbol) {
                RoverOp::Move => waypoints.push(rover.advance(self.config.step_length)),
                RoverOp::TurnLeft => rover.turn_left(),
                RoverOp::TurnRight => rover.turn_right(),
                RoverOp::Ignore => {}
            }
        }

        MotionPlan {
            start,
            final_state: rover,
            waypoints,
        }
    }
}

/// Simulates `commands` from `(x, y, heading)` with the standard symbols and unit steps.
pub fn simulate(x: i64, y: i64, heading: Heading, commands: &str) -> MotionPlan {
    MotionSimulator::default().simulate(RoverState::new(x, y, heading), commands)
}
