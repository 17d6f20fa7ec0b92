//! Squad coordinator: plans every rover, then validates the squad before
//! any rover is allowed to move.
//!
//! Deployment is sequential. Rover `k` explores only after rovers
//! `0..k` have finished, while rovers `k+1..` are still parked on their
//! landing sites. A path is therefore checked against the final cells of
//! earlier rovers and the landing cells of later ones.

use crate::error::{MessageError, Violation};
use crate::nav::RoverState;
use crate::plan::{Grid, RoverPlan, SquadPlan};
use crate::protocol::{SquadMessage, parse_squad_message};
use crate::simulator::{MotionSimulator, NavConfig};
use glam::I64Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// How waypoints are tested against the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathBounds {
    /// Each axis is checked against its own bound.
    #[default]
    Grid,
    /// The y coordinate is checked against `max_x`. Matches fixtures
    /// produced by older deployments of the squad manager.
    LegacyXAxis,
}

impl PathBounds {
    fn contains(self, grid: &Grid, waypoint: I64Vec2) -> bool {
        match self {
            Self::Grid => grid.contains(waypoint),
            Self::LegacyXAxis => Grid::new(grid.max_x, grid.max_x).contains(waypoint),
        }
    }
}

/// Configuration for squad coordination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadConfig {
    pub nav: NavConfig,
    pub path_bounds: PathBounds,
}

/// Outcome of a squad deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadReport {
    /// Every rover passed validation; final states in input order.
    Deployed(Vec<RoverState>),
    /// At least one rover failed validation; no rover moves.
    Rejected(Vec<Violation>),
}

impl SquadReport {
    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed(_))
    }
}

impl fmt::Display for SquadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deployed(states) => {
                let lines: Vec<String> = states.iter().map(RoverState::to_string).collect();
                f.write_str(&lines.join("\n"))
            }
            Self::Rejected(violations) => {
                f.write_str("ERROR:")?;
                for violation in violations {
                    write!(f, "\n{violation}")?;
                }
                Ok(())
            }
        }
    }
}

/// Plans and validates squad deployments.
///
/// Holds configuration only; every call works on its own inputs and
/// shares nothing with other calls.
#[derive(Clone, Debug, Default)]
pub struct SquadCoordinator {
    simulator: MotionSimulator,
    config: SquadConfig,
}

impl SquadCoordinator {
    pub fn new(config: SquadConfig) -> Self {
        Self {
            simulator: MotionSimulator::standard(config.nav.clone()),
            config,
        }
    }

    /// Simulates every rover in input order.
    ///
    /// All plans are complete before this returns; validation works on the
    /// result and never re-simulates.
    pub fn plan(&self, message: &SquadMessage) -> SquadPlan {
        let mut plan = SquadPlan::new(message.grid);

        for (idx, spec) in message.rovers.iter().enumerate() {
            let motion = self.simulator.simulate(spec.start, &spec.commands);
            debug!(
                rover = idx,
                start = %spec.start,
                end = %motion.final_state,
                moves = motion.waypoints.len(),
                "simulated rover"
            );

            plan.add_rover(RoverPlan {
                id: idx,
                deployment_order: idx,
                start: spec.start,
                commands: spec.commands.clone(),
                waypoints: motion.waypoints,
                final_state: motion.final_state,
            });
        }

        plan
    }

    /// Checks every rover against the grid and against the rest of the squad.
    ///
    /// Violations are collected for all rovers rather than stopping at the
    /// first one. A rover that lands outside the grid gets no further checks.
    pub fn validate(&self, plan: &SquadPlan) -> Vec<Violation> {
        let grid = plan.grid;
        let mut violations = Vec::new();

        for rover in &plan.rovers {
            if !grid.landing_within(rover.start.position) {
                violations.push(Violation::LandingOutOfGrid {
                    rover: rover.id,
                    position: rover.start.position,
                    grid,
                });
                continue;
            }

            if let Some(other) = plan
                .rovers
                .iter()
                .find(|other| other.id != rover.id && other.start.position == rover.start.position)
            {
                violations.push(Violation::LandingConflict {
                    rover: rover.id,
                    other: other.id,
                    position: rover.start.position,
                });
            }

            if let Some(&waypoint) = rover
                .waypoints
                .iter()
                .find(|&&waypoint| !self.config.path_bounds.contains(&grid, waypoint))
            {
                violations.push(Violation::PathOutOfGrid {
                    rover: rover.id,
                    waypoint,
                    grid,
                });
            }

            // Rovers sharing our landing site were reported as a conflict above.
            let others: Vec<_> = plan
                .rovers
                .iter()
                .filter(|other| other.start.position != rover.start.position)
                .filter(|other| {
                    other
                        .resting_cell_for(rover)
                        .is_some_and(|cell| rover.passes_through(cell))
                })
                .map(|other| other.id)
                .collect();
            if !others.is_empty() {
                violations.push(Violation::Collision {
                    rover: rover.id,
                    others,
                });
            }
        }

        for violation in &violations {
            warn!(rover = violation.rover(), kind = %violation.kind(), "{violation}");
        }

        violations
    }

    /// Parses, plans and validates a squad message.
    pub fn deploy(&self, message: &str) -> Result<SquadReport, MessageError> {
        let message = parse_squad_message(message)?;
        let plan = self.plan(&message);
        Ok(self.report(&plan))
    }

    /// Validates an already computed plan and builds the report.
    pub fn report(&self, plan: &SquadPlan) -> SquadReport {
        let violations = self.validate(plan);
        if violations.is_empty() {
            info!(rovers = plan.rovers.len(), grid = %plan.grid, "squad deployment confirmed");
            SquadReport::Deployed(plan.final_states())
        } else {
            SquadReport::Rejected(violations)
        }
    }

    /// Processes a squad message into the protocol reply.
    ///
    /// Returns one `"x y H"` line per rover on success, or an `ERROR:`
    /// reply listing every problem found.
    pub fn process(&self, message: &str) -> String {
        match self.deploy(message) {
            Ok(report) => report.to_string(),
            Err(err) => {
                warn!(error = %err, "rejected malformed squad message");
                format!("ERROR: {err}")
            }
        }
    }
}

/// Processes a squad message with the default configuration.
pub fn process(message: &str) -> String {
    SquadCoordinator::default().process(message)
}
