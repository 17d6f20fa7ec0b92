use crate::nav::RoverState;
use glam::I64Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a rover in the order it appears in the squad message.
pub type RoverId = usize;

/// The rectangular region rovers may explore, from `(0, 0)` to `(max_x, max_y)` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub max_x: i32,
    pub max_y: i32,
}

impl Grid {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }

    /// Whether `position` lies inside the grid on both axes.
    pub fn contains(&self, position: I64Vec2) -> bool {
        (0..=i64::from(self.max_x)).contains(&position.x)
            && (0..=i64::from(self.max_y)).contains(&position.y)
    }

    /// Upper-bound check applied to landing sites.
    ///
    /// Landing coordinates come from a grammar that only admits digits, so
    /// they are never negative and the lower bound is not tested.
    pub fn landing_within(&self, position: I64Vec2) -> bool {
        position.x <= i64::from(self.max_x) && position.y <= i64::from(self.max_y)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.max_x, self.max_y)
    }
}

/// The computed plan for a single rover.
///
/// Built once per message and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverPlan {
    pub id: RoverId,

    /// Position in the deployment sequence. Rovers with a lower order have
    /// finished exploring before this one moves; rovers with a higher order
    /// are still parked at their landing site.
    pub deployment_order: usize,

    /// Landing position and heading.
    pub start: RoverState,

    /// Raw command string as received.
    pub commands: String,

    /// Cell reached after each move, in execution order.
    pub waypoints: Vec<I64Vec2>,

    pub final_state: RoverState,
}

impl RoverPlan {
    /// Cell this rover occupies while `other` is exploring.
    ///
    /// Rovers deployed before `other` have come to rest at their final
    /// position; rovers deployed after it have not left their landing site.
    /// Returns `None` for `other` itself.
    pub fn resting_cell_for(&self, other: &RoverPlan) -> Option<I64Vec2> {
        use std::cmp::Ordering;

        match self.deployment_order.cmp(&other.deployment_order) {
            Ordering::Less => Some(self.final_state.position),
            Ordering::Greater => Some(self.start.position),
            Ordering::Equal => None,
        }
    }

    /// Whether any waypoint lands on `cell`.
    pub fn passes_through(&self, cell: I64Vec2) -> bool {
        self.waypoints.contains(&cell)
    }
}

/// All rover plans for one squad message, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadPlan {
    pub grid: Grid,
    pub rovers: Vec<RoverPlan>,
}

impl SquadPlan {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            rovers: Vec::new(),
        }
    }

    /// Appends a rover plan. Plans must be added in deployment order.
    pub fn add_rover(&mut self, rover: RoverPlan) {
        debug_assert_eq!(rover.deployment_order, self.rovers.len());
        self.rovers.push(rover);
    }

    pub fn rover(&self, id: RoverId) -> Option<&RoverPlan> {
        self.rovers.iter().find(|rover| rover.id == id)
    }

    /// Final states in input order.
    pub fn final_states(&self) -> Vec<RoverState> {
        self.rovers.iter().map(|rover| rover.final_state).collect()
    }
}
