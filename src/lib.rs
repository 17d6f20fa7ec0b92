//! # rover-squad
//!
//! Motion simulation and pre-flight validation for squads of rovers
//! exploring a rectangular grid.
//!
//! A squad message names the grid size and, for each rover, a landing
//! position and a command string. The [`SquadCoordinator`] simulates every
//! rover with the [`MotionSimulator`], then checks the resulting paths for
//! landing conflicts, grid excursions and collisions before reporting any
//! final position. A single bad rover rejects the whole squad.

pub mod error;
pub mod nav;
pub mod plan;
pub mod protocol;
pub mod session;
pub mod simulator;
pub mod squad;
pub mod telemetry;

pub use error::*;
pub use nav::*;
pub use plan::*;
pub use protocol::*;
pub use session::*;
pub use simulator::*;
pub use squad::*;
pub use telemetry::init_tracing;
