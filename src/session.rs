//! Single-rover sessions: one landing line, one command line, one reply.

use crate::error::MessageError;
use crate::nav::RoverState;
use crate::protocol::parse_rover_message;
use crate::simulator::{MotionSimulator, NavConfig};
use tracing::{debug, warn};

/// Drives a single rover without any knowledge of the rest of the squad.
#[derive(Clone, Debug, Default)]
pub struct RoverSession {
    simulator: MotionSimulator,
}

impl RoverSession {
    pub fn new(config: NavConfig) -> Self {
        Self {
            simulator: MotionSimulator::standard(config),
        }
    }

    /// Parses a two-line rover message and returns the rover's final state.
    pub fn deploy(&self, message: &str) -> Result<RoverState, MessageError> {
        let spec = parse_rover_message(message)?;
        let motion = self.simulator.simulate(spec.start, &spec.commands);
        debug!(start = %spec.start, end = %motion.final_state, "rover session complete");
        Ok(motion.final_state)
    }

    /// Replies with `"x y H"`, or an `ERROR:` line when the message is invalid.
    pub fn read_message(&self, message: &str) -> String {
        match self.deploy(message) {
            Ok(state) => state.to_string(),
            Err(err) => {
                warn!(error = %err, "rejected rover message");
                format!("ERROR: Command is invalid: {err}")
            }
        }
    }
}
