//! Inverse kinematics for a 4-link planar arm driven by a commanded distal
//! (end-effector) angle.

mod constants;
mod types;
mod error;
mod config;
mod chain;
mod ccd;
mod search;
mod session;
mod transport;
mod controller;

pub use controller::{sweep_commands, Controller};
pub use types::{clamp, wrap_to_signed_range, Joint, JointAngles, JointLimit};
pub use error::{ConfigError, Error, InvalidInputKind, KinematicsError, TransportError};
pub use config::{ArmConfig, SolverConfig};
pub use chain::{direction, ChainPoints, PlanarChain};
pub use ccd::{WristSolution, WristSolver};
pub use search::{candidate_distances, ray_direction, DistalSolver, SolveOutcome};
pub use session::{IkSession, SharedSolver};
pub use transport::{ChannelSink, JointSink, JointStream, RecordingSink};

// Re-export commonly used items
pub use constants::{LINK_COUNT, WRIST_TOLERANCE, CCD_ITERATIONS, SCAN_CANDIDATES, MAX_SWEEP_COMMANDS};
