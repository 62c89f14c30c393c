//! Cyclic coordinate descent on the shoulder and elbow joints.
//!
//! Places the endpoint of the first three links (the wrist) onto a target.
//! The base stays at 0 and the distal joint is left to the caller. The solver
//! always returns its best attempt together with the remaining distance, so
//! feasibility is judged by the caller.

use nalgebra::Point2;

use crate::chain::PlanarChain;
use crate::config::SolverConfig;
use crate::constants::MIN_BEARING_LENGTH;
use crate::types::{wrap_to_signed_range, Joint};

/// Result of one wrist solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WristSolution {
    pub shoulder: f64,
    pub elbow: f64,
    /// Distance between the reached wrist point and the target.
    pub residual: f64,
    /// Full CCD sweeps performed before stopping.
    pub iterations: u32,
}

impl WristSolution {
    pub fn converged(&self, tolerance: f64) -> bool {
        self.residual <= tolerance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WristSolver {
    tolerance: f64,
    max_iterations: u32,
}

impl WristSolver {
    pub const fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.wrist_tolerance, config.ccd_iterations)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Drive the wrist onto `target`, starting from the seeded shoulder and
    /// elbow angles (degrees). Seeds are clamped into their limits first.
    pub fn solve(
        &self,
        chain: &PlanarChain,
        target: Point2<f64>,
        seed_shoulder: f64,
        seed_elbow: f64,
    ) -> WristSolution {
        let shoulder_limit = chain.limit(Joint::Shoulder);
        let elbow_limit = chain.limit(Joint::Elbow);

        let mut shoulder = shoulder_limit.clamp(seed_shoulder);
        let mut elbow = elbow_limit.clamp(seed_elbow);
        let mut iterations = 0;

        while iterations < self.max_iterations {
            let [_, _, elbow_pivot, wrist] = wrist_points(chain, shoulder, elbow);
            if (wrist - target).norm() < self.tolerance {
                break;
            }
            elbow = elbow_limit.clamp(elbow + bearing_delta(elbow_pivot, wrist, target));

            let [_, shoulder_pivot, _, wrist] = wrist_points(chain, shoulder, elbow);
            if (wrist - target).norm() < self.tolerance {
                break;
            }
            shoulder = shoulder_limit.clamp(shoulder + bearing_delta(shoulder_pivot, wrist, target));

            iterations += 1;
        }

        let wrist = wrist_points(chain, shoulder, elbow)[3];
        WristSolution {
            shoulder,
            elbow,
            residual: (wrist - target).norm(),
            iterations,
        }
    }
}

/// Base, shoulder end, elbow end and wrist for a shoulder/elbow pair.
fn wrist_points(chain: &PlanarChain, shoulder: f64, elbow: f64) -> [Point2<f64>; 4] {
    let [base, shoulder_end, elbow_end, wrist, _] = chain.points(&[0.0, shoulder, elbow, 0.0]);
    [base, shoulder_end, elbow_end, wrist]
}

/// Rotation (degrees) about `pivot` that swings `current` onto the bearing
/// of `target`. Zero when either arm is too short to have a bearing.
fn bearing_delta(pivot: Point2<f64>, current: Point2<f64>, target: Point2<f64>) -> f64 {
    let from = current - pivot;
    let to = target - pivot;
    if from.norm() <= MIN_BEARING_LENGTH || to.norm() <= MIN_BEARING_LENGTH {
        return 0.0;
    }
    wrap_to_signed_range((to.y.atan2(to.x) - from.y.atan2(from.x)).to_degrees())
}
