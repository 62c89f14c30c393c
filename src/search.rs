//! Search over reach distances for a pose with a commanded distal angle.
//!
//! The tip is placed on a ray from the base that runs perpendicular to the
//! commanded distal direction. Candidate distances along that ray are tried
//! from full reach down to the base, and the first one whose wrist converges
//! and whose distal joint stays within its limit wins.

use log::{debug, trace};
use nalgebra::{Point2, Vector2};

use crate::ccd::WristSolver;
use crate::chain::{direction, PlanarChain};
use crate::config::{ArmConfig, SolverConfig};
use crate::session::IkSession;
use crate::types::{Joint, JointAngles};

/// What a distal request did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    /// A new pose was accepted at `distance` along the ray.
    Solved { angles: JointAngles, distance: f64 },
    /// No candidate was feasible; the previous pose is kept.
    Held { angles: JointAngles },
}

impl SolveOutcome {
    pub fn angles(&self) -> JointAngles {
        match *self {
            SolveOutcome::Solved { angles, .. } | SolveOutcome::Held { angles } => angles,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved { .. })
    }
}

/// Direction of the tip ray: the distal direction rotated by -90 degrees.
pub fn ray_direction(distal_deg: f64) -> Vector2<f64> {
    direction(distal_deg - 90.0)
}

/// `count` distances spaced evenly from `reach` down to 0, both included.
pub fn candidate_distances(reach: f64, count: usize) -> impl Iterator<Item = f64> {
    let steps = count.saturating_sub(1).max(1);
    (0..count).map(move |k| {
        if k == steps {
            0.0
        } else {
            reach - reach * k as f64 / steps as f64
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistalSolver {
    chain: PlanarChain,
    wrist: WristSolver,
    scan_candidates: usize,
}

impl DistalSolver {
    pub fn new(chain: PlanarChain, config: &SolverConfig) -> Self {
        DistalSolver {
            chain,
            wrist: WristSolver::from_config(config),
            scan_candidates: config.scan_candidates,
        }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(PlanarChain::from_config(config), &config.solver)
    }

    pub fn chain(&self) -> &PlanarChain {
        &self.chain
    }

    /// Where the wrist must sit for the tip to land `distance` along the ray
    /// while the last link points along `distal_deg`.
    pub fn wrist_target(&self, distal_deg: f64, distance: f64) -> Point2<f64> {
        let tip = Point2::from(ray_direction(distal_deg) * distance);
        tip - direction(distal_deg) * self.chain.link_length(Joint::Distal)
    }

    /// Solve for a pose whose last link has absolute orientation
    /// `distal_deg`, seeding CCD from the session's last pose. The session
    /// is only updated when a candidate is accepted; otherwise the last pose
    /// is held.
    pub fn solve_to_distal(&self, session: &mut IkSession, distal_deg: f64) -> SolveOutcome {
        let seed = session.last_solution();
        // Base is fixed; CCD evaluates the wrist with it at 0 as well.
        let base = 0.0;
        let distal_limit = self.chain.limit(Joint::Distal);
        let tolerance = self.wrist.tolerance();

        for distance in candidate_distances(self.chain.total_reach(), self.scan_candidates) {
            let target = self.wrist_target(distal_deg, distance);
            let wrist = self.wrist.solve(&self.chain, target, seed.shoulder, seed.elbow);
            if wrist.residual > tolerance {
                trace!("distance {distance:.3}: wrist residual {:.3}", wrist.residual);
                continue;
            }

            let distal = distal_deg - (base + wrist.shoulder + wrist.elbow);
            if !distal_limit.contains(distal) {
                trace!("distance {distance:.3}: distal joint {distal:.2} out of range");
                continue;
            }

            let angles = JointAngles {
                base,
                shoulder: wrist.shoulder,
                elbow: wrist.elbow,
                distal,
            };
            session.accept(angles, distance);
            debug!("distal {distal_deg:.2}: accepted {angles:?} at distance {distance:.3}");
            return SolveOutcome::Solved { angles, distance };
        }

        debug!("distal {distal_deg:.2}: no feasible candidate, holding last pose");
        SolveOutcome::Held { angles: seed }
    }
}

impl Default for DistalSolver {
    fn default() -> Self {
        Self::from_config(&ArmConfig::default())
    }
}
