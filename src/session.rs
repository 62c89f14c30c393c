use std::sync::Arc;

use parking_lot::Mutex;

use crate::chain::PlanarChain;
use crate::config::SolverConfig;
use crate::search::{DistalSolver, SolveOutcome};
use crate::types::JointAngles;

/// Warm-start memory between distal requests: the last accepted pose and
/// the reach distance it was found at. Only the distal search updates it.
#[derive(Debug, Clone, PartialEq)]
pub struct IkSession {
    last_solution: JointAngles,
    last_distance: f64,
}

impl IkSession {
    /// Starts from the rest pose with the default seed reach fraction.
    pub fn new(chain: &PlanarChain) -> Self {
        Self::with_config(chain, &SolverConfig::default())
    }

    pub fn with_config(chain: &PlanarChain, config: &SolverConfig) -> Self {
        IkSession {
            last_solution: chain.rest_pose(),
            last_distance: chain.total_reach() * config.seed_reach_fraction,
        }
    }

    pub fn last_solution(&self) -> JointAngles {
        self.last_solution
    }

    pub fn last_distance(&self) -> f64 {
        self.last_distance
    }

    pub(crate) fn accept(&mut self, angles: JointAngles, distance: f64) {
        self.last_solution = angles;
        self.last_distance = distance;
    }
}

/// Solver plus session behind one lock, for callers on several threads.
/// The lock is held for a whole request so seed and distance never go
/// stale relative to each other.
#[derive(Debug, Clone)]
pub struct SharedSolver {
    solver: Arc<DistalSolver>,
    session: Arc<Mutex<IkSession>>,
}

impl SharedSolver {
    pub fn new(solver: DistalSolver, session: IkSession) -> Self {
        SharedSolver {
            solver: Arc::new(solver),
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn solve_to_distal(&self, distal_deg: f64) -> SolveOutcome {
        let mut session = self.session.lock();
        self.solver.solve_to_distal(&mut session, distal_deg)
    }

    pub fn snapshot(&self) -> IkSession {
        self.session.lock().clone()
    }

    pub fn solver(&self) -> &DistalSolver {
        &self.solver
    }
}
