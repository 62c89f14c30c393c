use log::{debug, info};

use crate::{
    config::ArmConfig,
    constants::MAX_SWEEP_COMMANDS,
    error::{ConfigError, Error, TransportError},
    search::{DistalSolver, SolveOutcome},
    session::IkSession,
    transport::JointSink,
    types::JointAngles,
};

/// Solves distal commands and ships each newly accepted pose to a sink.
pub struct Controller<S> {
    solver: DistalSolver,
    session: IkSession,
    sink: S,
}

impl<S: JointSink> Controller<S> {
    pub fn new(config: &ArmConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let solver = DistalSolver::from_config(config);
        let session = IkSession::with_config(solver.chain(), &config.solver);
        Ok(Controller {
            solver,
            session,
            sink,
        })
    }

    pub fn solver(&self) -> &DistalSolver {
        &self.solver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn current_pose(&self) -> JointAngles {
        self.session.last_solution()
    }

    /// Command a distal angle. A held pose is not resent, since the arm
    /// is already there.
    pub async fn set_distal(&mut self, distal_deg: f64) -> Result<SolveOutcome, TransportError> {
        let outcome = self.solver.solve_to_distal(&mut self.session, distal_deg);
        match outcome {
            SolveOutcome::Solved { angles, .. } => self.sink.send(&angles).await?,
            SolveOutcome::Held { .. } => debug!("distal {distal_deg:.2} held, nothing sent"),
        }
        Ok(outcome)
    }

    /// Command every angle of [`sweep_commands`] in turn. Returns how many
    /// commands produced a new pose.
    pub async fn sweep(&mut self, from: f64, to: f64, step: f64) -> Result<usize, Error> {
        let mut commanded = 0;
        let mut solved = 0;
        for distal in sweep_commands(from, to, step)? {
            if self.set_distal(distal).await?.is_solved() {
                solved += 1;
            }
            commanded += 1;
        }
        info!("Sweep {from:.1} -> {to:.1}: {solved}/{commanded} commands solved");
        Ok(solved)
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Distal angles stepped linearly from `from` towards `to`, including `to`
/// when it lands on a step. A zero step yields `from` once.
///
/// # Errors
///
/// `Error::InvalidSweep` for non-finite inputs or more than
/// `MAX_SWEEP_COMMANDS` angles.
pub fn sweep_commands(from: f64, to: f64, step: f64) -> Result<impl Iterator<Item = f64>, Error> {
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        return Err(Error::InvalidSweep(format!(
            "from {from}, to {to} and step {step} must all be finite"
        )));
    }

    let step = if to >= from { step.abs() } else { -step.abs() };
    let count = if step == 0.0 {
        1.0
    } else {
        ((to - from) / step).floor() + 1.0
    };
    if !(count <= MAX_SWEEP_COMMANDS as f64) {
        return Err(Error::InvalidSweep(format!(
            "{count} commands exceed the limit of {MAX_SWEEP_COMMANDS}"
        )));
    }

    let count = count as usize;
    Ok((0..count).map(move |i| from + step * i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ChannelSink, RecordingSink};
    use futures::StreamExt;

    #[tokio::test]
    async fn solved_poses_reach_the_sink() {
        let mut controller = Controller::new(&ArmConfig::default(), RecordingSink::new()).unwrap();

        let outcome = controller.set_distal(120.0).await.unwrap();
        assert!(outcome.is_solved());
        assert_eq!(controller.sink().sent(), &[outcome.angles()]);
        assert_eq!(controller.current_pose(), outcome.angles());
    }

    #[tokio::test]
    async fn held_poses_are_not_resent() {
        let mut controller = Controller::new(&ArmConfig::default(), RecordingSink::new()).unwrap();

        let held = controller.set_distal(-90.0).await.unwrap();
        assert_eq!(held, SolveOutcome::Held { angles: controller.solver().chain().rest_pose() });
        assert!(controller.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn sweep_counts_solved_commands() {
        let mut controller = Controller::new(&ArmConfig::default(), RecordingSink::new()).unwrap();

        // 100..=160 is inside the reachable band of the default arm.
        let solved = controller.sweep(100.0, 160.0, 5.0).await.unwrap();
        assert_eq!(solved, 13);
        let sink = controller.into_sink();
        assert_eq!(sink.sent().len(), 13);

        // Pointing the distal link backwards is never reachable.
        let mut controller = Controller::new(&ArmConfig::default(), RecordingSink::new()).unwrap();
        assert_eq!(controller.sweep(-90.0, -60.0, 10.0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn closed_channel_surfaces_as_error() {
        let (sink, stream) = ChannelSink::new(1);
        let mut controller = Controller::new(&ArmConfig::default(), sink).unwrap();
        drop(stream);
        assert_eq!(controller.set_distal(120.0).await, Err(TransportError::Closed));
    }

    #[tokio::test]
    async fn channel_stream_sees_every_solved_pose() {
        let (sink, stream) = ChannelSink::new(32);
        let mut controller = Controller::new(&ArmConfig::default(), sink).unwrap();
        let solved = controller.sweep(110.0, 130.0, 10.0).await.unwrap();
        drop(controller);

        let received: Vec<JointAngles> = stream.collect().await;
        assert_eq!(received.len(), solved);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ArmConfig::default();
        config.links[0] = -1.0;
        assert!(Controller::new(&config, RecordingSink::new()).is_err());

        // An unbounded tolerance would accept every candidate.
        let mut config = ArmConfig::default();
        config.solver.wrist_tolerance = f64::INFINITY;
        assert!(Controller::new(&config, RecordingSink::new()).is_err());
    }

    #[test]
    fn sweep_commands_step_towards_the_end() {
        let up: Vec<f64> = sweep_commands(100.0, 120.0, 5.0).unwrap().collect();
        assert_eq!(up, vec![100.0, 105.0, 110.0, 115.0, 120.0]);

        let down: Vec<f64> = sweep_commands(10.0, 0.0, 4.0).unwrap().collect();
        assert_eq!(down, vec![10.0, 6.0, 2.0]);

        let still: Vec<f64> = sweep_commands(30.0, 90.0, 0.0).unwrap().collect();
        assert_eq!(still, vec![30.0]);
    }

    #[test]
    fn sweep_commands_reject_unbounded_ranges() {
        for (from, to, step) in [
            (0.0, f64::INFINITY, 1.0),
            (f64::NEG_INFINITY, 0.0, 1.0),
            (0.0, 10.0, f64::NAN),
            (0.0, 360.0, 1e-12),
            (-1e308, 1e308, 1.0),
        ] {
            assert!(
                matches!(sweep_commands(from, to, step), Err(Error::InvalidSweep(_))),
                "({from}, {to}, {step}) was accepted"
            );
        }
    }

    #[tokio::test]
    async fn sweep_to_infinity_is_an_error() {
        let mut controller = Controller::new(&ArmConfig::default(), RecordingSink::new()).unwrap();
        let result = controller.sweep(0.0, f64::INFINITY, 1.0).await;
        assert!(matches!(result, Err(Error::InvalidSweep(_))));
        assert!(controller.sink().sent().is_empty());
    }

    #[tokio::test]
    async fn sweep_into_closed_channel_reports_transport() {
        let (sink, stream) = ChannelSink::new(1);
        let mut controller = Controller::new(&ArmConfig::default(), sink).unwrap();
        drop(stream);
        let result = controller.sweep(110.0, 130.0, 10.0).await;
        assert!(matches!(result, Err(Error::Transport(TransportError::Closed))));
    }
}
