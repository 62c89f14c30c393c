//! Planar chain model: link lengths, joint limits and forward kinematics.

use nalgebra::{Point2, Vector2};

use crate::config::ArmConfig;
use crate::constants::LINK_COUNT;
use crate::error::{InvalidInputKind, KinematicsError};
use crate::types::{Joint, JointAngles, JointLimit};

/// Base point followed by the endpoint of every link.
pub type ChainPoints = [Point2<f64>; LINK_COUNT + 1];

/// Unit vector pointing along `degrees`, measured from +x.
pub fn direction(degrees: f64) -> Vector2<f64> {
    let radians = degrees.to_radians();
    Vector2::new(radians.cos(), radians.sin())
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanarChain {
    links: [f64; LINK_COUNT],
    limits: [JointLimit; LINK_COUNT],
}

impl PlanarChain {
    pub fn new(links: [f64; LINK_COUNT], limits: [JointLimit; LINK_COUNT]) -> Self {
        PlanarChain { links, limits }
    }

    pub fn from_config(config: &ArmConfig) -> Self {
        Self::new(config.links, config.joint_limits)
    }

    pub fn link_length(&self, joint: Joint) -> f64 {
        self.links[joint.index()]
    }

    pub fn limit(&self, joint: Joint) -> &JointLimit {
        &self.limits[joint.index()]
    }

    /// Sum of all link lengths.
    pub fn total_reach(&self) -> f64 {
        self.links.iter().sum()
    }

    pub fn rest_pose(&self) -> JointAngles {
        JointAngles::from_array(self.limits.map(|limit| limit.rest))
    }

    pub fn within_limits(&self, angles: &JointAngles) -> bool {
        self.limits
            .iter()
            .zip(angles.to_array())
            .all(|(limit, angle)| limit.contains(angle))
    }

    /// Compute forward kinematics: relative joint angles (degrees) -> the
    /// base point plus every link endpoint.
    ///
    /// # Errors
    ///
    /// `InvalidInputKind::LengthMismatch` unless exactly one angle per link
    /// is supplied.
    pub fn forward_kinematics(&self, angles: &[f64]) -> Result<ChainPoints, KinematicsError> {
        let Ok(fixed) = <&[f64; LINK_COUNT]>::try_from(angles) else {
            return Err(InvalidInputKind::LengthMismatch {
                expected: LINK_COUNT,
                got: angles.len(),
            }
            .into());
        };
        Ok(self.points(fixed))
    }

    /// Tip (last link endpoint) of a pose.
    pub fn tip(&self, angles: &JointAngles) -> Point2<f64> {
        self.points(&angles.to_array())[LINK_COUNT]
    }

    pub(crate) fn points(&self, angles: &[f64; LINK_COUNT]) -> ChainPoints {
        let mut points = [Point2::origin(); LINK_COUNT + 1];
        let mut heading = 0.0;
        for (i, (&length, &angle)) in self.links.iter().zip(angles.iter()).enumerate() {
            heading += angle;
            points[i + 1] = points[i] + direction(heading) * length;
        }
        points
    }
}

impl Default for PlanarChain {
    fn default() -> Self {
        Self::from_config(&ArmConfig::default())
    }
}
