use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::constants::LINK_COUNT;

/// Joints in chain order, base first.
#[derive(Debug, EnumIter, Display, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Joint {
    Base = 0,     // fixed at 0, non-actuated reference
    Shoulder = 1,
    Elbow = 2,
    Distal = 3,   // resolved by the distal search, never by CCD
}

impl Joint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Relative joint rotations in degrees. Each value is added to the
/// cumulative orientation of the chain at its link.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub base: f64,
    pub shoulder: f64,
    pub elbow: f64,
    pub distal: f64,
}

impl JointAngles {
    pub fn from_array(values: [f64; LINK_COUNT]) -> Self {
        let [base, shoulder, elbow, distal] = values;
        JointAngles {
            base,
            shoulder,
            elbow,
            distal,
        }
    }

    pub fn to_array(&self) -> [f64; LINK_COUNT] {
        [self.base, self.shoulder, self.elbow, self.distal]
    }

    pub fn get(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Base => self.base,
            Joint::Shoulder => self.shoulder,
            Joint::Elbow => self.elbow,
            Joint::Distal => self.distal,
        }
    }

    /// Absolute orientation of the last link.
    pub fn orientation(&self) -> f64 {
        self.base + self.shoulder + self.elbow + self.distal
    }
}

/// Angular range of one joint, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    pub min: f64,
    pub max: f64,
    pub rest: f64,
}

impl JointLimit {
    pub const fn new(min: f64, max: f64, rest: f64) -> Self {
        JointLimit { min, max, rest }
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.min..=self.max).contains(&angle)
    }

    pub fn clamp(&self, angle: f64) -> f64 {
        clamp(angle, self.min, self.max)
    }
}

/// Bounds `value` to `[min, max]`, both ends inclusive.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Normalizes an angular delta in degrees into `(-180, 180]`.
pub fn wrap_to_signed_range(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn wrap_crosses_the_half_turn() {
        assert_abs_diff_eq!(wrap_to_signed_range(359.0), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_to_signed_range(-181.0), 179.0, epsilon = 1e-12);
        assert_eq!(wrap_to_signed_range(180.0), 180.0);
        assert_eq!(wrap_to_signed_range(-180.0), 180.0);
        assert_abs_diff_eq!(wrap_to_signed_range(725.0), 5.0, epsilon = 1e-12);
        assert_eq!(wrap_to_signed_range(0.0), 0.0);
    }

    #[test]
    fn clamp_is_inclusive() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);

        let limit = JointLimit::new(-10.0, 90.0, 10.0);
        assert!(limit.contains(-10.0));
        assert!(limit.contains(90.0));
        assert!(!limit.contains(90.000_001));
        assert_eq!(limit.clamp(120.0), 90.0);
    }

    #[test]
    fn joints_iterate_in_chain_order() {
        let order: Vec<usize> = Joint::iter().map(Joint::index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);

        let angles = JointAngles::from_array([0.0, 1.0, 2.0, 3.0]);
        for joint in Joint::iter() {
            assert_eq!(angles.get(joint), joint.index() as f64);
        }
        assert_eq!(angles.to_array(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(angles.orientation(), 6.0);
    }
}
