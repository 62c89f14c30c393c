use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::{Joint, JointLimit};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_links() -> [f64; LINK_COUNT] {
    DEFAULT_LINKS
}
const fn default_limits() -> [JointLimit; LINK_COUNT] {
    let [b, s, e, d] = DEFAULT_LIMITS;
    [
        JointLimit::new(b.0, b.1, b.2),
        JointLimit::new(s.0, s.1, s.2),
        JointLimit::new(e.0, e.1, e.2),
        JointLimit::new(d.0, d.1, d.2),
    ]
}
const fn default_wrist_tolerance() -> f64 {
    WRIST_TOLERANCE
}
const fn default_ccd_iterations() -> u32 {
    CCD_ITERATIONS
}
const fn default_scan_candidates() -> usize {
    SCAN_CANDIDATES
}
const fn default_seed_reach_fraction() -> f64 {
    SEED_REACH_FRACTION
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Numeric knobs of the wrist solver and the distal search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wrist-to-target distance below which CCD stops, and above which a
    /// search candidate is rejected (default: 0.15 length units).
    #[serde(default = "default_wrist_tolerance")]
    pub wrist_tolerance: f64,

    /// CCD sweeps per wrist solve (default: 25). Each sweep rotates the
    /// elbow and then the shoulder once.
    #[serde(default = "default_ccd_iterations")]
    pub ccd_iterations: u32,

    /// Reach distances tried per distal request, spaced linearly from full
    /// reach down to 0 (default: 160). Bounds the cost of one request.
    #[serde(default = "default_scan_candidates")]
    pub scan_candidates: usize,

    /// Fraction of total chain length recorded as the reach before the
    /// first accepted solve (default: 0.7).
    #[serde(default = "default_seed_reach_fraction")]
    pub seed_reach_fraction: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            wrist_tolerance: default_wrist_tolerance(),
            ccd_iterations: default_ccd_iterations(),
            scan_candidates: default_scan_candidates(),
            seed_reach_fraction: default_seed_reach_fraction(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.wrist_tolerance.is_finite() && self.wrist_tolerance > 0.0) {
            return Err(ConfigError::InvalidSolver(format!(
                "wrist_tolerance must be finite and > 0, got {}",
                self.wrist_tolerance
            )));
        }
        if self.ccd_iterations == 0 {
            return Err(ConfigError::InvalidSolver("ccd_iterations must be >= 1".into()));
        }
        if self.scan_candidates == 0 {
            return Err(ConfigError::InvalidSolver("scan_candidates must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.seed_reach_fraction) {
            return Err(ConfigError::InvalidSolver(format!(
                "seed_reach_fraction must be in [0, 1], got {}",
                self.seed_reach_fraction
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ArmConfig
// ---------------------------------------------------------------------------

/// Geometry and solver settings, fixed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Link lengths in chain order.
    #[serde(default = "default_links")]
    pub links: [f64; LINK_COUNT],

    /// Per-joint (min, max, rest) in degrees, chain order.
    #[serde(default = "default_limits")]
    pub joint_limits: [JointLimit; LINK_COUNT],

    #[serde(default)]
    pub solver: SolverConfig,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
            joint_limits: default_limits(),
            solver: SolverConfig::default(),
        }
    }
}

impl ArmConfig {
    pub fn limit(&self, joint: Joint) -> &JointLimit {
        &self.joint_limits[joint.index()]
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, &length) in self.links.iter().enumerate() {
            if !(length.is_finite() && length > 0.0) {
                return Err(ConfigError::NonPositiveLink { index, length });
            }
        }

        for joint in Joint::iter() {
            let JointLimit { min, max, rest } = *self.limit(joint);
            if !(min.is_finite() && max.is_finite() && rest.is_finite()) {
                return Err(ConfigError::NonFiniteLimit { joint });
            }
            if !(min <= max) {
                return Err(ConfigError::InvertedLimit { joint, min, max });
            }
            if !(min..=max).contains(&rest) {
                return Err(ConfigError::RestOutsideLimit {
                    joint,
                    rest,
                    min,
                    max,
                });
            }
        }

        let base = self.limit(Joint::Base);
        if base.min != 0.0 || base.max != 0.0 {
            return Err(ConfigError::BaseNotFixed);
        }

        self.solver.validate()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
