/// Number of links (and joints) in the planar chain.
pub const LINK_COUNT: usize = 4;

pub const DEFAULT_LINKS: [f64; LINK_COUNT] = [6.0, 5.0, 3.0, 2.5];

// (min, max, rest) in degrees, chain order.
pub const DEFAULT_LIMITS: [(f64, f64, f64); LINK_COUNT] = [
    (0.0, 0.0, 0.0),     // base, fixed
    (-30.0, 90.0, -10.0), // shoulder
    (0.0, 110.0, 10.0),  // elbow
    (-10.0, 90.0, 10.0), // distal
];

// Solver defaults
pub const WRIST_TOLERANCE: f64 = 0.15;
pub const CCD_ITERATIONS: u32 = 25;
pub const SCAN_CANDIDATES: usize = 160;
pub const SEED_REACH_FRACTION: f64 = 0.7;

/// Upper bound on the distal angles one sweep may command.
pub const MAX_SWEEP_COMMANDS: usize = 1_000_000;

/// Vectors shorter than this have no usable bearing.
pub const MIN_BEARING_LENGTH: f64 = 1e-6;
