use thiserror::Error;

use crate::types::Joint;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),
}

/// Ways a caller can hand forward kinematics bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInputKind {
    #[error("expected {expected} joint angles, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KinematicsError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputKind),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Link {index} must have a finite positive length, got {length}")]
    NonPositiveLink { index: usize, length: f64 },

    #[error("{joint} limit has a non-finite bound or rest angle")]
    NonFiniteLimit { joint: Joint },

    #[error("{joint} limit is inverted: min {min} > max {max}")]
    InvertedLimit { joint: Joint, min: f64, max: f64 },

    #[error("{joint} rest angle {rest} lies outside [{min}, {max}]")]
    RestOutsideLimit {
        joint: Joint,
        rest: f64,
        min: f64,
        max: f64,
    },

    #[error("Base joint must be fixed at 0 degrees")]
    BaseNotFixed,

    #[error("Invalid solver setting: {0}")]
    InvalidSolver(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Joint sink closed")]
    Closed,
}
