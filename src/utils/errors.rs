use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or driving a simulation.
///
/// Numeric edge cases met during force evaluation (coincident particles, equal
/// exponents) are normalized in place and never surface here; these variants
/// cover invalid values supplied at the point of assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., negative, zero or infinite mass).
    InvalidMass,
    /// Indicates an invalid time step (e.g., negative or non-finite dt).
    InvalidTime,
    /// Indicates an invalid cooling or damping coefficient (e.g., alpha decay outside [0, 1]).
    InvalidCoefficient,
    /// Indicates an invalid distance bound (e.g., negative minimum distance).
    InvalidDistance,
    /// Indicates an invalid Barnes-Hut accuracy parameter.
    InvalidTheta,
    /// Indicates an invalid potential exponent.
    InvalidExponent,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidTime => write!(f, "Invalid time step value"),
            PhysicsError::InvalidCoefficient => write!(f, "Invalid coefficient value"),
            PhysicsError::InvalidDistance => write!(f, "Invalid distance value"),
            PhysicsError::InvalidTheta => write!(f, "Invalid theta value"),
            PhysicsError::InvalidExponent => write!(f, "Invalid exponent value"),
        }
    }
}


impl Error for PhysicsError {}
