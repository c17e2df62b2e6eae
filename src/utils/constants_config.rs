// src/utils/constants_config.rs
use crate::utils::{
    constants::*,
    errors::PhysicsError
};

/// Cooling schedule and time-stepping parameters of a simulation.
///
/// `velocity_decay` is the fraction of velocity lost per step (friction); the
/// integrator keeps `1 - velocity_decay` as its retention factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub alpha: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub alpha_target: f64,
    pub velocity_decay: f64,
    pub dt: f64,
}


impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_decay: 1.0 - DEFAULT_ALPHA_MIN.powf(1.0 / DEFAULT_COOLING_ITERATIONS),
            alpha_target: 0.0,
            velocity_decay: DEFAULT_VELOCITY_DECAY,
            dt: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn new(
        alpha: Option<f64>,
        alpha_min: Option<f64>,
        alpha_decay: Option<f64>,
        alpha_target: Option<f64>,
        velocity_decay: Option<f64>,
        dt: Option<f64>,
    ) -> Self {
        let default = Self::default();
        Self {
            alpha: alpha.unwrap_or(default.alpha),
            alpha_min: alpha_min.unwrap_or(default.alpha_min),
            alpha_decay: alpha_decay.unwrap_or(default.alpha_decay),
            alpha_target: alpha_target.unwrap_or(default.alpha_target),
            velocity_decay: velocity_decay.unwrap_or(default.velocity_decay),
            dt: dt.unwrap_or(default.dt),
        }
    }

    /// Checks every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        validate_alpha(self.alpha)?;
        validate_alpha(self.alpha_min)?;
        validate_alpha(self.alpha_target)?;
        validate_unit_interval(self.alpha_decay)?;
        validate_unit_interval(self.velocity_decay)?;
        validate_time_step(self.dt)
    }
}

/// Parameters of the generalized Lennard-Jones force.
///
/// Distances and `theta` are given unsquared here; the force stores their
/// squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJonesConfig {
    pub distance_min: f64,
    pub distance_max: f64,
    pub theta: f64,
    pub repulsive_power: f64,
    pub attractive_power: f64,
}

impl Default for LennardJonesConfig {
    fn default() -> Self {
        Self {
            distance_min: DEFAULT_DISTANCE_MIN_SQUARED.sqrt(),
            distance_max: f64::INFINITY,
            theta: DEFAULT_THETA_SQUARED.sqrt(),
            repulsive_power: DEFAULT_REPULSIVE_POWER,
            attractive_power: DEFAULT_ATTRACTIVE_POWER,
        }
    }
}

impl LennardJonesConfig {
    pub fn new(
        distance_min: Option<f64>,
        distance_max: Option<f64>,
        theta: Option<f64>,
        repulsive_power: Option<f64>,
        attractive_power: Option<f64>,
    ) -> Self {
        let default = Self::default();
        Self {
            distance_min: distance_min.unwrap_or(default.distance_min),
            distance_max: distance_max.unwrap_or(default.distance_max),
            theta: theta.unwrap_or(default.theta),
            repulsive_power: repulsive_power.unwrap_or(default.repulsive_power),
            attractive_power: attractive_power.unwrap_or(default.attractive_power),
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        validate_distance_min(self.distance_min)?;
        validate_distance_max(self.distance_max)?;
        validate_theta(self.theta)?;
        validate_exponent(self.repulsive_power)?;
        validate_exponent(self.attractive_power)
    }
}

pub fn validate_alpha(value: f64) -> Result<(), PhysicsError> {
    if !value.is_finite() || value < 0.0 { return Err(PhysicsError::InvalidCoefficient); }
    Ok(())
}

pub fn validate_unit_interval(value: f64) -> Result<(), PhysicsError> {
    if !(0.0..=1.0).contains(&value) { return Err(PhysicsError::InvalidCoefficient); }
    Ok(())
}

pub fn validate_time_step(dt: f64) -> Result<(), PhysicsError> {
    if !dt.is_finite() || dt <= 0.0 { return Err(PhysicsError::InvalidTime); }
    Ok(())
}

/// NaN is accepted and means "unset"; it becomes 1 when the particle set is initialized.
pub fn validate_mass(mass: f64) -> Result<(), PhysicsError> {
    if mass.is_nan() { return Ok(()); }
    if mass <= 0.0 || mass.is_infinite() { return Err(PhysicsError::InvalidMass); }
    Ok(())
}

pub fn validate_distance_min(distance: f64) -> Result<(), PhysicsError> {
    if !distance.is_finite() || distance < 0.0 { return Err(PhysicsError::InvalidDistance); }
    Ok(())
}

pub fn validate_distance_max(distance: f64) -> Result<(), PhysicsError> {
    if distance.is_nan() || distance <= 0.0 { return Err(PhysicsError::InvalidDistance); }
    Ok(())
}

pub fn validate_theta(theta: f64) -> Result<(), PhysicsError> {
    if !theta.is_finite() || theta < 0.0 { return Err(PhysicsError::InvalidTheta); }
    Ok(())
}

pub fn validate_exponent(power: f64) -> Result<(), PhysicsError> {
    if !power.is_finite() || power <= 0.0 { return Err(PhysicsError::InvalidExponent); }
    Ok(())
}
