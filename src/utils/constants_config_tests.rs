use crate::assert_float_eq;
use crate::utils::{LennardJonesConfig, PhysicsError, SimulationConfig, validate_mass};

#[test]
fn test_simulation_config_defaults() {
    let config = SimulationConfig::default();
    assert_eq!(config.alpha, 1.0);
    assert_eq!(config.alpha_min, 0.001);
    assert_eq!(config.alpha_target, 0.0);
    assert_eq!(config.dt, 1.0);
    // Alpha reaches alpha_min after 300 decays with a zero target.
    let remaining = (1.0 - config.alpha_decay).powi(300);
    assert_float_eq(remaining, config.alpha_min, 1e-12, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_simulation_config_new_falls_back_to_defaults() {
    let config = SimulationConfig::new(None, None, Some(0.05), None, None, Some(0.5));
    assert_eq!(config.alpha_decay, 0.05);
    assert_eq!(config.dt, 0.5);
    assert_eq!(config.alpha_min, SimulationConfig::default().alpha_min);
}

#[test]
fn test_simulation_config_rejects_invalid_values() {
    let negative_dt = SimulationConfig { dt: -1.0, ..SimulationConfig::default() };
    assert_eq!(negative_dt.validate(), Err(PhysicsError::InvalidTime));

    let decay = SimulationConfig { alpha_decay: 1.5, ..SimulationConfig::default() };
    assert_eq!(decay.validate(), Err(PhysicsError::InvalidCoefficient));

    let friction = SimulationConfig { velocity_decay: f64::NAN, ..SimulationConfig::default() };
    assert_eq!(friction.validate(), Err(PhysicsError::InvalidCoefficient));
}

#[test]
fn test_lennard_jones_config_defaults() {
    let config = LennardJonesConfig::default();
    assert_float_eq(config.distance_min * config.distance_min, 0.75, 1e-12, None);
    assert!(config.distance_max.is_infinite());
    assert_float_eq(config.theta, 0.25, 1e-12, None);
    assert_eq!(config.repulsive_power, 12.0);
    assert_eq!(config.attractive_power, 6.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_lennard_jones_config_rejects_invalid_values() {
    let config = LennardJonesConfig::new(Some(-1.0), None, None, None, None);
    assert_eq!(config.validate(), Err(PhysicsError::InvalidDistance));

    let config = LennardJonesConfig::new(None, None, Some(f64::INFINITY), None, None);
    assert_eq!(config.validate(), Err(PhysicsError::InvalidTheta));

    let config = LennardJonesConfig::new(None, None, None, Some(0.0), None);
    assert_eq!(config.validate(), Err(PhysicsError::InvalidExponent));
}

#[test]
fn test_validate_mass() {
    assert!(validate_mass(2.0).is_ok());
    assert!(validate_mass(f64::NAN).is_ok());
    assert_eq!(validate_mass(0.0), Err(PhysicsError::InvalidMass));
    assert_eq!(validate_mass(-3.0), Err(PhysicsError::InvalidMass));
}
