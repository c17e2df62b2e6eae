use std::any::Any;
use rand::RngCore;
use crate::particles::Particle;

/// A force component that can be registered with a `Simulation`.
///
/// The simulation clears every particle's force and energy accumulators once
/// per iteration and then calls `apply` on each registered component in
/// registration order, so implementations must add to the accumulators
/// rather than overwrite them.
pub trait Force {
    /// Prepares per-particle state for a new particle set. Called whenever the
    /// particle set or the random source of the owning simulation changes.
    fn initialize(&mut self, particles: &[Particle]);

    /// Adds this component's force and energy to every particle.
    ///
    /// `alpha` is the current cooling temperature and `random` is the
    /// simulation's random source, lent for the duration of the call.
    fn apply(&mut self, particles: &mut [Particle], alpha: f64, random: &mut dyn RngCore);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Resets the force and energy accumulators of every particle.
pub fn clear_accumulators(particles: &mut [Particle]) {
    particles.iter_mut().for_each(Particle::clear_accumulators);
}
