//! This module drives a set of particles under one or more force components
//! until the system cools down.
//!
//! Motion is integrated with a kick-drift-kick (leapfrog) scheme: a half-step
//! velocity update from the previous forces, a damped position update, a force
//! recomputation and a second half-step velocity update. A temperature `alpha`
//! decays geometrically towards `alpha_target` on every iteration and scales
//! the force magnitudes; once it drops below `alpha_min` a running simulation
//! stops and emits `SimulationEvent::End`.
//!
//! The simulation never schedules itself. An external ticker calls `step`
//! while `is_running` holds, or `run` can be used to drive it synchronously.
//!
//! # Example
//!
//! ```
//! use rs_force_layout::particles::{LennardJones, Particle, Simulation};
//!
//! let particles = vec![Particle::new(0.0, 0.0), Particle::new(2.0, 0.0)];
//! let mut sim = Simulation::new(particles).expect("Failed to create simulation");
//! sim.add_force("lj", LennardJones::new());
//!
//! sim.restart();
//! let steps = sim.run(1_000);
//! assert!(!sim.is_running());
//! assert!(steps <= 1_000);
//! assert!(sim.alpha() < sim.alpha_min());
//! ```
use std::collections::HashMap;
use log::{debug, trace, warn};
use rand::RngCore;
use crate::particles::{clear_accumulators, initialize_particles, Force, Particle};
use crate::utils::{
    validate_alpha,
    validate_mass,
    validate_time_step,
    validate_unit_interval,
    Lcg,
    PhysicsError,
    SimulationConfig,
};

/// Lifecycle signals broadcast by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationEvent {
    /// Fired after every externally driven step.
    Tick,
    /// Fired once when alpha first drops below `alpha_min` while running.
    End,
}

/// Event callback. It receives the simulation mutably, so it can stop it or
/// adjust its cooling schedule.
pub type Listener = Box<dyn FnMut(&mut Simulation)>;

/// A particle simulation integrating registered force components.
pub struct Simulation {
    particles: Vec<Particle>,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    /// Fraction of velocity kept per step, `1 - velocity_decay`.
    velocity_retention: f64,
    dt: f64,
    forces: Vec<(String, Box<dyn Force>)>,
    listeners: HashMap<SimulationEvent, Listener>,
    random: Box<dyn RngCore>,
    running: bool,
}

impl Simulation {
    /// Creates a stopped simulation over `particles` with the default cooling schedule.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidMass` if any particle has a zero, negative or
    /// infinite mass.
    pub fn new(particles: Vec<Particle>) -> Result<Self, PhysicsError> {
        Self::with_config(particles, SimulationConfig::default())
    }

    /// Creates a stopped simulation with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid configuration field, or `PhysicsError::InvalidMass`
    /// for an invalid particle mass.
    pub fn with_config(mut particles: Vec<Particle>, config: SimulationConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        initialize_particles(&mut particles)?;
        Ok(Simulation {
            particles,
            alpha: config.alpha,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: config.alpha_target,
            velocity_retention: 1.0 - config.velocity_decay,
            dt: config.dt,
            forces: Vec::new(),
            listeners: HashMap::new(),
            random: Box::new(Lcg::default()),
            running: false,
        })
    }

    /// Current parameters as a configuration.
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            alpha: self.alpha,
            alpha_min: self.alpha_min,
            alpha_decay: self.alpha_decay,
            alpha_target: self.alpha_target,
            velocity_decay: self.velocity_decay(),
            dt: self.dt,
        }
    }

    /// Advances the simulation by `iterations` leapfrog iterations.
    ///
    /// Does not emit events and ignores the running state.
    pub fn tick(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

            let (dt, retention) = (self.dt, self.velocity_retention);
            for particle in self.particles.iter_mut() {
                particle.kick(dt);
            }
            for particle in self.particles.iter_mut() {
                particle.drift(dt, retention);
            }

            clear_accumulators(&mut self.particles);
            for (_, force) in self.forces.iter_mut() {
                force.apply(&mut self.particles, self.alpha, self.random.as_mut());
            }

            for particle in self.particles.iter_mut() {
                particle.kick(dt);
            }
        }
    }

    /// One externally driven step: a single iteration, a `Tick` broadcast and the
    /// convergence check. Returns whether the simulation is still running.
    ///
    /// A stopped simulation ignores the call.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.tick(1);
        trace!("alpha {:.6}", self.alpha);
        self.emit(SimulationEvent::Tick);

        // A tick listener may already have stopped the run.
        if self.running && self.alpha < self.alpha_min {
            self.running = false;
            debug!("simulation converged, alpha {} below {}", self.alpha, self.alpha_min);
            self.emit(SimulationEvent::End);
        }
        self.running
    }

    /// Drives `step` until the simulation stops or `max_steps` steps have run.
    /// Returns the number of steps taken.
    pub fn run(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && self.running {
            self.step();
            steps += 1;
        }
        steps
    }

    pub fn restart(&mut self) {
        debug!("simulation restarted at alpha {}", self.alpha);
        self.running = true;
    }

    pub fn stop(&mut self) {
        debug!("simulation stopped at alpha {}", self.alpha);
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn nodes(&self) -> &[Particle] {
        &self.particles
    }

    /// Edits the particles in place, e.g. to pin or drag one of them.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidMass` if `edit` leaves any particle with a
    /// zero, negative, infinite or NaN mass. The particles are restored to their
    /// state before the call in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::particles::{Particle, Simulation};
    /// use rs_force_layout::utils::PhysicsError;
    ///
    /// let mut sim = Simulation::new(vec![Particle::new(1.0, 1.0)]).expect("Failed to create simulation");
    /// sim.update_nodes(|nodes| nodes[0].pin(0.0, 0.0)).expect("valid edit");
    /// assert!(sim.nodes()[0].is_pinned());
    ///
    /// assert_eq!(sim.update_nodes(|nodes| nodes[0].mass = 0.0), Err(PhysicsError::InvalidMass));
    /// assert_eq!(sim.nodes()[0].mass, 1.0);
    /// ```
    pub fn update_nodes<F>(&mut self, edit: F) -> Result<(), PhysicsError>
    where
        F: FnOnce(&mut [Particle]),
    {
        let previous = self.particles.clone();
        edit(&mut self.particles);

        // Masses were resolved on initialization, so NaN is no longer "unset" here.
        let valid = self.particles.iter().try_for_each(|particle| {
            if particle.mass.is_nan() {
                return Err(PhysicsError::InvalidMass);
            }
            validate_mass(particle.mass)
        });
        if let Err(error) = valid {
            warn!("rejected particle edit: {}", error);
            self.particles = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Replaces the particle set and reinitializes every force.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidMass` for an invalid particle mass; the
    /// current set is kept in that case.
    pub fn set_nodes(&mut self, mut particles: Vec<Particle>) -> Result<(), PhysicsError> {
        initialize_particles(&mut particles)?;
        self.particles = particles;
        self.initialize_forces();
        Ok(())
    }

    fn initialize_forces(&mut self) {
        for (_, force) in self.forces.iter_mut() {
            force.initialize(&self.particles);
        }
    }

    /// Registers `force` under `name`, replacing any force of that name in place.
    pub fn add_force<F: Force + 'static>(&mut self, name: &str, force: F) {
        self.set_force(name, Some(Box::new(force)));
    }

    /// Registers, replaces (`Some`) or removes (`None`) the force called `name`.
    /// Returns the force previously registered under that name.
    pub fn set_force(&mut self, name: &str, force: Option<Box<dyn Force>>) -> Option<Box<dyn Force>> {
        let position = self.forces.iter().position(|(n, _)| n == name);
        match (force, position) {
            (Some(mut force), Some(i)) => {
                force.initialize(&self.particles);
                debug!("replacing force {}", name);
                Some(std::mem::replace(&mut self.forces[i].1, force))
            }
            (Some(mut force), None) => {
                force.initialize(&self.particles);
                debug!("registering force {}", name);
                self.forces.push((name.to_string(), force));
                None
            }
            (None, Some(i)) => {
                debug!("removing force {}", name);
                Some(self.forces.remove(i).1)
            }
            (None, None) => None,
        }
    }

    pub fn force(&self, name: &str) -> Option<&dyn Force> {
        self.forces
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, force)| force.as_ref())
    }

    /// Typed mutable access to a registered force.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::particles::{LennardJones, Simulation};
    ///
    /// let mut sim = Simulation::new(Vec::new()).expect("Failed to create simulation");
    /// sim.add_force("lj", LennardJones::new());
    ///
    /// let lj = sim.force_mut::<LennardJones>("lj").expect("registered");
    /// lj.set_theta(0.5).expect("valid theta");
    /// assert_eq!(sim.force_mut::<LennardJones>("lj").map(|f| f.theta()), Some(0.5));
    /// ```
    pub fn force_mut<F: Force + 'static>(&mut self, name: &str) -> Option<&mut F> {
        self.forces
            .iter_mut()
            .find(|(n, _)| n == name)
            .and_then(|(_, force)| force.as_any_mut().downcast_mut::<F>())
    }

    /// Names of the registered forces, in evaluation order.
    pub fn force_names(&self) -> impl Iterator<Item = &str> {
        self.forces.iter().map(|(name, _)| name.as_str())
    }

    /// Replaces the random source and reinitializes every force.
    pub fn set_random_source<R: RngCore + 'static>(&mut self, random: R) {
        self.random = Box::new(random);
        self.initialize_forces();
    }

    pub fn random_source_mut(&mut self) -> &mut dyn RngCore {
        self.random.as_mut()
    }

    /// Installs (`Some`) or removes (`None`) the listener for `event`, returning
    /// the previously installed one.
    pub fn on(&mut self, event: SimulationEvent, listener: Option<Listener>) -> Option<Listener> {
        match listener {
            Some(listener) => self.listeners.insert(event, listener),
            None => self.listeners.remove(&event),
        }
    }

    fn emit(&mut self, event: SimulationEvent) {
        // Taken out for the call so the listener can borrow the simulation mutably.
        // A listener it installs for the same event takes precedence.
        if let Some(mut listener) = self.listeners.remove(&event) {
            listener(self);
            self.listeners.entry(event).or_insert(listener);
        }
    }

    /// Returns the particle closest to `(x, y)`, limited to `radius` when given.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::particles::{Particle, Simulation};
    ///
    /// let sim = Simulation::new(vec![Particle::new(0.0, 0.0), Particle::new(5.0, 0.0)])
    ///     .expect("Failed to create simulation");
    /// assert_eq!(sim.find(4.0, 0.0, None).map(|p| p.index), Some(1));
    /// assert!(sim.find(2.5, 3.0, Some(1.0)).is_none());
    /// ```
    pub fn find(&self, x: f64, y: f64, radius: Option<f64>) -> Option<&Particle> {
        let mut best = radius.map_or(f64::INFINITY, |r| r * r);
        let mut closest = None;
        for particle in &self.particles {
            let dx = x - particle.x;
            let dy = y - particle.y;
            let d2 = dx * dx + dy * dy;
            if d2 < best {
                closest = Some(particle);
                best = d2;
            }
        }
        closest
    }

    /// Total potential energy accumulated during the last force evaluation.
    pub fn potential_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.energy).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), PhysicsError> {
        validate_alpha(alpha)?;
        self.alpha = alpha;
        Ok(())
    }

    pub fn alpha_min(&self) -> f64 {
        self.alpha_min
    }

    pub fn set_alpha_min(&mut self, alpha_min: f64) -> Result<(), PhysicsError> {
        validate_alpha(alpha_min)?;
        self.alpha_min = alpha_min;
        Ok(())
    }

    pub fn alpha_decay(&self) -> f64 {
        self.alpha_decay
    }

    pub fn set_alpha_decay(&mut self, alpha_decay: f64) -> Result<(), PhysicsError> {
        validate_unit_interval(alpha_decay)?;
        self.alpha_decay = alpha_decay;
        Ok(())
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, alpha_target: f64) -> Result<(), PhysicsError> {
        validate_alpha(alpha_target)?;
        self.alpha_target = alpha_target;
        Ok(())
    }

    /// Fraction of velocity lost per step.
    pub fn velocity_decay(&self) -> f64 {
        1.0 - self.velocity_retention
    }

    pub fn set_velocity_decay(&mut self, velocity_decay: f64) -> Result<(), PhysicsError> {
        validate_unit_interval(velocity_decay)?;
        self.velocity_retention = 1.0 - velocity_decay;
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn set_dt(&mut self, dt: f64) -> Result<(), PhysicsError> {
        validate_time_step(dt)?;
        self.dt = dt;
        Ok(())
    }
}
