//! Generalized Lennard-Jones interactions evaluated with the Barnes-Hut approximation.
//!
//! Every particle carries a signed strength ("charge"). For a pair at squared
//! distance `l` with exponents `N` (repulsive) and `M` (attractive), the
//! potential energy and the force prefactor are
//!
//! ```text
//! E(l) = (N·l^(−M/2) − M·l^(−N/2)) / (M − N)
//! P(l) = M·N / (M − N) · (1 − l^((N−M)/2)) / l^((N+2)/2)
//! ```
//!
//! and the force on a particle is `P(l) · (dx, dy) · w · alpha`, where
//! `(dx, dy)` points from the particle to the other charge `w`. With the default
//! 12-6 exponents the equilibrium distance is 1.
//!
//! A fresh quadtree is built on every evaluation. Quadrants that are small
//! relative to their distance are treated as one pseudo-particle located at the
//! |charge|-weighted centroid of their contents.
//!
//! # Example
//!
//! ```
//! use rs_force_layout::particles::{clear_accumulators, Force, LennardJones, Particle};
//! use rs_force_layout::utils::Lcg;
//!
//! let mut particles = vec![Particle::new(0.0, 0.0), Particle::new(2.0, 0.0)];
//! let mut force = LennardJones::new();
//! let mut random = Lcg::default();
//!
//! force.initialize(&particles);
//! clear_accumulators(&mut particles);
//! force.apply(&mut particles, 1.0, &mut random);
//!
//! // Beyond the equilibrium distance the pair attracts.
//! assert!(particles[0].force_x > 0.0);
//! assert!(particles[1].force_x < 0.0);
//! ```
use std::any::Any;
use log::debug;
use rand::RngCore;
use crate::particles::{Aggregate, Force, Particle, Quad, QuadKind, QuadNode, QuadTree};
use crate::utils::{
    jiggle,
    validate_distance_max,
    validate_distance_min,
    validate_exponent,
    validate_theta,
    LennardJonesConfig,
    PhysicsError,
};
use crate::utils::constants::SELF_ENERGY;

/// Rule deriving a particle's strength from the particle, its position in the
/// set and the whole set.
pub type StrengthFn = dyn Fn(&Particle, usize, &[Particle]) -> f64;

/// Force and energy gathered for one particle during a traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Contribution {
    energy: f64,
    force_x: f64,
    force_y: f64,
}

/// Barnes-Hut evaluator of the generalized Lennard-Jones potential.
pub struct LennardJones {
    strength: Box<StrengthFn>,
    strengths: Vec<f64>,
    stale: bool,
    distance_min2: f64,
    distance_max2: f64,
    theta2: f64,
    repulsive_power: f64,
    attractive_power: f64,
}

impl Default for LennardJones {
    fn default() -> Self {
        Self::new()
    }
}

impl LennardJones {
    /// Creates a force with unit strengths and the default 12-6 exponents.
    pub fn new() -> Self {
        let config = LennardJonesConfig::default();
        Self {
            strength: Box::new(|_: &Particle, _: usize, _: &[Particle]| 1.0),
            strengths: Vec::new(),
            stale: true,
            distance_min2: config.distance_min * config.distance_min,
            distance_max2: config.distance_max * config.distance_max,
            theta2: config.theta * config.theta,
            repulsive_power: config.repulsive_power,
            attractive_power: config.attractive_power,
        }
    }

    /// Creates a force from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field reported by `LennardJonesConfig::validate`.
    pub fn with_config(config: LennardJonesConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        let mut force = Self::new();
        force.distance_min2 = config.distance_min * config.distance_min;
        force.distance_max2 = config.distance_max * config.distance_max;
        force.theta2 = config.theta * config.theta;
        force.repulsive_power = config.repulsive_power;
        force.attractive_power = config.attractive_power;
        force.separate_exponents();
        Ok(force)
    }

    /// Current configuration, with distances and theta unsquared.
    pub fn config(&self) -> LennardJonesConfig {
        LennardJonesConfig {
            distance_min: self.distance_min(),
            distance_max: self.distance_max(),
            theta: self.theta(),
            repulsive_power: self.repulsive_power,
            attractive_power: self.attractive_power,
        }
    }

    pub fn strength(&self) -> &StrengthFn {
        self.strength.as_ref()
    }

    /// Replaces the strength rule. Strengths are recomputed before the next evaluation.
    pub fn set_strength<F>(&mut self, rule: F)
    where
        F: Fn(&Particle, usize, &[Particle]) -> f64 + 'static,
    {
        self.strength = Box::new(rule);
        self.stale = true;
    }

    pub fn set_strength_constant(&mut self, strength: f64) {
        self.set_strength(move |_, _, _| strength);
    }

    /// Strength of every particle, indexed by particle index.
    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    pub fn distance_min(&self) -> f64 {
        self.distance_min2.sqrt()
    }

    pub fn set_distance_min(&mut self, distance: f64) -> Result<(), PhysicsError> {
        validate_distance_min(distance)?;
        self.distance_min2 = distance * distance;
        Ok(())
    }

    pub fn distance_max(&self) -> f64 {
        self.distance_max2.sqrt()
    }

    pub fn set_distance_max(&mut self, distance: f64) -> Result<(), PhysicsError> {
        validate_distance_max(distance)?;
        self.distance_max2 = distance * distance;
        Ok(())
    }

    pub fn theta(&self) -> f64 {
        self.theta2.sqrt()
    }

    /// Sets the Barnes-Hut accuracy parameter. Zero disables the approximation.
    pub fn set_theta(&mut self, theta: f64) -> Result<(), PhysicsError> {
        validate_theta(theta)?;
        self.theta2 = theta * theta;
        Ok(())
    }

    pub fn repulsive_power(&self) -> f64 {
        self.repulsive_power
    }

    pub fn set_repulsive_power(&mut self, power: f64) -> Result<(), PhysicsError> {
        validate_exponent(power)?;
        self.repulsive_power = power;
        self.separate_exponents();
        Ok(())
    }

    pub fn attractive_power(&self) -> f64 {
        self.attractive_power
    }

    pub fn set_attractive_power(&mut self, power: f64) -> Result<(), PhysicsError> {
        validate_exponent(power)?;
        self.attractive_power = power;
        self.separate_exponents();
        Ok(())
    }

    /// Equal exponents would zero the (M − N) denominator.
    fn separate_exponents(&mut self) {
        if self.attractive_power == self.repulsive_power {
            self.repulsive_power += 1.0;
            debug!(
                "equal Lennard-Jones exponents, repulsive power raised to {}",
                self.repulsive_power
            );
        }
    }

    /// Pair energy at squared distance `l` for unit strengths.
    pub fn pair_energy(&self, l: f64) -> f64 {
        let (n, m) = (self.repulsive_power, self.attractive_power);
        (n * l.powf(-m / 2.0) - m * l.powf(-n / 2.0)) / (m - n)
    }

    /// Force per unit displacement at squared distance `l` for unit strengths.
    /// Positive values attract.
    pub fn force_prefactor(&self, l: f64) -> f64 {
        let (n, m) = (self.repulsive_power, self.attractive_power);
        m * n / (m - n) * (1.0 - l.powf((n - m) / 2.0)) / l.powf((n + 2.0) / 2.0)
    }

    /// Jitters exactly zero displacement components and softens sub-minimum distances.
    fn soften(&self, dx: &mut f64, dy: &mut f64, l: &mut f64, random: &mut dyn RngCore) {
        if *dx == 0.0 {
            *dx = jiggle(random);
            *l += *dx * *dx;
        }
        if *dy == 0.0 {
            *dy = jiggle(random);
            *l += *dy * *dy;
        }
        if *l < self.distance_min2 {
            *l = (self.distance_min2 * *l).sqrt();
        }
    }

    /// Adds the interaction with charge `w` at displacement `(dx, dy)` and squared distance `l`.
    fn accumulate_pair(&self, contribution: &mut Contribution, l: f64, dx: f64, dy: f64, w: f64, alpha: f64) {
        let prefactor = self.force_prefactor(l);
        contribution.energy += self.pair_energy(l) * w;
        contribution.force_x += prefactor * dx * w * alpha;
        contribution.force_y += prefactor * dy * w * alpha;
    }

    /// Visits one quadrant for the particle at `slot`. Returns true to skip its children.
    fn interact(
        &self,
        node: &QuadNode,
        quad: &Quad,
        slot: usize,
        position: (f64, f64),
        charges: &[f64],
        alpha: f64,
        random: &mut dyn RngCore,
        contribution: &mut Contribution,
    ) -> bool {
        let value = node.aggregate.value;
        if value == 0.0 {
            return true;
        }

        let mut dx = node.aggregate.x - position.0;
        let mut dy = node.aggregate.y - position.1;
        let mut l = dx * dx + dy * dy;
        let w = quad.width();

        // Far enough to treat the whole quadrant as one pseudo-particle.
        if w * w / self.theta2 < l {
            if l < self.distance_max2 {
                self.soften(&mut dx, &mut dy, &mut l, random);
                self.accumulate_pair(contribution, l, dx, dy, value, alpha);
            }
            return true;
        }

        let items = match &node.kind {
            QuadKind::Internal(_) => return false,
            QuadKind::Leaf { items, .. } => items,
        };
        if l >= self.distance_max2 || items.iter().all(|&item| item == slot) {
            return false;
        }

        self.soften(&mut dx, &mut dy, &mut l, random);
        for &item in items.iter().filter(|&&item| item != slot) {
            self.accumulate_pair(contribution, l, dx, dy, charges[item], alpha);
        }
        false
    }
}

/// Rolls a quadrant's charge and centroid up from its children or its coincident items.
fn rollup(node: &QuadNode, quad: &Quad, children: [Option<&QuadNode>; 4], charges: &[f64]) -> Aggregate {
    match &node.kind {
        QuadKind::Internal(_) => {
            let (mut value, mut weight, mut x, mut y) = (0.0, 0.0, 0.0, 0.0);
            for child in children.into_iter().flatten() {
                let c = child.aggregate.value.abs();
                if c > 0.0 {
                    value += child.aggregate.value;
                    weight += c;
                    x += c * child.aggregate.x;
                    y += c * child.aggregate.y;
                }
            }
            if weight > 0.0 {
                Aggregate { value, x: x / weight, y: y / weight }
            } else {
                Aggregate { value, x: quad.cx, y: quad.cy }
            }
        }
        QuadKind::Leaf { x, y, items } => Aggregate {
            value: items.iter().map(|&item| charges[item]).sum(),
            x: *x,
            y: *y,
        },
    }
}

impl Force for LennardJones {
    fn initialize(&mut self, particles: &[Particle]) {
        let mut strengths = vec![0.0; particles.len()];
        for (i, particle) in particles.iter().enumerate() {
            if let Some(strength) = strengths.get_mut(particle.index) {
                *strength = (self.strength)(particle, i, particles);
            }
        }
        self.strengths = strengths;
        self.stale = false;
        self.separate_exponents();
    }

    fn apply(&mut self, particles: &mut [Particle], alpha: f64, random: &mut dyn RngCore) {
        if self.stale || self.strengths.len() != particles.len() {
            self.initialize(particles);
        }

        let charges: Vec<f64> = particles
            .iter()
            .map(|p| self.strengths.get(p.index).copied().unwrap_or(0.0))
            .collect();

        let mut tree = QuadTree::build(&*particles, |p: &Particle| p.x, |p: &Particle| p.y);
        tree.visit_after(|node, quad, children| rollup(node, quad, children, &charges));

        for slot in 0..particles.len() {
            let position = (particles[slot].x, particles[slot].y);
            let mut contribution = Contribution { energy: SELF_ENERGY, ..Contribution::default() };
            tree.visit(|node, quad| {
                self.interact(node, quad, slot, position, &charges, alpha, &mut *random, &mut contribution)
            });

            let particle = &mut particles[slot];
            particle.energy += contribution.energy;
            particle.force_x += contribution.force_x;
            particle.force_y += contribution.force_y;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
