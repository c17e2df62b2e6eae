use crate::utils::{validate_mass, PhysicsError};
use crate::utils::constants::{INITIAL_ANGLE, INITIAL_RADIUS};

/// A point particle laid out by the simulation.
///
/// Unset coordinates are represented by NaN and resolved when the particle set
/// is initialized: positions land on a golden-angle spiral, velocities and
/// forces become zero and the mass becomes 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Force accumulated during the last evaluation.
    pub force_x: f64,
    pub force_y: f64,
    /// Potential energy accumulated during the last evaluation.
    pub energy: f64,
    pub mass: f64,
    /// Pinned x coordinate; when set the particle cannot move along x.
    pub fx: Option<f64>,
    /// Pinned y coordinate; when set the particle cannot move along y.
    pub fy: Option<f64>,
    /// Position of the particle in its set, assigned on initialization.
    pub index: usize,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            vx: f64::NAN,
            vy: f64::NAN,
            force_x: f64::NAN,
            force_y: f64::NAN,
            energy: 0.0,
            mass: f64::NAN,
            fx: None,
            fy: None,
            index: 0,
        }
    }
}

impl Particle {
    /// Creates a particle at rest at `(x, y)` with unit mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::particles::Particle;
    ///
    /// let particle = Particle::new(1.0, 2.0);
    /// assert_eq!(particle.mass, 1.0);
    /// assert_eq!((particle.vx, particle.vy), (0.0, 0.0));
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            force_x: 0.0,
            force_y: 0.0,
            mass: 1.0,
            ..Self::default()
        }
    }

    /// Creates a particle fixed at `(x, y)`.
    pub fn pinned(x: f64, y: f64) -> Self {
        let mut particle = Self::new(x, y);
        particle.pin(x, y);
        particle
    }

    /// Sets the mass, consuming and returning the particle.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidMass` if `mass` is zero, negative or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_force_layout::particles::Particle;
    /// use rs_force_layout::utils::PhysicsError;
    ///
    /// let heavy = Particle::new(0.0, 0.0).with_mass(4.0).expect("valid mass");
    /// assert_eq!(heavy.mass, 4.0);
    /// assert_eq!(Particle::new(0.0, 0.0).with_mass(-1.0), Err(PhysicsError::InvalidMass));
    /// ```
    pub fn with_mass(mut self, mass: f64) -> Result<Self, PhysicsError> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(self)
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn pin(&mut self, x: f64, y: f64) {
        self.fx = Some(x);
        self.fy = Some(y);
    }

    pub fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() && self.fy.is_some()
    }

    pub fn clear_accumulators(&mut self) {
        self.force_x = 0.0;
        self.force_y = 0.0;
        self.energy = 0.0;
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * (self.vx * self.vx + self.vy * self.vy)
    }

    /// Half-step velocity update. Pinned axes are zeroed and snapped to the pin.
    pub(crate) fn kick(&mut self, dt: f64) {
        match self.fx {
            None => self.vx += 0.5 * self.force_x * dt / self.mass,
            Some(fx) => {
                self.vx = 0.0;
                self.force_x = 0.0;
                self.x = fx;
            }
        }
        match self.fy {
            None => self.vy += 0.5 * self.force_y * dt / self.mass,
            Some(fy) => {
                self.vy = 0.0;
                self.force_y = 0.0;
                self.y = fy;
            }
        }
    }

    /// Damps the velocity by `retention` and moves the particle over `dt`.
    pub(crate) fn drift(&mut self, dt: f64, retention: f64) {
        match self.fx {
            None => {
                self.vx *= retention;
                self.x += dt * self.vx;
            }
            Some(fx) => self.x = fx,
        }
        match self.fy {
            None => {
                self.vy *= retention;
                self.y += dt * self.vy;
            }
            Some(fy) => self.y = fy,
        }
    }
}

/// Assigns indices and resolves unset fields of a freshly supplied particle set.
///
/// # Errors
///
/// Returns `PhysicsError::InvalidMass` if any particle carries a zero, negative
/// or infinite mass. Particles are left untouched in that case.
pub fn initialize_particles(particles: &mut [Particle]) -> Result<(), PhysicsError> {
    for particle in particles.iter() {
        validate_mass(particle.mass)?;
    }

    for (i, particle) in particles.iter_mut().enumerate() {
        particle.index = i;

        if let Some(fx) = particle.fx {
            particle.x = fx;
        }
        if let Some(fy) = particle.fy {
            particle.y = fy;
        }

        if particle.x.is_nan() || particle.y.is_nan() {
            let (x, y) = spiral_position(i);
            particle.x = x;
            particle.y = y;
        }

        if particle.vx.is_nan() || particle.vy.is_nan() {
            particle.vx = 0.0;
            particle.vy = 0.0;
        }

        if particle.force_x.is_nan() || particle.force_y.is_nan() {
            particle.force_x = 0.0;
            particle.force_y = 0.0;
        }

        if particle.mass.is_nan() {
            particle.mass = 1.0;
        }
    }
    Ok(())
}

/// Position of the `i`-th particle on the phyllotaxis spiral used for unplaced particles.
pub fn spiral_position(i: usize) -> (f64, f64) {
    let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
    let angle = i as f64 * INITIAL_ANGLE;
    (radius * angle.cos(), radius * angle.sin())
}
