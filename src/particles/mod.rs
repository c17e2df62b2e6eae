#[cfg(feature = "particles")]
mod particle;
#[cfg(feature = "particles")]
mod particle_quadtree;
#[cfg(feature = "particles")]
mod particle_force;
#[cfg(feature = "particles")]
mod particle_interactions_lennard_jones;
#[cfg(feature = "particles")]
mod particle_simulation;

#[cfg(feature = "particles")]
pub use particle::*;

#[cfg(feature = "particles")]
pub use particle_quadtree::*;

#[cfg(feature = "particles")]
pub use particle_force::*;

#[cfg(feature = "particles")]
pub use particle_interactions_lennard_jones::*;

#[cfg(feature = "particles")]
pub use particle_simulation::*;

#[cfg(test)]
#[cfg(feature = "particles")]
mod particle_quadtree_tests;
