pub mod constants;
pub mod constants_config;
pub mod errors;
pub mod random;

pub use constants_config::*;
pub use errors::PhysicsError;
pub use random::*;

#[cfg(test)]
mod random_tests;
#[cfg(test)]
mod constants_config_tests;
