//! Procedural generation for the collectible world: in-bounds scattering and
//! star-system layouts (patrolling suns with orbiting planets).

pub mod scatter;
pub mod star_system;

pub use scatter::*;
pub use star_system::*;
