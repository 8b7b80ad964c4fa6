//! Hit testing for collectibles using Rapier3D's query pipeline.
//!
//! There is no dynamics here: every collectible owns one parentless collider whose
//! translation is synced by the game, and ray queries pick targets.

pub mod collision;
pub mod hit_world;
pub mod raycast;

pub use collision::*;
pub use hit_world::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, Group};
