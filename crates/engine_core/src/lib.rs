//! Core engine types and utilities for Skyharvest.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Pose (position + yaw/pitch orientation) and GPU-ready instance data
//! - Tick clock with timestep sanitizing
//! - Common component types

pub mod components;
pub mod pose;
pub mod time;

pub use components::*;
pub use pose::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
