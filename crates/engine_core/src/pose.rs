//! Pose component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Position plus yaw/pitch orientation of an entity.
///
/// Rotation is `Ry(yaw) * Rx(pitch)`. Forward is local -Z, right is +X, up is +Y
/// (right-handed, same convention as the camera).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    /// Rotation around world Y in radians.
    pub yaw: f32,
    /// Rotation around local X in radians.
    pub pitch: f32,
}

impl Pose {
    /// Create a new pose at the given position, facing -Z.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose with position and orientation.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Yaw that makes `forward()` point along the horizontal part of `direction`.
    pub fn yaw_facing(direction: Vec3) -> f32 {
        // Ry(yaw) * -Z = (-sin yaw, 0, -cos yaw)
        (-direction.x).atan2(-direction.z)
    }

    /// Orientation as a quaternion.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Forward projected onto the horizontal plane (ignores pitch).
    pub fn forward_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * -Vec3::Z
    }

    /// Right projected onto the horizontal plane (ignores pitch).
    pub fn right_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }

    /// Translate the pose by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Model matrix for this pose with a uniform scale.
    pub fn to_matrix(&self, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), self.rotation(), self.position)
    }
}

/// Raw pose data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PoseRaw {
    pub model: [[f32; 4]; 4],
}

impl PoseRaw {
    pub fn new(pose: &Pose, scale: f32) -> Self {
        Self {
            model: pose.to_matrix(scale).to_cols_array_2d(),
        }
    }
}

impl From<&Pose> for PoseRaw {
    fn from(pose: &Pose) -> Self {
        Self::new(pose, 1.0)
    }
}
