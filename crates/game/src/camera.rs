//! Follow camera: a view pose that trails the controlled entity.

use bytemuck::{Pod, Zeroable};
use engine_core::Pose;
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::config::CameraConfig;

/// Camera placement handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Camera that eases toward a rig point attached to the entity.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    position: Vec3,
    rotation: Quat,
    /// Rig offset in the entity's local frame.
    offset: Vec3,
    follow_factor: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl FollowCamera {
    /// Camera already sitting at its goal behind `target`.
    pub fn new(config: &CameraConfig, target: &Pose) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            offset: config.offset(),
            follow_factor: config.follow_factor.clamp(0.0, 1.0),
            fov_degrees: config.fov_degrees,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        };
        camera.snap_to(target);
        camera
    }

    fn goal(&self, target: &Pose) -> CameraPose {
        let rotation = target.rotation();
        CameraPose {
            position: target.position + rotation * self.offset,
            rotation,
        }
    }

    /// Jump straight to the goal pose.
    pub fn snap_to(&mut self, target: &Pose) {
        let goal = self.goal(target);
        self.position = goal.position;
        self.rotation = goal.rotation;
    }

    /// Ease one tick toward the goal pose.
    pub fn follow(&mut self, target: &Pose) {
        let goal = self.goal(target);
        self.position = self.position.lerp(goal.position, self.follow_factor);
        self.rotation = self.rotation.slerp(goal.rotation, self.follow_factor).normalize();
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Ray from the camera through a point in normalized device coordinates
    /// (+y up). Returns `(origin, unit direction)`.
    pub fn screen_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let tan_half = (self.fov_degrees.to_radians() * 0.5).tan();
        let local = Vec3::new(ndc.x * tan_half * self.aspect, ndc.y * tan_half, -1.0);
        (self.position, (self.rotation * local).normalize())
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl From<&FollowCamera> for CameraUniform {
    fn from(camera: &FollowCamera) -> Self {
        let p = camera.position();
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            position: [p.x, p.y, p.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn starts_on_rig_point() {
        let target = Pose::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        let camera = FollowCamera::new(&CameraConfig::default(), &target);
        assert!(close(camera.position(), Vec3::new(1.0, 5.0, 13.0)));
        assert!(close(camera.forward(), -Vec3::Z));
    }

    #[test]
    fn rig_offset_turns_with_entity() {
        let mut camera = FollowCamera::new(&CameraConfig::default(), &Pose::default());
        camera.snap_to(&Pose::new(Vec3::ZERO, -FRAC_PI_2, 0.0));
        // Facing +X, "behind" is -X.
        assert!(close(camera.position(), Vec3::new(-10.0, 3.0, 0.0)));
        assert!(close(camera.forward(), Vec3::X));
    }

    #[test]
    fn follow_eases_by_factor() {
        let mut camera = FollowCamera::new(&CameraConfig::default(), &Pose::default());
        let start = camera.position();
        let target = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
        camera.follow(&target);
        assert!(close(camera.position(), start + Vec3::new(1.0, 0.0, 0.0)));
        for _ in 0..200 {
            camera.follow(&target);
        }
        assert!(close(camera.position(), Vec3::new(10.0, 3.0, 10.0)));
    }

    #[test]
    fn first_person_is_rigid() {
        let mut camera = FollowCamera::new(&CameraConfig::first_person(), &Pose::default());
        let target = Pose::new(Vec3::new(4.0, 1.5, -2.0), 0.3, -0.2);
        camera.follow(&target);
        assert!(close(camera.position(), target.position));
        assert!(close(camera.forward(), target.forward()));
    }

    #[test]
    fn center_ray_matches_forward() {
        let target = Pose::new(Vec3::new(0.0, 1.5, 0.0), 0.7, 0.1);
        let camera = FollowCamera::new(&CameraConfig::first_person(), &target);
        let (origin, direction) = camera.screen_ray(Vec2::ZERO);
        assert!(close(origin, target.position));
        assert!(close(direction, target.forward()));
    }

    #[test]
    fn edge_ray_spans_half_fov() {
        let mut camera = FollowCamera::new(&CameraConfig::first_person(), &Pose::default());
        camera.set_aspect(100, 100);
        let (_, up_edge) = camera.screen_ray(Vec2::new(0.0, 1.0));
        let angle = up_edge.angle_between(-Vec3::Z);
        assert!((angle - 37.5f32.to_radians()).abs() < 1e-4);
        assert!(up_edge.y > 0.0);
    }

    #[test]
    fn view_matrix_maps_camera_to_origin() {
        let camera = FollowCamera::new(&CameraConfig::default(), &Pose::new(Vec3::new(3.0, 0.0, 0.0), 0.5, 0.0));
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(close(eye, Vec3::ZERO));
        let ahead = camera.view_matrix().transform_point3(camera.position() + camera.forward());
        assert!(close(ahead, -Vec3::Z));
    }

    #[test]
    fn uniform_packs_view_projection_and_eye() {
        let camera = FollowCamera::new(&CameraConfig::default(), &Pose::new(Vec3::new(3.0, 0.0, 0.0), 0.5, 0.0));
        let uniform = CameraUniform::from(&camera);
        assert_eq!(Mat4::from_cols_array_2d(&uniform.view_proj), camera.view_projection_matrix());
        assert_eq!(uniform.position[..3], camera.position().to_array());
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 80);
    }
}
