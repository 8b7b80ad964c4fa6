//! Read-only frame state for the renderer.

use engine_core::{Pose, PoseRaw};

use crate::camera::{CameraPose, CameraUniform};
use crate::collectible::Category;
use crate::registry::CollectibleView;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub player: Pose,
    pub camera: CameraPose,
    /// Camera matrices ready for a uniform buffer.
    pub camera_uniform: CameraUniform,
    pub collectibles: Vec<CollectibleView>,
}

impl RenderSnapshot {
    /// Model matrices of all collectibles, in registration order.
    pub fn instances(&self) -> Vec<PoseRaw> {
        self.collectibles
            .iter()
            .map(|view| PoseRaw::new(&Pose::from_position(view.position), view.scale))
            .collect()
    }

    /// Model matrices of one category, e.g. for a per-mesh draw call.
    pub fn instances_of(&self, category: Category) -> Vec<PoseRaw> {
        self.collectibles
            .iter()
            .filter(|view| view.category == category)
            .map(|view| PoseRaw::new(&Pose::from_position(view.position), view.scale))
            .collect()
    }

    /// Instance data as raw bytes for a vertex buffer upload.
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }

    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera_uniform)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &CollectibleView> {
        self.collectibles.iter().filter(|view| view.highlighted)
    }
}
