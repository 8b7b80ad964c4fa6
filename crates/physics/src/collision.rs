//! Target groups and query filtering.

use rapier3d::prelude::*;

/// Collision groups for the collectible tiers.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGroup {
    /// Ground-level cubes
    Cube = 1 << 0,
    /// Planets (usually orbiting)
    Planet = 1 << 1,
    /// Suns (orbit centers)
    Sun = 1 << 2,
}

impl TargetGroup {
    /// Bit for this group.
    pub fn bits(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Every target group.
    pub fn all() -> Group {
        Self::Cube.bits() | Self::Planet.bits() | Self::Sun.bits()
    }

    /// Groups for a collider of this tier: member of its own group, visible to any query.
    pub fn collider_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.bits(), Group::ALL)
    }

    /// Groups for a ray query that should only see `targets`.
    pub fn query_groups(targets: Group) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, targets)
    }
}
