//! Skyharvest game core: a controlled entity flies or walks through a cubic world and
//! collects cubes, planets, and suns for energy and speed.
//!
//! [`Session`] owns all state. Drivers feed it an [`input::InputState`] once per tick
//! and read back a [`RenderSnapshot`] and [`HudState`].

pub mod camera;
pub mod collectible;
pub mod config;
pub mod economy;
pub mod error;
pub mod hud;
pub mod kinematics;
pub mod motion;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod targeting;

pub use camera::{CameraPose, CameraUniform, FollowCamera};
pub use collectible::{Category, CollectibleId, Motion, Orbit, SpawnRequest};
pub use config::{AimMode, ControlMode, GameConfig};
pub use economy::Economy;
pub use error::ConfigError;
pub use hud::HudState;
pub use motion::{MotionController, MotionOutcome};
pub use registry::{CollectibleRegistry, CollectibleView, LoaderHandle};
pub use session::{dependent_requests, Session, SessionEvent, TickReport};
pub use snapshot::RenderSnapshot;
pub use targeting::{Activation, TargetingSystem};
