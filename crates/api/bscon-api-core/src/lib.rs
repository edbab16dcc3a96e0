//! bscon-api-core: host-facing contracts for the blend-shape controller (engine-agnostic)
//!
//! The binding engine never talks to a concrete input system or renderer. Hosts
//! implement the traits in this crate ([`InputSource`], [`MeshRegistry`],
//! [`SceneQuery`]) and forward their notifications into the engine.

pub mod device;
pub mod ids;
pub mod input;
pub mod mesh;
pub mod write_ops;

pub use device::{Device, DeviceChange, DeviceChangeNotification, DeviceDescription};
pub use ids::{ActionId, AssetRef, CharacterRoot, DeviceHandle, HandleAllocator, MeshHandle};
pub use input::{ActionMap, ActionNotification, ActionPhase, InputAction, InputSource};
pub use mesh::{BlendShapeMesh, MeshInfo, MeshRegistry, MeshTable, MeshTarget, SceneQuery};
pub use write_ops::{WeightWrite, WriteBatch};
