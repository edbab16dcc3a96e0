//! Identifiers for host objects and a simple allocator for live handles.
//!
//! Hosts compare devices and meshes by identity. Here identity is an explicit
//! handle: two devices sharing a description still carry different handles.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an input action, owned by the input-action asset.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub Uuid);

impl ActionId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Live identity of a connected input device.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DeviceHandle(pub u32);

/// Identity of a skinned mesh, resolved through a [`crate::MeshRegistry`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

impl fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of the character root node whose meshes are offered for binding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CharacterRoot(pub u32);

/// Persisted reference to an input-action asset.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
}

impl AssetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Monotonic allocator for DeviceHandle and MeshHandle.
/// Handles are never reused, so a removed object cannot alias a new one.
#[derive(Default, Debug)]
pub struct HandleAllocator {
    next_device: u32,
    next_mesh: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_device(&mut self) -> DeviceHandle {
        let id = DeviceHandle(self.next_device);
        self.next_device = self.next_device.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_mesh(&mut self) -> MeshHandle {
        let id = MeshHandle(self.next_mesh);
        self.next_mesh = self.next_mesh.wrapping_add(1);
        id
    }
}
