//! Mesh target contracts and an in-memory mesh table.
//!
//! Meshes are addressed through [`MeshHandle`]s resolved by a [`MeshRegistry`].
//! A handle the registry no longer resolves is stale; callers treat it as absent.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterRoot, HandleAllocator, MeshHandle};

/// Blend-shape weight surface of a skinned mesh.
pub trait MeshTarget {
    fn blend_shape_count(&self) -> usize;
    fn weight(&self, index: usize) -> Option<f32>;
    fn set_weight(&mut self, index: usize, weight: f32);
}

/// Indirection table from handles to live meshes.
pub trait MeshRegistry {
    fn mesh(&self, handle: MeshHandle) -> Option<&dyn MeshTarget>;
    fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut dyn MeshTarget>;
}

/// Description of a mesh under a character root, as offered to a configurator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub handle: MeshHandle,
    /// Transform path relative to the character root, e.g. `Body/Face`.
    pub path: String,
    pub blend_shape_names: Vec<String>,
}

/// Scene lookups needed to build a blend-shape catalog.
pub trait SceneQuery {
    /// Skinned meshes below `root` in hierarchy order, inactive ones included.
    fn skinned_meshes(&self, root: CharacterRoot) -> Vec<MeshInfo>;
}

/// Plain skinned mesh with named blend shapes and a weight slot per shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShapeMesh {
    pub handle: MeshHandle,
    pub root: CharacterRoot,
    pub path: String,
    pub blend_shape_names: Vec<String>,
    #[serde(default)]
    pub weights: Vec<f32>,
    /// Number of weight writes received; diagnostics only.
    #[serde(skip)]
    pub writes: u64,
}

impl BlendShapeMesh {
    pub fn new(
        handle: MeshHandle,
        root: CharacterRoot,
        path: impl Into<String>,
        blend_shape_names: Vec<String>,
    ) -> Self {
        let weights = vec![0.0; blend_shape_names.len()];
        Self {
            handle,
            root,
            path: path.into(),
            blend_shape_names,
            weights,
            writes: 0,
        }
    }

    fn info(&self) -> MeshInfo {
        MeshInfo {
            handle: self.handle,
            path: self.path.clone(),
            blend_shape_names: self.blend_shape_names.clone(),
        }
    }
}

impl MeshTarget for BlendShapeMesh {
    fn blend_shape_count(&self) -> usize {
        self.blend_shape_names.len()
    }

    fn weight(&self, index: usize) -> Option<f32> {
        if index >= self.blend_shape_count() {
            return None;
        }
        Some(self.weights.get(index).copied().unwrap_or(0.0))
    }

    fn set_weight(&mut self, index: usize, weight: f32) {
        if index >= self.blend_shape_count() {
            return;
        }
        if self.weights.len() < self.blend_shape_count() {
            self.weights.resize(self.blend_shape_count(), 0.0);
        }
        self.weights[index] = weight;
        self.writes += 1;
    }
}

/// In-memory scene of blend-shape meshes, in insertion (hierarchy) order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MeshTable {
    #[serde(default)]
    meshes: Vec<BlendShapeMesh>,
    #[serde(skip)]
    ids: HandleAllocator,
}

impl MeshTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh under `root`, returning its freshly allocated handle.
    pub fn insert(
        &mut self,
        root: CharacterRoot,
        path: impl Into<String>,
        blend_shape_names: &[&str],
    ) -> MeshHandle {
        // Deserialized tables carry explicit handles; skip past them.
        let mut handle = self.ids.alloc_mesh();
        while self.get(handle).is_some() {
            handle = self.ids.alloc_mesh();
        }
        let names = blend_shape_names.iter().map(|s| s.to_string()).collect();
        self.meshes
            .push(BlendShapeMesh::new(handle, root, path, names));
        handle
    }

    /// Remove a mesh; its handle becomes stale.
    pub fn remove(&mut self, handle: MeshHandle) -> Option<BlendShapeMesh> {
        let pos = self.meshes.iter().position(|m| m.handle == handle)?;
        Some(self.meshes.remove(pos))
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&BlendShapeMesh> {
        self.meshes.iter().find(|m| m.handle == handle)
    }

    pub fn get_mut(&mut self, handle: MeshHandle) -> Option<&mut BlendShapeMesh> {
        self.meshes.iter_mut().find(|m| m.handle == handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlendShapeMesh> {
        self.meshes.iter()
    }

    /// Total weight writes across all meshes.
    pub fn total_writes(&self) -> u64 {
        self.meshes.iter().map(|m| m.writes).sum()
    }
}

impl MeshRegistry for MeshTable {
    fn mesh(&self, handle: MeshHandle) -> Option<&dyn MeshTarget> {
        self.get(handle).map(|m| m as &dyn MeshTarget)
    }

    fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut dyn MeshTarget> {
        self.get_mut(handle).map(|m| m as &mut dyn MeshTarget)
    }
}

impl SceneQuery for MeshTable {
    fn skinned_meshes(&self, root: CharacterRoot) -> Vec<MeshInfo> {
        self.meshes
            .iter()
            .filter(|m| m.root == root)
            .map(BlendShapeMesh::info)
            .collect()
    }
}
