//! Flat catalog of the blend shapes available under a character root.
//!
//! Configurators present one option list across all meshes; an option's
//! offset maps back to a (mesh, index) pair.

use bscon_api_core::{MeshHandle, MeshInfo};

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogOption {
    pub mesh: MeshHandle,
    pub index: usize,
    /// `<transform path>/<shape name>`
    pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct BlendShapeCatalog {
    options: Vec<CatalogOption>,
    // (mesh, first offset, shape count), in catalog order
    spans: Vec<(MeshHandle, usize, usize)>,
}

impl BlendShapeCatalog {
    /// Meshes without blend shapes are left out.
    pub fn build(meshes: &[MeshInfo]) -> Self {
        let mut catalog = Self::default();
        for mesh in meshes.iter().filter(|m| !m.blend_shape_names.is_empty()) {
            catalog
                .spans
                .push((mesh.handle, catalog.options.len(), mesh.blend_shape_names.len()));
            for (index, shape) in mesh.blend_shape_names.iter().enumerate() {
                catalog.options.push(CatalogOption {
                    mesh: mesh.handle,
                    index,
                    label: format!("{}/{}", mesh.path, shape),
                });
            }
        }
        catalog
    }

    /// Flat offset of a binding, if its mesh is listed and the index is in range.
    pub fn offset_of(&self, mesh: MeshHandle, index: usize) -> Option<usize> {
        self.spans
            .iter()
            .find(|(m, _, _)| *m == mesh)
            .filter(|(_, _, count)| index < *count)
            .map(|(_, start, _)| start + index)
    }

    pub fn select(&self, offset: usize) -> Option<&CatalogOption> {
        self.options.get(offset)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }

    pub fn options(&self) -> &[CatalogOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
