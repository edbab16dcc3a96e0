//! A single action → blend-shape binding and its weight write.

use bscon_api_core::{ActionId, MeshHandle, MeshRegistry, WeightWrite};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Multiplier mapping a normalized [0, 1] control value onto the 0–100 weight scale.
pub const DEFAULT_MULTIPLIER: f32 = 100.0;

fn default_multiplier() -> f32 {
    DEFAULT_MULTIPLIER
}

/// Binds one action to one blend-shape slot on a mesh.
///
/// An entry without a mesh is inert: writes still update `last_value` but touch
/// nothing else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub action: ActionId,
    /// Display label of the bound blend shape (`<transform path>/<shape name>`).
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mesh: Option<MeshHandle>,
    #[serde(default)]
    pub index: usize,
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
    /// Last computed weight. Derived; carried for display only.
    #[serde(default)]
    last_value: f32,
}

impl BindingEntry {
    /// Fresh entry for an action that has no binding yet.
    pub fn inert(action: ActionId) -> Self {
        Self {
            action,
            name: String::new(),
            mesh: None,
            index: 0,
            multiplier: DEFAULT_MULTIPLIER,
            last_value: 0.0,
        }
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.mesh.is_none()
    }

    #[inline]
    pub fn last_value(&self) -> f32 {
        self.last_value
    }

    /// Scale `raw_value` by the multiplier and push it into the bound slot.
    ///
    /// Returns the write that reached the mesh, or `None` when the entry is
    /// inert, its mesh has gone away, or the slot no longer exists. A mesh that
    /// the registry cannot resolve is dropped from the entry.
    pub fn write(&mut self, raw_value: f32, meshes: &mut dyn MeshRegistry) -> Option<WeightWrite> {
        self.last_value = raw_value * self.multiplier;
        let handle = self.mesh?;

        let Some(mesh) = meshes.mesh_mut(handle) else {
            debug!(
                "binding for action {} lost mesh {}; entry is now inert",
                self.action, handle
            );
            self.mesh = None;
            return None;
        };

        let count = mesh.blend_shape_count();
        if self.index >= count {
            warn!(
                "skipping write for action {}: blend shape {} out of range on mesh {} ({} shapes)",
                self.action, self.index, handle, count
            );
            return None;
        }

        mesh.set_weight(self.index, self.last_value);
        Some(WeightWrite {
            action: self.action,
            mesh: handle,
            index: self.index,
            weight: self.last_value,
        })
    }

    /// Current weight of the bound slot as reported by the mesh.
    pub fn read_weight(&self, meshes: &dyn MeshRegistry) -> Option<f32> {
        let mesh = meshes.mesh(self.mesh?)?;
        mesh.weight(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bscon_api_core::{CharacterRoot, MeshTable};
    use uuid::Uuid;

    fn action() -> ActionId {
        ActionId(Uuid::from_u128(7))
    }

    #[test]
    fn write_scales_by_multiplier() {
        let mut table = MeshTable::new();
        let face = table.insert(CharacterRoot(0), "Face", &["Jaw", "Smile"]);
        let mut entry = BindingEntry::inert(action());
        entry.mesh = Some(face);
        entry.index = 1;

        let w = entry.write(0.5, &mut table).expect("write reaches mesh");
        assert_eq!(entry.last_value(), 50.0);
        assert_eq!(w.weight, 50.0);
        assert_eq!(w.index, 1);
        assert_eq!(table.get(face).unwrap().weights[1], 50.0);
        assert_eq!(entry.read_weight(&table), Some(50.0));
    }

    #[test]
    fn inert_entry_records_value_without_mesh_call() {
        let mut table = MeshTable::new();
        let _face = table.insert(CharacterRoot(0), "Face", &["Jaw"]);
        let mut entry = BindingEntry::inert(action());
        entry.multiplier = 80.0;

        assert!(entry.write(0.8, &mut table).is_none());
        assert!((entry.last_value() - 0.8 * 80.0).abs() < 1e-5);
        assert_eq!(table.total_writes(), 0);
        assert_eq!(entry.read_weight(&table), None);
    }

    #[test]
    fn stale_mesh_makes_entry_inert() {
        let mut table = MeshTable::new();
        let face = table.insert(CharacterRoot(0), "Face", &["Jaw"]);
        let mut entry = BindingEntry::inert(action());
        entry.mesh = Some(face);
        table.remove(face);

        assert!(entry.write(1.0, &mut table).is_none());
        assert!(entry.is_inert());
        assert_eq!(entry.last_value(), 100.0);
    }

    #[test]
    fn out_of_range_index_is_skipped() {
        let mut table = MeshTable::new();
        let face = table.insert(CharacterRoot(0), "Face", &["Jaw"]);
        let mut entry = BindingEntry::inert(action());
        entry.mesh = Some(face);
        entry.index = 4;

        assert!(entry.write(0.25, &mut table).is_none());
        assert_eq!(entry.mesh, Some(face), "range errors keep the binding");
        assert_eq!(table.total_writes(), 0);
    }

    #[test]
    fn missing_fields_take_defaults_on_load() {
        let json = serde_json::json!({ "action": "00000000-0000-0000-0000-000000000007" });
        let entry: BindingEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry, BindingEntry::inert(action()));
    }
}
