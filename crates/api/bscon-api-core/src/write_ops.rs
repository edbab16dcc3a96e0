//! Weight writes performed by the engine against mesh targets.
//!
//! WeightWrite serializes to JSON as:
//!   { "action": "<uuid>", "mesh": 3, "index": 1, "weight": 50.0 }
//!
//! WriteBatch is a simple Vec<WeightWrite> with helpers; hosts use it to mirror
//! writes to other consumers (recording, network sync, inspector readouts).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, MeshHandle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightWrite {
    pub action: ActionId,
    pub mesh: MeshHandle,
    pub index: usize,
    pub weight: f32,
}

impl fmt::Display for WeightWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ action: {}, mesh: {}, index: {}, weight: {} }}",
            self.action, self.mesh, self.index, self.weight
        )
    }
}

/// A batch of weight writes, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch(pub Vec<WeightWrite>);

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch(Vec::new())
    }

    pub fn push(&mut self, op: WeightWrite) {
        self.0.push(op);
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = WeightWrite>) {
        self.0.extend(other);
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightWrite> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent write for a given slot, if any.
    pub fn last_for(&self, mesh: MeshHandle, index: usize) -> Option<&WeightWrite> {
        self.0
            .iter()
            .rev()
            .find(|w| w.mesh == mesh && w.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn weight_write_json_shape() {
        let op = WeightWrite {
            action: ActionId(Uuid::nil()),
            mesh: MeshHandle(3),
            index: 1,
            weight: 50.0,
        };
        let j = serde_json::to_value(op).unwrap();
        assert_eq!(j["mesh"], 3);
        assert_eq!(j["index"], 1);
        assert_eq!(j["weight"], 50.0);
        assert!(j["action"].is_string());
    }

    #[test]
    fn last_for_returns_latest_slot_write() {
        let action = ActionId(Uuid::nil());
        let mut b = WriteBatch::new();
        b.push(WeightWrite { action, mesh: MeshHandle(0), index: 0, weight: 10.0 });
        b.push(WeightWrite { action, mesh: MeshHandle(0), index: 1, weight: 20.0 });
        b.push(WeightWrite { action, mesh: MeshHandle(0), index: 0, weight: 30.0 });
        assert_eq!(b.last_for(MeshHandle(0), 0).map(|w| w.weight), Some(30.0));
        assert!(b.last_for(MeshHandle(1), 0).is_none());
    }
}
