//! Ordered set of binding entries, one per action of the selected action map.
//!
//! Rebuilding keeps user configuration: entries are matched to actions by id,
//! never by position.

use bscon_api_core::{ActionId, ActionMap, InputAction};
use hashbrown::HashMap;
use log::{debug, warn};

use crate::entry::BindingEntry;

/// Pick the action map at `index`, falling back to map 0 when out of range.
/// Returns the index actually used.
pub fn select_map(maps: &[ActionMap], index: usize) -> Option<(usize, &ActionMap)> {
    if let Some(map) = maps.get(index) {
        return Some((index, map));
    }
    let map = maps.first()?;
    warn!(
        "action map index {} out of range ({} maps); falling back to 0",
        index,
        maps.len()
    );
    Some((0, map))
}

#[derive(Clone, Debug, Default)]
pub struct BindingSet {
    actions: Vec<InputAction>,
    entries: Vec<BindingEntry>,
    by_action: HashMap<ActionId, usize>,
}

impl BindingSet {
    /// Build a set from persisted entries. Actions are unknown until the first rebuild.
    pub fn from_entries(entries: Vec<BindingEntry>) -> Self {
        let mut set = Self {
            actions: Vec::new(),
            entries,
            by_action: HashMap::new(),
        };
        set.reindex();
        set
    }

    fn reindex(&mut self) {
        self.by_action.clear();
        for (i, e) in self.entries.iter().enumerate() {
            self.by_action.entry(e.action).or_insert(i);
        }
    }

    /// Re-synchronize with `actions`, in their declared order.
    ///
    /// Entries whose action is still present are kept as-is; new actions get an
    /// inert entry; entries for vanished actions are dropped. An action id listed
    /// twice is bound once.
    pub fn rebuild(&mut self, actions: &[InputAction]) -> &[BindingEntry] {
        let mut previous: HashMap<ActionId, BindingEntry> = self
            .entries
            .drain(..)
            .map(|e| (e.action, e))
            .collect();

        self.actions.clear();
        self.by_action.clear();
        for action in actions {
            if self.by_action.contains_key(&action.id) {
                continue;
            }
            let entry = previous
                .remove(&action.id)
                .unwrap_or_else(|| BindingEntry::inert(action.id));
            self.by_action.insert(action.id, self.entries.len());
            self.entries.push(entry);
            self.actions.push(action.clone());
        }

        debug!(
            "binding set rebuilt: {} entries ({} dropped)",
            self.entries.len(),
            previous.len()
        );
        &self.entries
    }

    /// Rebuild from the map at `index` (see [`select_map`]). With no usable map
    /// the set becomes empty. Returns the map index actually used.
    pub fn rebuild_from_maps(&mut self, maps: &[ActionMap], index: usize) -> Option<usize> {
        match select_map(maps, index) {
            Some((used, map)) => {
                self.rebuild(&map.actions);
                Some(used)
            }
            None => {
                self.rebuild(&[]);
                None
            }
        }
    }

    pub fn get(&self, action: ActionId) -> Option<&BindingEntry> {
        self.by_action.get(&action).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, action: ActionId) -> Option<&mut BindingEntry> {
        let i = *self.by_action.get(&action)?;
        self.entries.get_mut(i)
    }

    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }

    /// Actions of the last rebuild, parallel to [`BindingSet::entries`].
    pub fn actions(&self) -> &[InputAction] {
        &self.actions
    }

    pub fn action_name(&self, action: ActionId) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.id == action)
            .map(|a| a.name.as_str())
    }

    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.entries.iter().map(|e| e.action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<BindingEntry> {
        self.entries
    }
}
