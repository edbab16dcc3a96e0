//! Engine: owns configuration, the binding set, device selection and the
//! control loop, and drives the enable/disable lifecycle.
//!
//! Methods:
//! - lifecycle: enable, disable, set_asset / set_action_map_index / set_character_root
//! - host notifications: on_action, on_device_change
//! - configuration: select_device, configure_entry, set_multiplier, assign_blend_shape

use bscon_api_core::{
    ActionId, ActionMap, ActionNotification, AssetRef, CharacterRoot, Device,
    DeviceChangeNotification, DeviceDescription, InputSource, MeshHandle, MeshRegistry,
    SceneQuery, WeightWrite,
};
use log::{debug, warn};

use crate::binding_set::{select_map, BindingSet};
use crate::catalog::BlendShapeCatalog;
use crate::config::EngineConfig;
use crate::control::{ControlLoop, DispatchStats};
use crate::entry::BindingEntry;
use crate::error::{BindingError, ConfigError, ConfigurationAbsent};
use crate::selector::{DeviceResolution, DeviceSelector};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Disabled,
    Enabling,
    Enabled,
    Disabling,
}

/// Outcome of an enable or source change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Subscribed and routing notifications for `bindings` actions.
    Active { bindings: usize },
    /// Configuration is incomplete; the engine stays disabled.
    Absent(ConfigurationAbsent),
    /// Source updated while disabled; bindings were resynchronized only.
    Idle,
}

#[derive(Debug)]
pub struct Engine {
    asset: Option<AssetRef>,
    action_map_index: usize,
    character_root: Option<CharacterRoot>,
    selector: DeviceSelector,
    bindings: BindingSet,
    control: ControlLoop,
    state: EngineState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create a disabled engine from a persisted configuration.
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            asset: cfg.asset,
            action_map_index: cfg.action_map_index,
            character_root: cfg.character_root,
            selector: DeviceSelector::new(cfg.device_description),
            bindings: BindingSet::from_entries(cfg.entries),
            control: ControlLoop::new(),
            state: EngineState::Disabled,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        EngineConfig::from_json(s).map(Self::new)
    }

    /// Snapshot of the persisted fields.
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig {
            asset: self.asset.clone(),
            action_map_index: self.action_map_index,
            device_index: self.selector.active().index(),
            device_description: self.selector.description().cloned(),
            character_root: self.character_root,
            entries: self.bindings.entries().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        self.to_config().to_json()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == EngineState::Enabled
    }

    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    pub fn entry(&self, action: ActionId) -> Option<&BindingEntry> {
        self.bindings.get(action)
    }

    pub fn asset(&self) -> Option<&AssetRef> {
        self.asset.as_ref()
    }

    pub fn action_map_index(&self) -> usize {
        self.action_map_index
    }

    pub fn character_root(&self) -> Option<CharacterRoot> {
        self.character_root
    }

    pub fn active_device(&self) -> DeviceResolution {
        self.selector.active()
    }

    pub fn device_description(&self) -> Option<&DeviceDescription> {
        self.selector.description()
    }

    pub fn subscription_count(&self) -> usize {
        self.control.subscription_count()
    }

    pub fn stats(&self) -> DispatchStats {
        self.control.stats()
    }

    fn action_maps<'s>(
        &self,
        source: &'s dyn InputSource,
    ) -> Result<&'s [ActionMap], ConfigurationAbsent> {
        let asset = self.asset.as_ref().ok_or(ConfigurationAbsent::NoAsset)?;
        source
            .action_maps(asset)
            .ok_or(ConfigurationAbsent::AssetUnavailable)
    }

    /// Name of the selected action map (map 0 when the index is out of range).
    pub fn action_map_name(&self, source: &dyn InputSource) -> Option<String> {
        let maps = self.action_maps(source).ok()?;
        select_map(maps, self.action_map_index).map(|(_, m)| m.name.clone())
    }

    /// Resynchronize the binding set with the selected action map.
    ///
    /// Without an asset the stored entries are left untouched; an asset with
    /// no maps empties the set.
    fn rebuild_bindings(
        &mut self,
        source: &dyn InputSource,
    ) -> Result<usize, ConfigurationAbsent> {
        let maps = self.action_maps(source)?;
        match self.bindings.rebuild_from_maps(maps, self.action_map_index) {
            Some(used) => {
                self.action_map_index = used;
                Ok(self.bindings.len())
            }
            None => Err(ConfigurationAbsent::NoActionMaps),
        }
    }

    /// Rebuild bindings, resolve the device and subscribe every bound action.
    ///
    /// Legal while already enabled: prior subscriptions are released first.
    pub fn enable(&mut self, source: &mut dyn InputSource) -> Activation {
        self.control.unsubscribe_all(source);
        self.state = EngineState::Enabling;

        let rebuilt = self.rebuild_bindings(source).and_then(|n| {
            self.character_root
                .map(|_| n)
                .ok_or(ConfigurationAbsent::NoCharacterRoot)
        });
        let bindings = match rebuilt {
            Ok(n) => n,
            Err(reason) => {
                debug!("engine stays disabled: {}", reason);
                self.state = EngineState::Disabled;
                return Activation::Absent(reason);
            }
        };

        self.selector.refresh(source.devices());
        let actions: Vec<ActionId> = self.bindings.action_ids().collect();
        self.control.subscribe(actions, source);

        self.state = EngineState::Enabled;
        debug!("engine enabled with {} bindings", bindings);
        Activation::Active { bindings }
    }

    /// Release all subscriptions. Safe to call in any state.
    pub fn disable(&mut self, source: &mut dyn InputSource) {
        if self.state == EngineState::Disabled && self.control.subscription_count() == 0 {
            return;
        }
        self.state = EngineState::Disabling;
        self.control.unsubscribe_all(source);
        self.state = EngineState::Disabled;
        debug!("engine disabled");
    }

    /// React to a changed source: full re-enable when enabled, otherwise
    /// resynchronize the binding set only.
    fn source_changed(&mut self, source: &mut dyn InputSource) -> Activation {
        if self.is_enabled() {
            return self.enable(source);
        }
        match self.rebuild_bindings(source) {
            Ok(_) => Activation::Idle,
            Err(reason) => Activation::Absent(reason),
        }
    }

    pub fn set_asset(
        &mut self,
        asset: Option<AssetRef>,
        source: &mut dyn InputSource,
    ) -> Activation {
        self.asset = asset;
        self.source_changed(source)
    }

    pub fn set_action_map_index(
        &mut self,
        index: usize,
        source: &mut dyn InputSource,
    ) -> Activation {
        self.action_map_index = index;
        self.source_changed(source)
    }

    pub fn set_character_root(
        &mut self,
        root: Option<CharacterRoot>,
        source: &mut dyn InputSource,
    ) -> Activation {
        self.character_root = root;
        if self.is_enabled() && root.is_none() {
            self.disable(source);
            return Activation::Absent(ConfigurationAbsent::NoCharacterRoot);
        }
        self.source_changed(source)
    }

    /// Choose the device to listen to (`None` = no device) and resolve it now.
    pub fn select_device(
        &mut self,
        description: Option<DeviceDescription>,
        devices: &[Device],
    ) -> DeviceResolution {
        self.selector.select(description, devices)
    }

    /// Device picker labels for the current device list.
    pub fn device_choices(&self, devices: &[Device]) -> Vec<String> {
        self.selector.choices(devices)
    }

    /// Re-resolve the active device after a topology change. Ignored while disabled.
    pub fn on_device_change(
        &mut self,
        notification: DeviceChangeNotification,
        devices: &[Device],
    ) -> DeviceResolution {
        if !self.is_enabled() {
            return self.selector.active();
        }
        debug!(
            "device {:?} changed ({:?}); re-resolving",
            notification.device, notification.change
        );
        self.selector.refresh(devices)
    }

    /// Route an action notification to its binding.
    pub fn on_action(
        &mut self,
        notification: &ActionNotification,
        meshes: &mut dyn MeshRegistry,
    ) -> Option<WeightWrite> {
        if !self.is_enabled() {
            return None;
        }
        self.control.dispatch(
            notification,
            self.selector.active_device(),
            &mut self.bindings,
            meshes,
        )
    }

    /// Bind an action to a mesh slot, validating the slot against the live mesh.
    /// Passing `mesh = None` clears the binding.
    pub fn configure_entry(
        &mut self,
        action: ActionId,
        mesh: Option<MeshHandle>,
        index: usize,
        multiplier: f32,
        meshes: &dyn MeshRegistry,
    ) -> Result<&BindingEntry, BindingError> {
        if !multiplier.is_finite() {
            return Err(BindingError::InvalidMultiplier(multiplier));
        }
        if let Some(handle) = mesh {
            let target = meshes.mesh(handle).ok_or(BindingError::StaleMesh(handle))?;
            let count = target.blend_shape_count();
            if index >= count {
                return Err(BindingError::IndexOutOfRange {
                    mesh: handle,
                    index,
                    count,
                });
            }
        }
        let entry = self
            .bindings
            .get_mut(action)
            .ok_or(BindingError::UnknownAction(action))?;
        entry.mesh = mesh;
        entry.index = if mesh.is_some() { index } else { 0 };
        entry.multiplier = multiplier;
        if mesh.is_none() {
            entry.name.clear();
        }
        Ok(&*entry)
    }

    pub fn set_multiplier(
        &mut self,
        action: ActionId,
        multiplier: f32,
    ) -> Result<(), BindingError> {
        if !multiplier.is_finite() {
            return Err(BindingError::InvalidMultiplier(multiplier));
        }
        let entry = self
            .bindings
            .get_mut(action)
            .ok_or(BindingError::UnknownAction(action))?;
        entry.multiplier = multiplier;
        Ok(())
    }

    /// Blend shapes offered under the character root.
    pub fn catalog(&self, scene: &dyn SceneQuery) -> Result<BlendShapeCatalog, BindingError> {
        let root = self
            .character_root
            .ok_or(ConfigurationAbsent::NoCharacterRoot)?;
        Ok(BlendShapeCatalog::build(&scene.skinned_meshes(root)))
    }

    /// Bind an action to the catalog option at `offset`, labelling the entry.
    pub fn assign_blend_shape(
        &mut self,
        action: ActionId,
        offset: usize,
        scene: &dyn SceneQuery,
    ) -> Result<&BindingEntry, BindingError> {
        let catalog = self.catalog(scene)?;
        let option = catalog
            .select(offset)
            .ok_or(BindingError::NoCatalogEntry(offset))?;
        let entry = self
            .bindings
            .get_mut(action)
            .ok_or(BindingError::UnknownAction(action))?;
        entry.mesh = Some(option.mesh);
        entry.index = option.index;
        entry.name = option.label.clone();
        Ok(&*entry)
    }

    /// Catalog offset of an action's current binding, if it is listed.
    pub fn catalog_offset(&self, action: ActionId, scene: &dyn SceneQuery) -> Option<usize> {
        let entry = self.bindings.get(action)?;
        let catalog = match self.catalog(scene) {
            Ok(c) => c,
            Err(e) => {
                warn!("catalog unavailable: {}", e);
                return None;
            }
        };
        catalog.offset_of(entry.mesh?, entry.index)
    }

    /// Weight currently shown by the mesh slot bound to `action`.
    pub fn read_weight(&self, action: ActionId, meshes: &dyn MeshRegistry) -> Option<f32> {
        self.bindings.get(action)?.read_weight(meshes)
    }
}
