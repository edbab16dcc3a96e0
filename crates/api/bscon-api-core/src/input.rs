//! Input contracts: action maps, value notifications, and the host input source.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::ids::{ActionId, AssetRef, DeviceHandle};

/// A named logical input with a stable id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputAction {
    pub id: ActionId,
    pub name: String,
}

/// Ordered list of actions; order is the declared order of the asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMap {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<InputAction>,
}

/// Notification phases delivered per action.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionPhase {
    Started,
    Performed,
    Canceled,
}

impl ActionPhase {
    pub const ALL: [ActionPhase; 3] = [
        ActionPhase::Started,
        ActionPhase::Performed,
        ActionPhase::Canceled,
    ];
}

/// One value-change notification from the host input layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionNotification {
    pub action: ActionId,
    pub phase: ActionPhase,
    /// Device that produced the control value.
    pub device: DeviceHandle,
    pub raw_value: f32,
}

/// Host input layer as seen by the engine. The engine only reads this surface
/// and registers interest; notifications are pushed back by the host.
pub trait InputSource {
    /// Action maps of a loaded asset, or `None` when the asset is not available.
    fn action_maps(&self, asset: &AssetRef) -> Option<&[ActionMap]>;

    /// Connected devices in host order.
    fn devices(&self) -> &[Device];

    fn subscribe(&mut self, action: ActionId, phase: ActionPhase);

    /// Removing a subscription that does not exist must be a no-op.
    fn unsubscribe(&mut self, action: ActionId, phase: ActionPhase);

    /// Arm an action so the host starts producing notifications for it.
    fn enable_action(&mut self, _action: ActionId) {}
}
