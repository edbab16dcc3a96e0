//! Device descriptors and topology notifications.

use serde::{Deserialize, Serialize};

use crate::ids::DeviceHandle;

/// Structural metadata identifying a device independent of its connection slot.
///
/// Persisted so a device can be found again after it reconnects. Two
/// descriptions match when every field is equal.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDescription {
    pub interface_name: String,
    pub device_class: String,
    pub manufacturer: String,
    pub product: String,
    pub serial: String,
    pub version: String,
    pub capabilities: String,
}

impl DeviceDescription {
    /// Convenience constructor for the fields hosts usually fill in.
    pub fn new(
        interface_name: impl Into<String>,
        manufacturer: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            interface_name: interface_name.into(),
            manufacturer: manufacturer.into(),
            product: product.into(),
            ..Self::default()
        }
    }
}

/// A connected device as exposed by the host input layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub handle: DeviceHandle,
    pub name: String,
    pub description: DeviceDescription,
}

/// Kind of device-topology change reported by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DeviceChange {
    Added,
    Removed,
    Disconnected,
    Reconnected,
    Enabled,
    Disabled,
    UsageChanged,
    ConfigurationChanged,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceChangeNotification {
    pub device: DeviceHandle,
    pub change: DeviceChange,
}
