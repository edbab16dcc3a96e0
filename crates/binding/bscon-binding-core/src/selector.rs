//! Device selection: resolve a persisted description to a live device.

use bscon_api_core::{Device, DeviceDescription, DeviceHandle};
use log::debug;

/// Index reported when no connected device matches.
pub const NO_DEVICE_INDEX: i32 = -1;

/// Result of scanning the device list: slot index plus live handle, or nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceResolution {
    slot: Option<(usize, DeviceHandle)>,
}

impl DeviceResolution {
    pub const NONE: DeviceResolution = DeviceResolution { slot: None };

    /// Position in the host device list, or `-1` when unresolved.
    pub fn index(&self) -> i32 {
        match self.slot {
            Some((i, _)) => i32::try_from(i).unwrap_or(NO_DEVICE_INDEX),
            None => NO_DEVICE_INDEX,
        }
    }

    pub fn device(&self) -> Option<DeviceHandle> {
        self.slot.map(|(_, h)| h)
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.is_some()
    }
}

/// First device in host order whose description matches structurally.
pub fn resolve(description: &DeviceDescription, devices: &[Device]) -> DeviceResolution {
    let slot = devices
        .iter()
        .enumerate()
        .find(|(_, d)| d.description == *description)
        .map(|(i, d)| (i, d.handle));
    DeviceResolution { slot }
}

/// Holds the configured device description and the device it currently resolves to.
///
/// The resolution is never trusted across topology changes; hosts call
/// [`DeviceSelector::refresh`] on each one.
#[derive(Clone, Debug, Default)]
pub struct DeviceSelector {
    description: Option<DeviceDescription>,
    active: DeviceResolution,
}

impl DeviceSelector {
    pub fn new(description: Option<DeviceDescription>) -> Self {
        Self {
            description,
            active: DeviceResolution::NONE,
        }
    }

    pub fn description(&self) -> Option<&DeviceDescription> {
        self.description.as_ref()
    }

    pub fn active(&self) -> DeviceResolution {
        self.active
    }

    #[inline]
    pub fn active_device(&self) -> Option<DeviceHandle> {
        self.active.device()
    }

    /// Replace the configured description (`None` = no device) and resolve it.
    pub fn select(
        &mut self,
        description: Option<DeviceDescription>,
        devices: &[Device],
    ) -> DeviceResolution {
        self.description = description;
        self.refresh(devices)
    }

    /// Re-resolve the configured description against the current device list.
    pub fn refresh(&mut self, devices: &[Device]) -> DeviceResolution {
        self.active = match &self.description {
            Some(desc) => resolve(desc, devices),
            None => DeviceResolution::NONE,
        };
        match self.active.device() {
            Some(handle) => debug!(
                "device resolved to {:?} at index {}",
                handle,
                self.active.index()
            ),
            None => debug!("no device bound"),
        }
        self.active
    }

    /// Display labels for a device picker. A leading "default" entry is
    /// offered while no device is bound.
    pub fn choices(&self, devices: &[Device]) -> Vec<String> {
        let names = devices.iter().map(|d| d.name.replace('/', " "));
        if self.active.is_resolved() {
            names.collect()
        } else {
            std::iter::once("default".to_string()).chain(names).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(handle: u32, product: &str) -> Device {
        Device {
            handle: DeviceHandle(handle),
            name: format!("Vendor/{product}"),
            description: DeviceDescription::new("HID", "Vendor", product),
        }
    }

    #[test]
    fn resolve_picks_matching_slot() {
        let devices = vec![dev(10, "Pad"), dev(11, "Midi")];
        let r = resolve(&devices[1].description, &devices);
        assert_eq!(r.index(), 1);
        assert_eq!(r.device(), Some(DeviceHandle(11)));
    }

    #[test]
    fn resolve_returns_first_structural_match() {
        let devices = vec![dev(3, "Pad"), dev(4, "Pad")];
        let r = resolve(&DeviceDescription::new("HID", "Vendor", "Pad"), &devices);
        assert_eq!(r.index(), 0);
        assert_eq!(r.device(), Some(DeviceHandle(3)));
    }

    #[test]
    fn empty_device_list_is_unresolved() {
        let r = resolve(&DeviceDescription::new("HID", "Vendor", "Pad"), &[]);
        assert_eq!(r.index(), NO_DEVICE_INDEX);
        assert_eq!(r.device(), None);
    }

    #[test]
    fn resolve_is_idempotent() {
        let devices = vec![dev(1, "Pad"), dev(2, "Midi")];
        let desc = DeviceDescription::new("HID", "Vendor", "Midi");
        assert_eq!(resolve(&desc, &devices), resolve(&desc, &devices));
    }

    #[test]
    fn refresh_tracks_unplug_and_replug() {
        let mut sel = DeviceSelector::default();
        let mut devices = vec![dev(1, "Pad"), dev(2, "Midi")];
        sel.select(Some(devices[1].description.clone()), &devices);
        assert_eq!(sel.active_device(), Some(DeviceHandle(2)));

        devices.pop();
        assert!(!sel.refresh(&devices).is_resolved());
        assert!(sel.description().is_some(), "description survives unplug");

        devices.push(dev(7, "Midi"));
        assert_eq!(sel.refresh(&devices).device(), Some(DeviceHandle(7)));
    }

    #[test]
    fn choices_offer_default_only_while_unbound() {
        let devices = vec![dev(1, "Pad")];
        let mut sel = DeviceSelector::default();
        assert_eq!(sel.choices(&devices), vec!["default", "Vendor Pad"]);
        sel.select(Some(devices[0].description.clone()), &devices);
        assert_eq!(sel.choices(&devices), vec!["Vendor Pad"]);
    }
}
