#![allow(dead_code)]
//! In-memory input host backed by the `face-rig` fixtures.

use bscon_binding::api::{
    ActionId, ActionMap, ActionNotification, ActionPhase, AssetRef, Device, DeviceHandle,
    InputSource, MeshTable,
};
use bscon_binding::Engine;
use bscon_test_fixtures::{configs, hosts, scenes};
use serde::Deserialize;
use uuid::Uuid;

pub const JAW: &str = "0a000000-0000-4000-8000-000000000001";
pub const SMILE: &str = "0a000000-0000-4000-8000-000000000002";
pub const BLINK: &str = "0a000000-0000-4000-8000-000000000003";
pub const LEAN: &str = "0a000000-0000-4000-8000-000000000010";
pub const RETIRED: &str = "0a000000-0000-4000-8000-000000000099";

pub const KEYBOARD: DeviceHandle = DeviceHandle(1);
pub const MIDI: DeviceHandle = DeviceHandle(2);

pub fn id(s: &str) -> ActionId {
    ActionId(Uuid::parse_str(s).expect("valid uuid"))
}

#[derive(Debug, Deserialize)]
pub struct AssetFixture {
    pub asset: AssetRef,
    pub maps: Vec<ActionMap>,
}

#[derive(Debug, Deserialize)]
pub struct TestHost {
    pub assets: Vec<AssetFixture>,
    pub devices: Vec<Device>,
    #[serde(skip)]
    pub subscriptions: Vec<(ActionId, ActionPhase)>,
    #[serde(skip)]
    pub armed: Vec<ActionId>,
}

impl TestHost {
    pub fn face_rig() -> Self {
        hosts::load("face-rig").expect("face-rig host fixture")
    }

    pub fn asset(&self, name: &str) -> AssetRef {
        self.assets
            .iter()
            .find(|a| a.asset.name == name)
            .map(|a| a.asset.clone())
            .expect("asset in fixture")
    }

    pub fn handlers_for(&self, action: ActionId) -> usize {
        self.subscriptions.iter().filter(|(a, _)| *a == action).count()
    }
}

impl InputSource for TestHost {
    fn action_maps(&self, asset: &AssetRef) -> Option<&[ActionMap]> {
        self.assets
            .iter()
            .find(|a| a.asset.id == asset.id)
            .map(|a| a.maps.as_slice())
    }

    fn devices(&self) -> &[Device] {
        &self.devices
    }

    fn subscribe(&mut self, action: ActionId, phase: ActionPhase) {
        self.subscriptions.push((action, phase));
    }

    fn unsubscribe(&mut self, action: ActionId, phase: ActionPhase) {
        if let Some(pos) = self.subscriptions.iter().position(|s| *s == (action, phase)) {
            self.subscriptions.remove(pos);
        }
    }

    fn enable_action(&mut self, action: ActionId) {
        self.armed.push(action);
    }
}

pub fn scene() -> MeshTable {
    scenes::load("face-rig").expect("face-rig scene fixture")
}

pub fn engine() -> Engine {
    Engine::from_json(&configs::json("face-rig").expect("config json")).expect("valid config")
}

pub fn note(action: &str, device: DeviceHandle, raw_value: f32) -> ActionNotification {
    ActionNotification {
        action: id(action),
        phase: ActionPhase::Performed,
        device,
        raw_value,
    }
}
