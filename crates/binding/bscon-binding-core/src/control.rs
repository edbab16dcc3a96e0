//! Control loop: subscription bookkeeping and notification dispatch.
//!
//! Subscriptions are tracked per (action, phase) so that subscribing twice never
//! registers twice with the host, and unsubscribing is symmetric and idempotent.

use bscon_api_core::{
    ActionId, ActionNotification, ActionPhase, DeviceHandle, InputSource, MeshRegistry, WeightWrite,
};
use hashbrown::HashSet;
use log::{debug, trace};

use crate::binding_set::BindingSet;

/// Counters for notifications seen by the loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub received: u64,
    pub dropped_unsubscribed: u64,
    pub dropped_device: u64,
    pub dropped_unbound: u64,
    pub writes: u64,
}

#[derive(Debug, Default)]
pub struct ControlLoop {
    subscribed: HashSet<(ActionId, ActionPhase)>,
    stats: DispatchStats,
}

impl ControlLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe all three phases of each action and arm it.
    pub fn subscribe(
        &mut self,
        actions: impl IntoIterator<Item = ActionId>,
        source: &mut dyn InputSource,
    ) {
        for action in actions {
            for phase in ActionPhase::ALL {
                if self.subscribed.insert((action, phase)) {
                    source.subscribe(action, phase);
                }
            }
            source.enable_action(action);
        }
        debug!("control loop subscribed to {} handlers", self.subscribed.len());
    }

    /// Drop every subscription this loop holds. Calling it again is a no-op.
    pub fn unsubscribe_all(&mut self, source: &mut dyn InputSource) {
        if self.subscribed.is_empty() {
            return;
        }
        let n = self.subscribed.len();
        for (action, phase) in self.subscribed.drain() {
            source.unsubscribe(action, phase);
        }
        debug!("control loop released {} handlers", n);
    }

    pub fn is_subscribed(&self, action: ActionId, phase: ActionPhase) -> bool {
        self.subscribed.contains(&(action, phase))
    }

    pub fn subscription_count(&self) -> usize {
        self.subscribed.len()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Route one notification to its binding. All phases write the same way.
    ///
    /// The notification is dropped unless it comes from `active_device`
    /// (compared by handle) and its action has a binding. At most one write
    /// is produced.
    pub fn dispatch(
        &mut self,
        notification: &ActionNotification,
        active_device: Option<DeviceHandle>,
        bindings: &mut BindingSet,
        meshes: &mut dyn MeshRegistry,
    ) -> Option<WeightWrite> {
        self.stats.received += 1;

        if !self.is_subscribed(notification.action, notification.phase) {
            self.stats.dropped_unsubscribed += 1;
            trace!("drop {:?}: not subscribed", notification.action);
            return None;
        }

        if active_device != Some(notification.device) {
            self.stats.dropped_device += 1;
            trace!(
                "drop {:?}: device {:?} is not the active device {:?}",
                notification.action,
                notification.device,
                active_device
            );
            return None;
        }

        let Some(entry) = bindings.get_mut(notification.action) else {
            self.stats.dropped_unbound += 1;
            trace!("drop {:?}: no binding entry", notification.action);
            return None;
        };

        let write = entry.write(notification.raw_value, meshes);
        if write.is_some() {
            self.stats.writes += 1;
        }
        write
    }
}
