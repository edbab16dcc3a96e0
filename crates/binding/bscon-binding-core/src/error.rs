//! Error types for configuration loading and binding edits.
//!
//! Nothing on the notification path returns these; they surface only where a
//! configurator or a persistence layer can act on them.

use bscon_api_core::{ActionId, MeshHandle};
use thiserror::Error;

/// Why the engine cannot activate with its current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationAbsent {
    #[error("no input-action asset assigned")]
    NoAsset,
    #[error("input-action asset is not available from the input source")]
    AssetUnavailable,
    #[error("input-action asset has no action maps")]
    NoActionMaps,
    #[error("no character root assigned")]
    NoCharacterRoot,
}

/// Errors produced while loading or saving a persisted engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("engine config parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("serialize engine config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("duplicate binding entry for action {0}")]
    DuplicateAction(ActionId),
    #[error("binding entry for action {action} has non-finite multiplier {value}")]
    InvalidMultiplier { action: ActionId, value: f32 },
}

/// Errors produced by configuration-time edits of the binding set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    #[error("no binding entry for action {0}")]
    UnknownAction(ActionId),
    #[error("mesh {0} is no longer available")]
    StaleMesh(MeshHandle),
    #[error("blend shape index {index} out of range for mesh {mesh} ({count} shapes)")]
    IndexOutOfRange {
        mesh: MeshHandle,
        index: usize,
        count: usize,
    },
    #[error("no blend shape at catalog offset {0}")]
    NoCatalogEntry(usize),
    #[error("multiplier {0} is not finite")]
    InvalidMultiplier(f32),
    #[error(transparent)]
    ConfigurationAbsent(#[from] ConfigurationAbsent),
}
