//! bscon binding engine (engine-agnostic)
//!
//! Maps input-action values onto blend-shape weights of skinned meshes:
//! host notification → device filter → binding lookup → `raw * multiplier`
//! written into the bound slot.
//!
//! The engine is single-threaded and callback driven. Hosts must deliver
//! action and device notifications sequentially; a host with a multi-threaded
//! input layer should funnel them through one owner (e.g. `Mutex<Engine>` or a
//! single-consumer queue).

pub mod binding_set;
pub mod catalog;
pub mod config;
pub mod control;
pub mod engine;
pub mod entry;
pub mod error;
pub mod selector;

pub use binding_set::{select_map, BindingSet};
pub use catalog::{BlendShapeCatalog, CatalogOption};
pub use config::EngineConfig;
pub use control::{ControlLoop, DispatchStats};
pub use engine::{Activation, Engine, EngineState};
pub use entry::{BindingEntry, DEFAULT_MULTIPLIER};
pub use error::{BindingError, ConfigError, ConfigurationAbsent};
pub use selector::{resolve, DeviceResolution, DeviceSelector, NO_DEVICE_INDEX};

pub use bscon_api_core as api;
