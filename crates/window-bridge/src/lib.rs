//! Host-facing surface of the window engine.
//!
//! One [`WindowContext`] per window instance holds the current parameters,
//! the panel registry and the last layout. Hosts talk to it through tagged
//! JSON messages routed by [`dispatch`].

pub mod context;
pub mod dispatch;
pub mod host;
pub mod messages;
pub mod provider;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use context::{BridgeError, WindowContext};
pub use dispatch::{dispatch, HostServices};
pub use host::{ComponentHost, HostError};
pub use messages::{EngineToHost, HostToEngine};
pub use provider::{resolve_panel_sizes, DimensionProvider, LocalCalculator, ProviderError};
