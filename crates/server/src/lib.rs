//! Frame gate server.
//!
//! Serves a Farcaster frame that lets a visitor through only after they
//! have interacted with a target cast. The request flow is:
//!
//! ```text
//! POST /api → FrameActionPayload → GateHandler::render → View → frame HTML
//! ```
//!
//! Everything below the handler (provider calls, requirement evaluation)
//! lives in the `hub-client` and `qualification` crates.

pub mod config;
pub mod frame;
pub mod gate;
pub mod router;
pub mod views;

pub use config::{ConfigError, GateConfig, GateSettings, IndeterminatePolicy, Mode};
pub use frame::{FrameActionPayload, FrameState};
pub use gate::{ENTER_ACTION, GateHandler};
pub use router::{AppState, create_router, serve};
pub use views::{View, ViewContext};
