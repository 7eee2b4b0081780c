//=========================================================================
// Activity Bridge — Library Root
//
// Host adapter between an activity-style application host and a native
// engine runtime.
//
// Responsibilities:
// - Expose the engine call surface (`core::Bridge`)
// - Expose the host activity and its render surface (`core`)
// - Provide the winit-driven host entry point (`Host`)
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use std::sync::Arc;
// use activity_bridge::HostBuilder;
// # use activity_bridge::core::RecordingBridge;
// # let (engine, _calls) = RecordingBridge::new();
//
// HostBuilder::new().build(Arc::new(engine)).run().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent adapter: bridge trait, input
// types, host activity, renderer and render surface. Hosts other than
// the bundled winit platform drive `core::HostActivity` directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit application handler that plays the OS.
//
// `host` defines configuration and the entry point.
//
mod host;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use host::{Host, HostBuilder, HostConfig};
pub use platform::PlatformError;
