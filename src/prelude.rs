//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use activity_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host entry point
pub use crate::host::{Host, HostBuilder, HostConfig};

// Engine boundary
pub use crate::core::bridge::{ActivityHandle, Bridge, BridgeCall, BridgeDispatcher, ChannelBridge};

// Activity
pub use crate::core::activity::{ActivityBase, AudioControl, HostActivity};

// Input
pub use crate::core::input::{keycode, KeyAction, KeyEvent, MotionEvent, PointerSource, RawPointer, TouchAction, TouchSample};
