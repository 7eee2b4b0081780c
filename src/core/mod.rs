//=========================================================================
// Core
//=========================================================================
//
// Platform-independent adapter logic.
//
// Architecture:
// ```text
//   Host callbacks
//        │
//        ├─ lifecycle / touch / key ──> HostActivity ──┐
//        │                                             ├──> Bridge
//        └─ surface events ──> RenderSurface           │
//                                  └─ render thread ───┘
//                                       └─ Renderer
// ```
//
// Modules:
// - `bridge`: the engine call surface and its helpers
// - `input`: motion/key event types and touch sampling
// - `activity`: the host activity, its base hooks and audio
// - `render`: renderer, render thread and surface
//
//=========================================================================

//=== Module Declarations =================================================

pub mod activity;
pub mod bridge;
pub mod input;
pub mod render;

//=== Public API ==========================================================

pub use activity::{ActivityBase, AudioControl, AudioDevice, DefaultActivityBase, HostActivity, TouchDispatch};
pub use bridge::{ActivityHandle, Bridge, BridgeCall, BridgeDispatcher, ChannelBridge, RecordingBridge};
pub use input::{KeyAction, KeyEvent, MotionEvent, PointerSource, RawPointer, TouchAction, TouchError, TouchSample};
pub use render::{RenderSurface, Renderer, SurfaceConfig};
