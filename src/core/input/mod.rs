//=========================================================================
// Input
//=========================================================================
//
// Host input types: motion events and their classification, per-event
// touch samples, and key events.
//
// Event Flow:
// ```text
// Host (winit / native view)
//         ↓
//    MotionEvent / KeyEvent
//         ↓
//    HostActivity::on_touch → TouchSample → Bridge::on_touches_*
//    HostActivity::on_key_* → Bridge::on_key_*
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod key;
pub mod motion;
pub mod touch;

//=== Public API ==========================================================

pub use key::{keycode, meta, KeyAction, KeyEvent};
pub use motion::{action, MotionEvent, PointerSource, RawPointer, TouchAction};
pub use touch::{TouchError, TouchPoint, TouchSample};
