//=========================================================================
// Bridge Interface
//=========================================================================
//
// The native engine's fixed call surface.
//
// Every host callback ends up as exactly one call on a `Bridge`. The
// trait is the only seam between the adapter and the engine runtime;
// `BridgeCall` is the same surface expressed as data, used wherever a
// call must be recorded or moved across a thread boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyEvent, TouchSample};

//=== ActivityHandle ======================================================

/// Identifies one host activity instance to the bridge.
///
/// Created when the activity is constructed and handed to the bridge
/// exactly once, through [`Bridge::set_activity`], before
/// [`Bridge::on_create`]. The handle never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityHandle {
    id: u64,
}

impl ActivityHandle {
    /// Allocates a process-unique handle.
    pub(crate) fn allocate() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Numeric identifier of the activity instance.
    pub fn id(&self) -> u64 {
        self.id
    }
}

//=== Bridge ==============================================================

/// Outbound call surface of the native engine runtime.
///
/// Lifecycle, touch and key calls arrive on the host's main thread.
/// Surface calls (`on_surface_created`, `on_surface_changed`,
/// `on_draw_frame`) arrive on the render thread, concurrently with the
/// former. The adapter performs no locking between the two, so any
/// synchronization an implementation needs is its own responsibility.
///
/// Calls are treated as infallible. Only the key handlers return a
/// value: `true` means the engine consumed the key.
pub trait Bridge: Send + Sync + 'static {
    //--- Registration -----------------------------------------------------

    /// Receives the handle of the activity that owns this bridge.
    fn set_activity(&self, handle: ActivityHandle);

    //--- Lifecycle --------------------------------------------------------

    fn on_create(&self);
    fn on_start(&self);
    fn on_restart(&self);
    fn on_stop(&self);
    fn on_destroy(&self);
    fn on_pause(&self);
    fn on_resume(&self);

    //--- Touch ------------------------------------------------------------

    /// One or more pointers went down; `action_id` is the new pointer.
    fn on_touches_begin(&self, touches: &TouchSample, action_id: i32);

    /// Pointers moved.
    fn on_touches_move(&self, touches: &TouchSample);

    /// A pointer went up; `action_id` is the lifted pointer.
    fn on_touches_end(&self, touches: &TouchSample, action_id: i32);

    /// The gesture was aborted by the system.
    fn on_touches_cancel(&self, touches: &TouchSample);

    //--- Keys -------------------------------------------------------------

    fn on_key_down(&self, key_code: i32, event: &KeyEvent) -> bool;
    fn on_key_up(&self, key_code: i32, event: &KeyEvent) -> bool;

    //--- Surface (render thread) ------------------------------------------

    fn on_surface_created(&self);
    fn on_surface_changed(&self, width: i32, height: i32);
    fn on_draw_frame(&self);
}

//=== BridgeCall ==========================================================

/// One outbound bridge call as a value.
///
/// Touch calls own their sample so the value can outlive the host
/// callback that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    SetActivity(ActivityHandle),

    Create,
    Start,
    Restart,
    Stop,
    Destroy,
    Pause,
    Resume,

    TouchesBegin { touches: TouchSample, action_id: i32 },
    TouchesMove { touches: TouchSample },
    TouchesEnd { touches: TouchSample, action_id: i32 },
    TouchesCancel { touches: TouchSample },

    KeyDown { key_code: i32, event: KeyEvent },
    KeyUp { key_code: i32, event: KeyEvent },

    SurfaceCreated,
    SurfaceChanged { width: i32, height: i32 },
    DrawFrame,
}

impl BridgeCall {
    /// Replays this call on `bridge`.
    ///
    /// Returns the consumed flag for key calls, `None` for everything
    /// else.
    pub fn deliver<B: Bridge + ?Sized>(&self, bridge: &B) -> Option<bool> {
        match self {
            Self::SetActivity(handle) => bridge.set_activity(*handle),

            Self::Create => bridge.on_create(),
            Self::Start => bridge.on_start(),
            Self::Restart => bridge.on_restart(),
            Self::Stop => bridge.on_stop(),
            Self::Destroy => bridge.on_destroy(),
            Self::Pause => bridge.on_pause(),
            Self::Resume => bridge.on_resume(),

            Self::TouchesBegin { touches, action_id } => {
                bridge.on_touches_begin(touches, *action_id)
            }
            Self::TouchesMove { touches } => bridge.on_touches_move(touches),
            Self::TouchesEnd { touches, action_id } => {
                bridge.on_touches_end(touches, *action_id)
            }
            Self::TouchesCancel { touches } => bridge.on_touches_cancel(touches),

            Self::KeyDown { key_code, event } => {
                return Some(bridge.on_key_down(*key_code, event));
            }
            Self::KeyUp { key_code, event } => {
                return Some(bridge.on_key_up(*key_code, event));
            }

            Self::SurfaceCreated => bridge.on_surface_created(),
            Self::SurfaceChanged { width, height } => {
                bridge.on_surface_changed(*width, *height)
            }
            Self::DrawFrame => bridge.on_draw_frame(),
        }
        None
    }

    /// True for calls delivered on the render thread.
    pub fn is_surface_call(&self) -> bool {
        matches!(
            self,
            Self::SurfaceCreated | Self::SurfaceChanged { .. } | Self::DrawFrame
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
