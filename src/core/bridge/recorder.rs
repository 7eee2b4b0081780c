//=========================================================================
// Recording Bridge
//=========================================================================
//
// Bridge implementation that turns every call into a `BridgeCall` and
// sends it down a channel.
//
// Architecture:
//   HostActivity / Renderer → RecordingBridge → Sender<BridgeCall> → observer
//
// Key results are configurable so both the consumed and the delegated
// key paths can be driven. Calls can also be recorded into a wider
// journal type (anything `From<BridgeCall>`) to interleave them with
// other observed steps.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;

//=== Internal Dependencies ===============================================

use super::interface::{ActivityHandle, Bridge, BridgeCall};
use crate::core::input::{KeyEvent, TouchSample};

//=== RecordingBridge =====================================================

/// Records outbound calls on a channel.
pub struct RecordingBridge<T = BridgeCall> {
    sender: Sender<T>,
    consume_keys: AtomicBool,
}

impl RecordingBridge<BridgeCall> {
    /// Creates a bridge and the receiver its calls arrive on.
    ///
    /// Keys are reported unconsumed until [`consume_keys`] says otherwise.
    ///
    /// [`consume_keys`]: RecordingBridge::consume_keys
    pub fn new() -> (Self, Receiver<BridgeCall>) {
        let (sender, receiver) = unbounded();
        (Self::with_sender(sender), receiver)
    }
}

impl<T: From<BridgeCall> + Send + 'static> RecordingBridge<T> {
    /// Records into an existing journal channel.
    pub fn with_sender(sender: Sender<T>) -> Self {
        Self {
            sender,
            consume_keys: AtomicBool::new(false),
        }
    }

    /// Sets the result returned from `on_key_down` / `on_key_up`.
    pub fn consume_keys(&self, consume: bool) {
        self.consume_keys.store(consume, Ordering::Relaxed);
    }

    fn record(&self, call: BridgeCall) {
        if self.sender.send(T::from(call)).is_err() {
            warn!(target: "bridge", "Recording receiver dropped, call discarded");
        }
    }
}

//--- Bridge --------------------------------------------------------------

impl<T: From<BridgeCall> + Send + 'static> Bridge for RecordingBridge<T> {
    fn set_activity(&self, handle: ActivityHandle) {
        self.record(BridgeCall::SetActivity(handle));
    }

    fn on_create(&self) {
        self.record(BridgeCall::Create);
    }

    fn on_start(&self) {
        self.record(BridgeCall::Start);
    }

    fn on_restart(&self) {
        self.record(BridgeCall::Restart);
    }

    fn on_stop(&self) {
        self.record(BridgeCall::Stop);
    }

    fn on_destroy(&self) {
        self.record(BridgeCall::Destroy);
    }

    fn on_pause(&self) {
        self.record(BridgeCall::Pause);
    }

    fn on_resume(&self) {
        self.record(BridgeCall::Resume);
    }

    fn on_touches_begin(&self, touches: &TouchSample, action_id: i32) {
        self.record(BridgeCall::TouchesBegin {
            touches: touches.clone(),
            action_id,
        });
    }

    fn on_touches_move(&self, touches: &TouchSample) {
        self.record(BridgeCall::TouchesMove {
            touches: touches.clone(),
        });
    }

    fn on_touches_end(&self, touches: &TouchSample, action_id: i32) {
        self.record(BridgeCall::TouchesEnd {
            touches: touches.clone(),
            action_id,
        });
    }

    fn on_touches_cancel(&self, touches: &TouchSample) {
        self.record(BridgeCall::TouchesCancel {
            touches: touches.clone(),
        });
    }

    fn on_key_down(&self, key_code: i32, event: &KeyEvent) -> bool {
        self.record(BridgeCall::KeyDown {
            key_code,
            event: *event,
        });
        self.consume_keys.load(Ordering::Relaxed)
    }

    fn on_key_up(&self, key_code: i32, event: &KeyEvent) -> bool {
        self.record(BridgeCall::KeyUp {
            key_code,
            event: *event,
        });
        self.consume_keys.load(Ordering::Relaxed)
    }

    fn on_surface_created(&self) {
        self.record(BridgeCall::SurfaceCreated);
    }

    fn on_surface_changed(&self, width: i32, height: i32) {
        self.record(BridgeCall::SurfaceChanged { width, height });
    }

    fn on_draw_frame(&self) {
        self.record(BridgeCall::DrawFrame);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
