//=========================================================================
// Bridge Dispatcher
//=========================================================================
//
// Runs a thread-affine bridge on a dedicated thread.
//
// Architecture:
// ```text
//  Main thread ─┐                         Dispatcher thread
//               ├─ ChannelBridge ──MPSC──> BridgeMessage → inner Bridge
//  Render thread┘        ↑                       │
//                        └──── reply (keys) ─────┘
// ```
//
// Every call is delivered in send order. Key calls block the caller on
// a rendezvous reply so the consumed flag still reaches the activity.
// If the dispatcher is gone, calls are dropped with a warning and keys
// report unconsumed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::interface::{ActivityHandle, Bridge, BridgeCall};
use crate::core::input::{KeyEvent, TouchSample};

//=== BridgeMessage =======================================================

enum BridgeMessage {
    /// Fire-and-forget call.
    Call(BridgeCall),

    /// Call whose result the sender waits for.
    Query(BridgeCall, Sender<bool>),

    /// Stop the dispatcher thread.
    Shutdown,
}

//=== BridgeDispatcher ====================================================

/// Owns the dispatcher thread and the real bridge running on it.
///
/// Hand [`ChannelBridge`] clones to the host; they implement [`Bridge`]
/// by message passing.
pub struct BridgeDispatcher {
    sender: Sender<BridgeMessage>,
    worker: Option<JoinHandle<()>>,
}

impl BridgeDispatcher {
    /// Moves `bridge` onto a new dispatcher thread.
    pub fn spawn<B: Bridge>(bridge: B) -> Self {
        let (sender, receiver) = unbounded::<BridgeMessage>();

        let worker = thread::Builder::new()
            .name("bridge-dispatcher".into())
            .spawn(move || {
                info!(target: "bridge", "Dispatcher thread started");
                for message in receiver.iter() {
                    match message {
                        BridgeMessage::Call(call) => {
                            call.deliver(&bridge);
                        }
                        BridgeMessage::Query(call, reply) => {
                            let consumed = call.deliver(&bridge).unwrap_or(false);
                            if reply.send(consumed).is_err() {
                                debug!(target: "bridge", "Query caller went away");
                            }
                        }
                        BridgeMessage::Shutdown => break,
                    }
                }
                info!(target: "bridge", "Dispatcher thread stopped");
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(target: "bridge", "Failed to spawn dispatcher thread: {}", e);
                None
            }
        };

        Self { sender, worker }
    }

    /// Returns a bridge that forwards to the dispatcher thread.
    pub fn bridge(&self) -> ChannelBridge {
        ChannelBridge {
            sender: self.sender.clone(),
        }
    }

    /// Stops the dispatcher after all previously sent calls are delivered.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        if self.sender.send(BridgeMessage::Shutdown).is_err() {
            warn!(target: "bridge", "Dispatcher already disconnected");
        }

        if worker.join().is_err() {
            error!(target: "bridge", "Dispatcher thread panicked");
        }
    }
}

impl Drop for BridgeDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

//=== ChannelBridge =======================================================

/// [`Bridge`] that forwards every call to a [`BridgeDispatcher`].
#[derive(Clone)]
pub struct ChannelBridge {
    sender: Sender<BridgeMessage>,
}

impl ChannelBridge {
    fn post(&self, call: BridgeCall) {
        if self.sender.send(BridgeMessage::Call(call)).is_err() {
            warn!(target: "bridge", "Dispatcher disconnected, call dropped");
        }
    }

    fn query(&self, call: BridgeCall) -> bool {
        let (reply, answer) = bounded(1);

        if self.sender.send(BridgeMessage::Query(call, reply)).is_err() {
            warn!(target: "bridge", "Dispatcher disconnected, key reported unconsumed");
            return false;
        }

        answer.recv().unwrap_or_else(|_| {
            warn!(target: "bridge", "Dispatcher stopped before answering, key reported unconsumed");
            false
        })
    }
}

//--- Bridge --------------------------------------------------------------

impl Bridge for ChannelBridge {
    fn set_activity(&self, handle: ActivityHandle) {
        self.post(BridgeCall::SetActivity(handle));
    }

    fn on_create(&self) {
        self.post(BridgeCall::Create);
    }

    fn on_start(&self) {
        self.post(BridgeCall::Start);
    }

    fn on_restart(&self) {
        self.post(BridgeCall::Restart);
    }

    fn on_stop(&self) {
        self.post(BridgeCall::Stop);
    }

    fn on_destroy(&self) {
        self.post(BridgeCall::Destroy);
    }

    fn on_pause(&self) {
        self.post(BridgeCall::Pause);
    }

    fn on_resume(&self) {
        self.post(BridgeCall::Resume);
    }

    fn on_touches_begin(&self, touches: &TouchSample, action_id: i32) {
        self.post(BridgeCall::TouchesBegin {
            touches: touches.clone(),
            action_id,
        });
    }

    fn on_touches_move(&self, touches: &TouchSample) {
        self.post(BridgeCall::TouchesMove {
            touches: touches.clone(),
        });
    }

    fn on_touches_end(&self, touches: &TouchSample, action_id: i32) {
        self.post(BridgeCall::TouchesEnd {
            touches: touches.clone(),
            action_id,
        });
    }

    fn on_touches_cancel(&self, touches: &TouchSample) {
        self.post(BridgeCall::TouchesCancel {
            touches: touches.clone(),
        });
    }

    fn on_key_down(&self, key_code: i32, event: &KeyEvent) -> bool {
        self.query(BridgeCall::KeyDown {
            key_code,
            event: *event,
        })
    }

    fn on_key_up(&self, key_code: i32, event: &KeyEvent) -> bool {
        self.query(BridgeCall::KeyUp {
            key_code,
            event: *event,
        })
    }

    fn on_surface_created(&self) {
        self.post(BridgeCall::SurfaceCreated);
    }

    fn on_surface_changed(&self, width: i32, height: i32) {
        self.post(BridgeCall::SurfaceChanged { width, height });
    }

    fn on_draw_frame(&self) {
        self.post(BridgeCall::DrawFrame);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
