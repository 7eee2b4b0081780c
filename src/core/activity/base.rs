//=========================================================================
// Activity Base
//=========================================================================
//
// The framework behavior a host activity extends. `HostActivity` calls
// these hooks before or after forwarding to the bridge; their defaults
// do nothing, except key handling in `DefaultActivityBase`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::input::{keycode, KeyEvent};

//=== ActivityBase ========================================================

/// Framework ("superclass") side of an activity.
pub trait ActivityBase: Send {
    fn on_create(&mut self) {}
    fn on_start(&mut self) {}
    fn on_restart(&mut self) {}
    fn on_stop(&mut self) {}
    fn on_destroy(&mut self) {}
    fn on_pause(&mut self) {}
    fn on_resume(&mut self) {}

    /// Default key-down handling; `true` if handled.
    fn on_key_down(&mut self, _key_code: i32, _event: &KeyEvent) -> bool {
        false
    }

    /// Default key-up handling; `true` if handled.
    fn on_key_up(&mut self, _key_code: i32, _event: &KeyEvent) -> bool {
        false
    }

    /// True once the activity has asked to be finished.
    fn is_finishing(&self) -> bool {
        false
    }
}

//=== DefaultActivityBase =================================================

/// Stock framework behavior: BACK finishes the activity.
///
/// Key-down on BACK is claimed so the matching key-up is delivered; the
/// key-up then requests finish.
#[derive(Debug, Default)]
pub struct DefaultActivityBase {
    back_tracking: bool,
    finishing: bool,
}

impl DefaultActivityBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the host to finish this activity.
    pub fn finish(&mut self) {
        if !self.finishing {
            info!(target: "host", "Activity finishing");
        }
        self.finishing = true;
    }
}

impl ActivityBase for DefaultActivityBase {
    fn on_key_down(&mut self, key_code: i32, event: &KeyEvent) -> bool {
        if key_code == keycode::KEYCODE_BACK {
            if !event.is_repeat() {
                self.back_tracking = true;
            }
            return true;
        }
        false
    }

    fn on_key_up(&mut self, key_code: i32, _event: &KeyEvent) -> bool {
        if key_code == keycode::KEYCODE_BACK && self.back_tracking {
            self.back_tracking = false;
            self.finish();
            return true;
        }
        false
    }

    fn is_finishing(&self) -> bool {
        self.finishing
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
