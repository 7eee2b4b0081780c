//=========================================================================
// Audio Control
//=========================================================================
//
// On/off audio resource tied to the activity's pause/resume cycle.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== AudioControl ========================================================

/// Binary audio resource. Started on resume, stopped on pause.
pub trait AudioControl: Send {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

//=== AudioDevice =========================================================

/// Default audio control: tracks the on/off state.
#[derive(Debug, Default)]
pub struct AudioDevice {
    running: bool,
}

impl AudioDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioControl for AudioDevice {
    fn start(&mut self) {
        if !self.running {
            debug!(target: "host", "Audio device started");
        }
        self.running = true;
    }

    fn stop(&mut self) {
        if self.running {
            debug!(target: "host", "Audio device stopped");
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
