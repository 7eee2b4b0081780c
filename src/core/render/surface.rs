//=========================================================================
// Render Surface
//=========================================================================
//
// GPU-backed drawable view: owns the renderer and the render thread
// that calls it.
//
// The windowing side posts surface events (`surface_created`,
// `surface_changed`, `request_render`); the activity side pauses and
// resumes. Both ends are plain channel sends, so the surface itself
// holds no lock.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::render_thread::{command_channel, spawn_render_thread, SurfaceCommand};
use super::renderer::{Renderer, SurfaceConfig};
use crate::core::bridge::Bridge;

//=== RenderSurface =======================================================

pub struct RenderSurface<B: Bridge> {
    renderer: Arc<Renderer<B>>,
    commands: Sender<SurfaceCommand>,
    worker: Option<JoinHandle<()>>,
    paused: bool,
    render_paused: Arc<AtomicBool>,
}

impl<B: Bridge> RenderSurface<B> {
    //--- Construction -----------------------------------------------------

    /// Attaches `renderer` and starts its render thread.
    ///
    /// `channel_capacity` bounds pending surface commands; draw ticks
    /// beyond it are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `channel_capacity` or `frame_interval` is 0.
    pub fn new(renderer: Renderer<B>, channel_capacity: usize, frame_interval: u32) -> Self {
        assert!(channel_capacity > 0, "Render channel capacity must be positive");
        assert!(frame_interval > 0, "Frame interval must be positive");

        let renderer = Arc::new(renderer);
        let (commands, receiver) = command_channel(channel_capacity);
        let render_paused = Arc::new(AtomicBool::new(false));
        let worker = spawn_render_thread(
            Arc::clone(&renderer),
            frame_interval,
            Arc::clone(&render_paused),
            receiver,
        );

        info!(target: "render", "Render surface created (interval: {})", frame_interval);

        Self {
            renderer,
            commands,
            worker,
            paused: false,
            render_paused,
        }
    }

    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause state as seen by the render thread.
    #[cfg(test)]
    pub(crate) fn render_paused(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.render_paused)
    }

    //--- Activity Side ----------------------------------------------------

    /// Stops drawing. Returns once the render thread is paused.
    pub fn on_pause(&mut self) {
        if self.paused {
            debug!(target: "render", "Surface already paused");
            return;
        }
        self.round_trip(SurfaceCommand::Pause, "pause");
        self.paused = true;
        debug!(target: "render", "Surface paused (render thread: {})", self.render_state());
    }

    /// Restarts drawing. Returns once the render thread is running.
    pub fn on_resume(&mut self) {
        if !self.paused {
            debug!(target: "render", "Surface already running");
            return;
        }
        self.round_trip(SurfaceCommand::Resume, "resume");
        self.paused = false;
        debug!(target: "render", "Surface resumed (render thread: {})", self.render_state());
    }

    //--- Windowing Side ---------------------------------------------------

    pub fn surface_created(&self, config: SurfaceConfig) {
        self.send(SurfaceCommand::Created(config));
    }

    pub fn surface_changed(&self, width: i32, height: i32) {
        self.send(SurfaceCommand::Changed { width, height });
    }

    /// Posts one draw tick. Dropped if the render thread is behind.
    pub fn request_render(&self) {
        match self.commands.try_send(SurfaceCommand::Draw) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                trace!(target: "render", "Render thread busy, draw tick dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "render", "Render thread gone, draw tick dropped");
            }
        }
    }

    /// Renders only every `interval`-th draw tick.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is 0.
    pub fn set_frame_interval(&self, interval: u32) {
        assert!(interval > 0, "Frame interval must be positive");
        self.send(SurfaceCommand::SetFrameInterval(interval));
    }

    //--- Teardown ---------------------------------------------------------

    /// Stops and joins the render thread. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        self.send(SurfaceCommand::Shutdown);

        if worker.join().is_err() {
            error!(target: "render", "Render thread panicked");
        } else {
            info!(target: "render", "Render surface shut down");
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, command: SurfaceCommand) {
        if self.commands.send(command).is_err() {
            warn!(target: "render", "Render thread gone, surface command dropped");
        }
    }

    fn render_state(&self) -> &'static str {
        if self.render_paused.load(Ordering::Acquire) {
            "paused"
        } else {
            "running"
        }
    }

    fn round_trip(&self, command: fn(Sender<()>) -> SurfaceCommand, what: &str) {
        let (ack, done) = bounded(1);
        self.send(command(ack));
        if done.recv().is_err() {
            warn!(target: "render", "Render thread did not acknowledge {}", what);
        }
    }
}

impl<B: Bridge> Drop for RenderSurface<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
