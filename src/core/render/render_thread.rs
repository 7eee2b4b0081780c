//=========================================================================
// Render Thread
//=========================================================================
//
// Dedicated thread that invokes the renderer.
//
// Architecture:
// ```text
//  Main Thread                         Render Thread
//  ┌────────────────────┐              ┌────────────────────────┐
//  │ RenderSurface      │  Surface-    │ loop {                 │
//  │  surface_created() ├─ Command ───>│   Created → renderer   │
//  │  surface_changed() │  (bounded)   │   Changed → renderer   │
//  │  request_render()  │              │   Draw    → renderer   │
//  │  on_pause()  ──────┼── ack <──────┤   Pause / Resume       │
//  │  on_resume() ──────┘              │ }                      │
//  └────────────────────┘              └────────────────────────┘
// ```
//
// Pause and resume are acknowledged: the caller does not return until
// the render thread has switched state, so no frame is drawn after
// `on_pause()` returns. Draw ticks arriving while paused are dropped.
// With a frame interval of n only every n-th draw tick is rendered.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use super::renderer::{Renderer, SurfaceConfig};
use crate::core::bridge::Bridge;

//=== SurfaceCommand ======================================================

/// Messages from the surface to its render thread.
#[derive(Debug)]
pub(crate) enum SurfaceCommand {
    Created(SurfaceConfig),
    Changed { width: i32, height: i32 },
    Draw,
    SetFrameInterval(u32),

    /// Pause rendering; the sender is signalled once paused.
    Pause(Sender<()>),

    /// Resume rendering; the sender is signalled once running.
    Resume(Sender<()>),

    Shutdown,
}

//=== RenderLoop ==========================================================

/// State owned by the render thread.
///
/// `paused` is shared with the surface; it is written before a pause or
/// resume is acknowledged.
struct RenderLoop<B: Bridge> {
    renderer: Arc<Renderer<B>>,
    paused: Arc<AtomicBool>,
    frame_interval: u32,
    ticks: u64,
}

impl<B: Bridge> RenderLoop<B> {
    fn new(renderer: Arc<Renderer<B>>, frame_interval: u32, paused: Arc<AtomicBool>) -> Self {
        Self {
            renderer,
            paused,
            frame_interval,
            ticks: 0,
        }
    }

    fn run(mut self, commands: Receiver<SurfaceCommand>) {
        info!(target: "render", "Render thread started");

        for command in commands.iter() {
            if !self.handle(command) {
                break;
            }
        }

        info!(target: "render", "Render thread stopped");
    }

    /// Returns false when the loop should stop.
    fn handle(&mut self, command: SurfaceCommand) -> bool {
        match command {
            SurfaceCommand::Created(config) => {
                self.renderer.on_surface_created(&config);
            }
            SurfaceCommand::Changed { width, height } => {
                self.renderer.on_surface_changed(width, height);
            }
            SurfaceCommand::Draw => self.tick(),
            SurfaceCommand::SetFrameInterval(interval) => {
                debug!(target: "render", "Frame interval set to {}", interval);
                self.frame_interval = interval;
                self.ticks = 0;
            }
            SurfaceCommand::Pause(ack) => {
                self.paused.store(true, Ordering::Release);
                let _ = ack.send(());
            }
            SurfaceCommand::Resume(ack) => {
                self.paused.store(false, Ordering::Release);
                self.ticks = 0;
                let _ = ack.send(());
            }
            SurfaceCommand::Shutdown => return false,
        }
        true
    }

    fn tick(&mut self) {
        if self.paused.load(Ordering::Acquire) {
            trace!(target: "render", "Paused, draw tick dropped");
            return;
        }

        self.ticks += 1;
        if self.ticks % u64::from(self.frame_interval) == 0 {
            self.renderer.on_draw_frame();
        }
    }
}

//=== Spawn ===============================================================

/// Starts a render thread driving `renderer`.
///
/// Returns `None` for the handle if the OS refuses to create the thread;
/// commands sent afterwards are then dropped by their senders.
pub(crate) fn spawn_render_thread<B: Bridge>(
    renderer: Arc<Renderer<B>>,
    frame_interval: u32,
    paused: Arc<AtomicBool>,
    commands: Receiver<SurfaceCommand>,
) -> Option<JoinHandle<()>> {
    let render_loop = RenderLoop::new(renderer, frame_interval, paused);

    match thread::Builder::new()
        .name("render".into())
        .spawn(move || render_loop.run(commands))
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(target: "render", "Failed to spawn render thread: {}", e);
            None
        }
    }
}

/// Creates the command channel for a render thread.
pub(crate) fn command_channel(
    capacity: usize,
) -> (Sender<SurfaceCommand>, Receiver<SurfaceCommand>) {
    bounded(capacity)
}

//=========================================================================
// Unit Tests
//=========================================================================
