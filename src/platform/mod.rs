//=========================================================================
// Platform Subsystem
//
// Plays the operating system for the host activity: drives it from the
// winit event loop.
//
// Architecture:
// ```text
//  Main Thread:                              Render Thread:
//  ┌──────────────────────────────────┐     ┌──────────────────┐
//  │  Winit Event Loop                │     │  RenderLoop      │
//  │   ├─ resumed / suspended /       │     │   └─ Renderer    │
//  │   │  exiting → lifecycle         │     │       └─ Bridge  │
//  │   ├─ Touch → TouchTracker        │     └──────────────────┘
//  │   │          → HostActivity      │              ↑
//  │   ├─ Mouse (emulated pointer)    │              │
//  │   ├─ Keyboard → KeyMapper        │              │
//  │   │             → HostActivity   │              │
//  │   └─ Resized / RedrawRequested ──┼──────────────┘
//  │          → RenderSurface         │   SurfaceCommand
//  └──────────────────────────────────┘
// ```
//
// Lifecycle mapping:
// ```text
//   first resumed   → create, start, resume
//   later resumed   → restart, start, resume
//   suspended       → pause, stop
//   exiting         → (pause, stop,) destroy
// ```
//
// Responsibilities:
// - Create and manage the OS window
// - Map application lifecycle onto activity callbacks
// - Convert winit input into motion and key events
// - Feed surface size changes and draw ticks to the render surface
// - Exit once the activity finishes
//
//=========================================================================

//=== Submodules ==========================================================

mod key_mapper;
mod touch_tracker;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::{Bridge, HostActivity, SurfaceConfig};
use crate::host::HostConfig;
use key_mapper::KeyMapper;
use touch_tracker::{TouchTracker, MOUSE_SOURCE};

//=== PlatformError =======================================================

/// Event loop errors.
///
/// These are fatal - if the event loop can't be created, the host cannot
/// run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== Lifecycle ===========================================================

/// Where the activity is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    /// Not created yet.
    Initial,
    Resumed,
    /// Paused and stopped, may be restarted.
    Stopped,
    Destroyed,
}

//=== Platform ============================================================

/// Winit application driving one [`HostActivity`].
///
/// # Thread Safety
///
/// Must stay on the thread running the event loop. The only other
/// thread involved is the activity's render thread, reached through
/// its surface.
pub(crate) struct Platform<B: Bridge> {
    activity: HostActivity<B>,
    config: HostConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    lifecycle: Lifecycle,
    touches: TouchTracker,
    keys: KeyMapper,

    /// Last cursor position, for mouse touch emulation.
    cursor: (f32, f32),
}

impl<B: Bridge> Platform<B> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(activity: HostActivity<B>, config: HostConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            activity,
            config,
            window: None,
            lifecycle: Lifecycle::Initial,
            touches: TouchTracker::new(),
            keys: KeyMapper::new(),
            cursor: (0.0, 0.0),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until exit.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or aborts.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Brings the activity to the foreground.
    pub(crate) fn enter_foreground(&mut self) {
        match self.lifecycle {
            Lifecycle::Initial => {
                self.activity.on_create();
                self.activity.on_start();
                self.activity.on_resume();
            }
            Lifecycle::Stopped => {
                self.activity.on_restart();
                self.activity.on_start();
                self.activity.on_resume();
            }
            Lifecycle::Resumed | Lifecycle::Destroyed => return,
        }
        self.lifecycle = Lifecycle::Resumed;
        debug!(target: "platform", "Activity in foreground");
    }

    /// Sends the activity to the background.
    pub(crate) fn enter_background(&mut self) {
        if self.lifecycle != Lifecycle::Resumed {
            return;
        }
        self.activity.on_pause();
        self.activity.on_stop();
        self.lifecycle = Lifecycle::Stopped;
        debug!(target: "platform", "Activity in background");
    }

    /// Destroys the activity, stopping it first if needed.
    pub(crate) fn teardown(&mut self) {
        self.enter_background();
        if self.lifecycle == Lifecycle::Stopped {
            self.activity.on_destroy();
        }
        self.lifecycle = Lifecycle::Destroyed;
    }

    #[cfg(test)]
    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Redraws are only re-armed while resumed; `resumed` re-arms them.
    fn keeps_drawing(&self) -> bool {
        self.lifecycle == Lifecycle::Resumed
    }

    //--- Surface ----------------------------------------------------------

    /// Announces a (re)created window surface of the given size.
    fn surface_ready(&self, width: u32, height: u32) {
        if let Some(surface) = self.activity.surface() {
            surface.surface_created(SurfaceConfig::default());
            surface.surface_changed(surface_extent(width), surface_extent(height));
        }
    }

    fn surface_resized(&self, width: u32, height: u32) {
        if let Some(surface) = self.activity.surface() {
            surface.surface_changed(surface_extent(width), surface_extent(height));
        }
    }

    fn frame_tick(&self) {
        if let Some(surface) = self.activity.surface() {
            surface.request_render();
        }
    }

    //--- Input ------------------------------------------------------------

    pub(crate) fn handle_touch(&mut self, source: u64, phase: TouchPhase, x: f32, y: f32) {
        if let Some(event) = self.touches.process(source, phase, x, y) {
            self.activity.on_touch(&event);
        }
    }

    pub(crate) fn handle_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        if self.config.mouse_touch_emulation && self.touches.is_tracking(MOUSE_SOURCE) {
            self.handle_touch(MOUSE_SOURCE, TouchPhase::Moved, x, y);
        }
    }

    pub(crate) fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if !self.config.mouse_touch_emulation || button != MouseButton::Left {
            return;
        }
        let phase = match state {
            ElementState::Pressed => TouchPhase::Started,
            ElementState::Released => TouchPhase::Ended,
        };
        let (x, y) = self.cursor;
        self.handle_touch(MOUSE_SOURCE, phase, x, y);
    }

    pub(crate) fn handle_key(&mut self, physical: PhysicalKey, state: ElementState, repeat: bool) {
        let Some(event) = self.keys.map(physical, state, repeat) else {
            trace!(target: "platform::input", "Unmapped key ignored");
            return;
        };

        let handled = match state {
            ElementState::Pressed => self.activity.on_key_down(event.key_code, &event),
            ElementState::Released => self.activity.on_key_up(event.key_code, &event),
        };
        trace!(target: "platform::input", "Key {} handled: {}", event.key_code, handled);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn activity(&self) -> &HostActivity<B> {
        &self.activity
    }
}

/// Clamps a window extent into the bridge's `i32` range.
fn surface_extent(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

//=== Winit Integration ===================================================

impl<B: Bridge> ApplicationHandler for Platform<B> {
    /// Called on startup and on every return to the foreground.
    ///
    /// Creates the window on first call, then resumes the activity and
    /// announces the surface.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (width, height) = self.config.window_size;
            let attrs = WindowAttributes::default()
                .with_title(self.config.window_title.clone())
                .with_inner_size(LogicalSize::new(width, height));

            match event_loop.create_window(attrs) {
                Ok(window) => {
                    info!(
                        target: "platform",
                        "Window created: {}x{} @ {}x DPI",
                        window.inner_size().width,
                        window.inner_size().height,
                        window.scale_factor()
                    );
                    self.window = Some(window);
                }
                Err(e) => {
                    error!(target: "platform", "Window creation failed: {}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        self.enter_foreground();

        if let Some(window) = &self.window {
            let size = window.inner_size();
            self.surface_ready(size.width, size.height);
            window.request_redraw();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Application suspended");
        self.enter_background();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Application exiting");
        self.teardown();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.surface_resized(size.width, size.height);
            }

            WindowEvent::RedrawRequested if self.keeps_drawing() => {
                self.frame_tick();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                trace!(target: "platform", "Not resumed, redraw loop idles");
            }

            WindowEvent::Touch(touch) => {
                self.handle_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(button, state);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                self.keys.update_modifiers(modifiers.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_key(key_event.physical_key, key_event.state, key_event.repeat);
            }

            _ => {
                // Ignore: Focused, ScaleFactorChanged, etc.
            }
        }

        if self.activity.is_finishing() {
            info!(target: "platform", "Activity finished, leaving event loop");
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
