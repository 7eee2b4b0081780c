//=========================================================================
// Activity Host
//
// Configuration and entry point.
//
// Architecture:
// ```text
//     HostBuilder  ──build(bridge)──>  Host  ──run()──>  [winit event loop]
//         │                              │
//         ├─ with_max_pointers()         ├─ with_base()
//         ├─ with_frame_interval()       └─ with_audio()
//         ├─ with_render_channel_capacity()
//         ├─ with_window_title() / with_window_size()
//         └─ with_mouse_touch_emulation()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::{ActivityBase, AudioControl, Bridge, HostActivity};
use crate::platform::{Platform, PlatformError};

//=== HostConfig ==========================================================

/// Settings shared by the activity, its surface and the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Most simultaneous pointers a touch event may report.
    pub max_pointers: usize,

    /// Render every n-th draw tick.
    pub frame_interval: u32,

    /// Pending surface commands before draw ticks are dropped.
    pub render_channel_capacity: usize,

    pub window_title: String,
    pub window_size: (u32, u32),

    /// Drive a single touch pointer from the left mouse button.
    pub mouse_touch_emulation: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_pointers: 256,
            frame_interval: 1,
            render_channel_capacity: 64,
            window_title: "Activity Host".to_string(),
            window_size: (800, 600),
            mouse_touch_emulation: true,
        }
    }
}

//=== HostBuilder =========================================================

/// Builder for [`HostConfig`] and [`Host`].
///
/// # Default Values
///
/// - **Max pointers**: 256
/// - **Frame interval**: 1
/// - **Render channel capacity**: 64 commands
/// - **Window**: "Activity Host", 800x600
/// - **Mouse touch emulation**: on
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use activity_bridge::HostBuilder;
/// use activity_bridge::core::RecordingBridge;
///
/// let (bridge, _calls) = RecordingBridge::new();
///
/// HostBuilder::new()
///     .with_frame_interval(2)
///     .with_window_title("Spriter")
///     .build(Arc::new(bridge))
///     .run()
///     .expect("event loop failed");
/// ```
#[derive(Debug, Clone)]
pub struct HostBuilder {
    config: HostConfig,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            config: HostConfig::default(),
        }
    }

    /// Sets the most simultaneous pointers accepted per touch event.
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_pointers(mut self, max: usize) -> Self {
        assert!(max > 0, "Max pointers must be positive");
        self.config.max_pointers = max;
        self
    }

    /// Renders only every `interval`-th draw tick.
    ///
    /// # Panics
    ///
    /// Panics if `interval == 0`.
    pub fn with_frame_interval(mut self, interval: u32) -> Self {
        assert!(interval > 0, "Frame interval must be positive");
        self.config.frame_interval = interval;
        self
    }

    /// Sets how many surface commands may queue for the render thread.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_render_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Render channel capacity must be positive");
        self.config.render_channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is 0.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive");
        self.config.window_size = (width, height);
        self
    }

    pub fn with_mouse_touch_emulation(mut self, enabled: bool) -> Self {
        self.config.mouse_touch_emulation = enabled;
        self
    }

    /// Returns the configuration without building a host.
    pub fn config(self) -> HostConfig {
        self.config
    }

    /// Builds a host forwarding to `bridge`.
    pub fn build<B: Bridge>(self, bridge: Arc<B>) -> Host<B> {
        info!(
            "Building host (max pointers: {}, frame interval: {})",
            self.config.max_pointers, self.config.frame_interval
        );

        Host {
            activity: HostActivity::new(bridge, self.config.clone()),
            config: self.config,
        }
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Host ================================================================

/// A host activity bound to the winit event loop.
pub struct Host<B: Bridge> {
    activity: HostActivity<B>,
    config: HostConfig,
}

impl<B: Bridge> Host<B> {
    pub fn with_base(mut self, base: impl ActivityBase + 'static) -> Self {
        self.activity = self.activity.with_base(base);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioControl + 'static) -> Self {
        self.activity = self.activity.with_audio(audio);
        self
    }

    pub fn activity(&self) -> &HostActivity<B> {
        &self.activity
    }

    /// Runs the event loop until the activity finishes or the window
    /// closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms that require it.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting host event loop");

        let platform = Platform::new(self.activity, self.config);
        let result = platform.run();

        match &result {
            Ok(()) => info!("Host event loop exited"),
            Err(e) => error!("Host event loop failed: {}", e),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
