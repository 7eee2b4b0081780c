//=========================================================================
// Renderer
//=========================================================================
//
// GPU-surface callbacks, forwarded unchanged to the bridge.
//
// Invoked on the render thread only. Timing is owned by whoever drives
// the surface; the renderer neither throttles nor reorders.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::bridge::Bridge;

//=== SurfaceConfig =======================================================

/// Pixel format of a created surface.
///
/// Informational only; the bridge queries GPU capabilities itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceConfig {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub samples: u8,
}

impl Default for SurfaceConfig {
    /// RGBA8888 with a 16-bit depth buffer, no multisampling.
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 16,
            stencil_bits: 0,
            samples: 0,
        }
    }
}

//=== Renderer ============================================================

pub struct Renderer<B: Bridge> {
    bridge: Arc<B>,
}

impl<B: Bridge> Renderer<B> {
    pub fn new(bridge: Arc<B>) -> Self {
        Self { bridge }
    }

    pub fn on_surface_created(&self, config: &SurfaceConfig) {
        debug!(target: "render", "Surface created: {:?}", config);
        self.bridge.on_surface_created();
    }

    pub fn on_surface_changed(&self, width: i32, height: i32) {
        debug!(target: "render", "Surface changed: {}x{}", width, height);
        self.bridge.on_surface_changed(width, height);
    }

    pub fn on_draw_frame(&self) {
        trace!(target: "render", "Draw frame");
        self.bridge.on_draw_frame();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
