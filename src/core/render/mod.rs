//=========================================================================
// Render Surface Subsystem
//=========================================================================
//
// Components:
// - `renderer`: forwards surface callbacks to the bridge
// - `render_thread`: the thread that invokes the renderer
// - `surface`: the drawable view owning both
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod render_thread;
pub mod renderer;
pub mod surface;

//=== Public API ==========================================================

pub use renderer::{Renderer, SurfaceConfig};
pub use surface::RenderSurface;
