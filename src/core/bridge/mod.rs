//=========================================================================
// Engine Bridge
//=========================================================================
//
// Boundary between the host adapter and the native engine runtime.
//
// Components:
// - `interface`: the `Bridge` trait, `BridgeCall` and `ActivityHandle`
// - `recorder`: bridge that records calls on a channel
// - `dispatcher`: runs a thread-affine bridge on its own thread
//
//=========================================================================

//=== Module Declarations =================================================

pub mod dispatcher;
pub mod interface;
pub mod recorder;

//=== Public API ==========================================================

pub use dispatcher::{BridgeDispatcher, ChannelBridge};
pub use interface::{ActivityHandle, Bridge, BridgeCall};
pub use recorder::RecordingBridge;
