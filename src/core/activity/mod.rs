//=========================================================================
// Activity
//=========================================================================
//
// The host activity and the framework pieces it owns.
//
// Components:
// - `host_activity`: lifecycle / touch / key forwarding to the bridge
// - `base`: framework ("superclass") behavior hooks
// - `audio`: the on/off audio resource
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod base;
pub mod host_activity;

//=== Public API ==========================================================

pub use audio::{AudioControl, AudioDevice};
pub use base::{ActivityBase, DefaultActivityBase};
pub use host_activity::{HostActivity, TouchDispatch};
