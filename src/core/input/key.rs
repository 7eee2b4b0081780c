//=========================================================================
// Key Events
//
// The raw key event handed to the bridge alongside the key code, with
// Android key code and meta-state constants.
//
//=========================================================================

//=== Key Codes ===========================================================

/// Android key code constants (subset the host can produce).
pub mod keycode {
    pub const KEYCODE_UNKNOWN: i32 = 0;
    pub const KEYCODE_BACK: i32 = 4;

    pub const KEYCODE_0: i32 = 7;
    pub const KEYCODE_9: i32 = 16;

    pub const KEYCODE_DPAD_UP: i32 = 19;
    pub const KEYCODE_DPAD_DOWN: i32 = 20;
    pub const KEYCODE_DPAD_LEFT: i32 = 21;
    pub const KEYCODE_DPAD_RIGHT: i32 = 22;

    pub const KEYCODE_A: i32 = 29;
    pub const KEYCODE_Z: i32 = 54;

    pub const KEYCODE_COMMA: i32 = 55;
    pub const KEYCODE_PERIOD: i32 = 56;
    pub const KEYCODE_ALT_LEFT: i32 = 57;
    pub const KEYCODE_ALT_RIGHT: i32 = 58;
    pub const KEYCODE_SHIFT_LEFT: i32 = 59;
    pub const KEYCODE_SHIFT_RIGHT: i32 = 60;
    pub const KEYCODE_TAB: i32 = 61;
    pub const KEYCODE_SPACE: i32 = 62;
    pub const KEYCODE_ENTER: i32 = 66;
    pub const KEYCODE_DEL: i32 = 67;
    pub const KEYCODE_MINUS: i32 = 69;
    pub const KEYCODE_EQUALS: i32 = 70;
    pub const KEYCODE_MENU: i32 = 82;
    pub const KEYCODE_SEARCH: i32 = 84;
    pub const KEYCODE_PAGE_UP: i32 = 92;
    pub const KEYCODE_PAGE_DOWN: i32 = 93;
    pub const KEYCODE_FORWARD_DEL: i32 = 112;
    pub const KEYCODE_CTRL_LEFT: i32 = 113;
    pub const KEYCODE_CTRL_RIGHT: i32 = 114;
    pub const KEYCODE_MOVE_HOME: i32 = 122;
    pub const KEYCODE_MOVE_END: i32 = 123;

    pub const KEYCODE_F1: i32 = 131;
    pub const KEYCODE_F12: i32 = 142;
}

/// Android meta-state flags.
pub mod meta {
    pub const META_NONE: u32 = 0;
    pub const META_SHIFT_ON: u32 = 0x01;
    pub const META_ALT_ON: u32 = 0x02;
    pub const META_CTRL_ON: u32 = 0x1000;
}

//=== KeyAction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

//=== KeyEvent ============================================================

/// Key event as delivered by the host.
///
/// `repeat_count` is 0 for the initial press and counts auto-repeats
/// after it. `meta_state` is a combination of [`meta`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key_code: i32,
    pub action: KeyAction,
    pub repeat_count: u32,
    pub meta_state: u32,
}

impl KeyEvent {
    /// Initial press or release without modifiers.
    pub fn new(key_code: i32, action: KeyAction) -> Self {
        Self {
            key_code,
            action,
            repeat_count: 0,
            meta_state: meta::META_NONE,
        }
    }

    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_meta_state(mut self, meta_state: u32) -> Self {
        self.meta_state = meta_state;
        self
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat_count > 0
    }
}
