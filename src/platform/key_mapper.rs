//=========================================================================
// Key Mapper
//=========================================================================
//
// Converts winit keyboard input into Android key events.
//
// Architecture:
//   winit KeyEvent → KeyMapper → KeyEvent { key_code, meta_state, repeat }
//
// Stateful: caches the modifier state from ModifiersChanged and counts
// auto-repeats of the held key. Keys without an Android equivalent are
// filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::ElementState,
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{keycode, meta, KeyAction, KeyEvent};

//=== KeyMapper ===========================================================

pub(crate) struct KeyMapper {
    meta_state: u32,
    repeat_count: u32,
}

impl KeyMapper {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            meta_state: meta::META_NONE,
            repeat_count: 0,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached meta state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.meta_state = meta_state(state);
    }

    #[cfg(test)]
    pub(crate) fn meta_state(&self) -> u32 {
        self.meta_state
    }

    //--- Event Processing -------------------------------------------------

    /// Maps a physical key transition; `None` for unmapped keys.
    pub(crate) fn map(
        &mut self,
        physical: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<KeyEvent> {
        let key_code = match physical {
            PhysicalKey::Code(code) => android_key_code(code),
            _ => return None,
        };

        if key_code == keycode::KEYCODE_UNKNOWN {
            return None;
        }

        let action = match state {
            ElementState::Pressed => {
                self.repeat_count = if repeat { self.repeat_count + 1 } else { 0 };
                KeyAction::Down
            }
            ElementState::Released => {
                self.repeat_count = 0;
                KeyAction::Up
            }
        };

        Some(
            KeyEvent::new(key_code, action)
                .with_repeat_count(if action == KeyAction::Down { self.repeat_count } else { 0 })
                .with_meta_state(self.meta_state),
        )
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit modifiers to Android meta-state flags.
fn meta_state(state: ModifiersState) -> u32 {
    let mut flags = meta::META_NONE;
    if state.shift_key() {
        flags |= meta::META_SHIFT_ON;
    }
    if state.alt_key() {
        flags |= meta::META_ALT_ON;
    }
    if state.control_key() {
        flags |= meta::META_CTRL_ON;
    }
    flags
}

/// Converts a winit physical key code to an Android key code.
///
/// Escape maps to BACK so the desktop host can leave the activity the
/// way a device back button does. Unmapped keys return
/// `KEYCODE_UNKNOWN`.
pub(crate) fn android_key_code(code: WinitKeyCode) -> i32 {
    use WinitKeyCode::*;
    match code {
        //--- Digits -------------------------------------------------------

        Digit0 => keycode::KEYCODE_0,
        Digit1 => keycode::KEYCODE_0 + 1,
        Digit2 => keycode::KEYCODE_0 + 2,
        Digit3 => keycode::KEYCODE_0 + 3,
        Digit4 => keycode::KEYCODE_0 + 4,
        Digit5 => keycode::KEYCODE_0 + 5,
        Digit6 => keycode::KEYCODE_0 + 6,
        Digit7 => keycode::KEYCODE_0 + 7,
        Digit8 => keycode::KEYCODE_0 + 8,
        Digit9 => keycode::KEYCODE_9,

        //--- Letters ------------------------------------------------------

        KeyA => keycode::KEYCODE_A,
        KeyB => keycode::KEYCODE_A + 1,
        KeyC => keycode::KEYCODE_A + 2,
        KeyD => keycode::KEYCODE_A + 3,
        KeyE => keycode::KEYCODE_A + 4,
        KeyF => keycode::KEYCODE_A + 5,
        KeyG => keycode::KEYCODE_A + 6,
        KeyH => keycode::KEYCODE_A + 7,
        KeyI => keycode::KEYCODE_A + 8,
        KeyJ => keycode::KEYCODE_A + 9,
        KeyK => keycode::KEYCODE_A + 10,
        KeyL => keycode::KEYCODE_A + 11,
        KeyM => keycode::KEYCODE_A + 12,
        KeyN => keycode::KEYCODE_A + 13,
        KeyO => keycode::KEYCODE_A + 14,
        KeyP => keycode::KEYCODE_A + 15,
        KeyQ => keycode::KEYCODE_A + 16,
        KeyR => keycode::KEYCODE_A + 17,
        KeyS => keycode::KEYCODE_A + 18,
        KeyT => keycode::KEYCODE_A + 19,
        KeyU => keycode::KEYCODE_A + 20,
        KeyV => keycode::KEYCODE_A + 21,
        KeyW => keycode::KEYCODE_A + 22,
        KeyX => keycode::KEYCODE_A + 23,
        KeyY => keycode::KEYCODE_A + 24,
        KeyZ => keycode::KEYCODE_Z,

        //--- Navigation ---------------------------------------------------

        ArrowUp => keycode::KEYCODE_DPAD_UP,
        ArrowDown => keycode::KEYCODE_DPAD_DOWN,
        ArrowLeft => keycode::KEYCODE_DPAD_LEFT,
        ArrowRight => keycode::KEYCODE_DPAD_RIGHT,
        PageUp => keycode::KEYCODE_PAGE_UP,
        PageDown => keycode::KEYCODE_PAGE_DOWN,
        Home => keycode::KEYCODE_MOVE_HOME,
        End => keycode::KEYCODE_MOVE_END,

        //--- System -------------------------------------------------------

        Escape | BrowserBack => keycode::KEYCODE_BACK,
        ContextMenu => keycode::KEYCODE_MENU,
        BrowserSearch => keycode::KEYCODE_SEARCH,

        //--- Editing ------------------------------------------------------

        Space => keycode::KEYCODE_SPACE,
        Enter | NumpadEnter => keycode::KEYCODE_ENTER,
        Tab => keycode::KEYCODE_TAB,
        Backspace => keycode::KEYCODE_DEL,
        Delete => keycode::KEYCODE_FORWARD_DEL,
        Comma => keycode::KEYCODE_COMMA,
        Period => keycode::KEYCODE_PERIOD,
        Minus => keycode::KEYCODE_MINUS,
        Equal => keycode::KEYCODE_EQUALS,

        //--- Modifiers ----------------------------------------------------

        ShiftLeft => keycode::KEYCODE_SHIFT_LEFT,
        ShiftRight => keycode::KEYCODE_SHIFT_RIGHT,
        ControlLeft => keycode::KEYCODE_CTRL_LEFT,
        ControlRight => keycode::KEYCODE_CTRL_RIGHT,
        AltLeft => keycode::KEYCODE_ALT_LEFT,
        AltRight => keycode::KEYCODE_ALT_RIGHT,

        //--- Function keys ------------------------------------------------

        F1 => keycode::KEYCODE_F1,
        F2 => keycode::KEYCODE_F1 + 1,
        F3 => keycode::KEYCODE_F1 + 2,
        F4 => keycode::KEYCODE_F1 + 3,
        F5 => keycode::KEYCODE_F1 + 4,
        F6 => keycode::KEYCODE_F1 + 5,
        F7 => keycode::KEYCODE_F1 + 6,
        F8 => keycode::KEYCODE_F1 + 7,
        F9 => keycode::KEYCODE_F1 + 8,
        F10 => keycode::KEYCODE_F1 + 9,
        F11 => keycode::KEYCODE_F1 + 10,
        F12 => keycode::KEYCODE_F12,

        //--- Unmapped -----------------------------------------------------

        _ => keycode::KEYCODE_UNKNOWN,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(mapper: &mut KeyMapper, code: WinitKeyCode, repeat: bool) -> Option<KeyEvent> {
        mapper.map(PhysicalKey::Code(code), ElementState::Pressed, repeat)
    }

    #[test]
    fn letters_and_digits_follow_android_layout() {
        assert_eq!(android_key_code(WinitKeyCode::KeyA), 29);
        assert_eq!(android_key_code(WinitKeyCode::KeyM), 41);
        assert_eq!(android_key_code(WinitKeyCode::KeyZ), 54);
        assert_eq!(android_key_code(WinitKeyCode::Digit0), 7);
        assert_eq!(android_key_code(WinitKeyCode::Digit5), 12);
        assert_eq!(android_key_code(WinitKeyCode::F12), 142);
    }

    #[test]
    fn escape_is_back() {
        assert_eq!(android_key_code(WinitKeyCode::Escape), keycode::KEYCODE_BACK);
    }

    #[test]
    fn every_named_keycode_is_produced() {
        use WinitKeyCode::*;
        let produced: Vec<i32> = [
            Escape, Digit0, Digit9, ArrowUp, ArrowDown, ArrowLeft, ArrowRight, KeyA, KeyZ,
            Comma, Period, AltLeft, AltRight, ShiftLeft, ShiftRight, Tab, Space, Enter,
            Backspace, Minus, Equal, ContextMenu, BrowserSearch, PageUp, PageDown, Delete,
            ControlLeft, ControlRight, Home, End, F1, F12,
        ]
        .into_iter()
        .map(android_key_code)
        .collect();

        for code in [
            keycode::KEYCODE_BACK,
            keycode::KEYCODE_0,
            keycode::KEYCODE_9,
            keycode::KEYCODE_DPAD_UP,
            keycode::KEYCODE_DPAD_DOWN,
            keycode::KEYCODE_DPAD_LEFT,
            keycode::KEYCODE_DPAD_RIGHT,
            keycode::KEYCODE_A,
            keycode::KEYCODE_Z,
            keycode::KEYCODE_COMMA,
            keycode::KEYCODE_PERIOD,
            keycode::KEYCODE_ALT_LEFT,
            keycode::KEYCODE_ALT_RIGHT,
            keycode::KEYCODE_SHIFT_LEFT,
            keycode::KEYCODE_SHIFT_RIGHT,
            keycode::KEYCODE_TAB,
            keycode::KEYCODE_SPACE,
            keycode::KEYCODE_ENTER,
            keycode::KEYCODE_DEL,
            keycode::KEYCODE_MINUS,
            keycode::KEYCODE_EQUALS,
            keycode::KEYCODE_MENU,
            keycode::KEYCODE_SEARCH,
            keycode::KEYCODE_PAGE_UP,
            keycode::KEYCODE_PAGE_DOWN,
            keycode::KEYCODE_FORWARD_DEL,
            keycode::KEYCODE_CTRL_LEFT,
            keycode::KEYCODE_CTRL_RIGHT,
            keycode::KEYCODE_MOVE_HOME,
            keycode::KEYCODE_MOVE_END,
            keycode::KEYCODE_F1,
            keycode::KEYCODE_F12,
        ] {
            assert!(produced.contains(&code), "Keycode {} has no winit source", code);
        }
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let mut mapper = KeyMapper::new();
        assert!(press(&mut mapper, WinitKeyCode::F24, false).is_none());
    }

    #[test]
    fn press_and_release_actions() {
        let mut mapper = KeyMapper::new();

        let down = press(&mut mapper, WinitKeyCode::Space, false).unwrap();
        let up = mapper
            .map(PhysicalKey::Code(WinitKeyCode::Space), ElementState::Released, false)
            .unwrap();

        assert_eq!(down.key_code, keycode::KEYCODE_SPACE);
        assert_eq!(down.action, KeyAction::Down);
        assert_eq!(up.action, KeyAction::Up);
    }

    #[test]
    fn auto_repeat_is_counted() {
        let mut mapper = KeyMapper::new();

        let first = press(&mut mapper, WinitKeyCode::KeyW, false).unwrap();
        let second = press(&mut mapper, WinitKeyCode::KeyW, true).unwrap();
        let third = press(&mut mapper, WinitKeyCode::KeyW, true).unwrap();

        assert_eq!(first.repeat_count, 0);
        assert_eq!(second.repeat_count, 1);
        assert_eq!(third.repeat_count, 2);
    }

    #[test]
    fn modifiers_become_meta_state() {
        let mut mapper = KeyMapper::new();
        mapper.update_modifiers(ModifiersState::SHIFT | ModifiersState::CONTROL);

        let event = press(&mut mapper, WinitKeyCode::KeyS, false).unwrap();

        assert_eq!(event.meta_state, meta::META_SHIFT_ON | meta::META_CTRL_ON);
        assert_eq!(mapper.meta_state(), event.meta_state);
    }
}
