//=========================================================================
// Motion Events
//
// Host-neutral representation of a multi-pointer motion event, using
// Android's action-word encoding.
//
// Encoding:
// ```text
//   action word:  0x0000_IIAA
//                        │ └─ masked action (DOWN, UP, MOVE, ...)
//                        └─── action index (POINTER_DOWN / POINTER_UP)
// ```
//
// Responsibilities:
// - Describe the pointers reported by one host callback
// - Classify the action word into a `TouchAction`
// - Abstract over host event types through `PointerSource`
//
//=========================================================================

//=== Action Codes ========================================================

/// Android motion action constants.
pub mod action {
    pub const ACTION_MASK: i32 = 0xff;
    pub const ACTION_POINTER_INDEX_MASK: i32 = 0xff00;
    pub const ACTION_POINTER_INDEX_SHIFT: i32 = 8;

    /// Largest index the action word can carry.
    pub const MAX_ENCODED_INDEX: usize = 0xff;

    pub const ACTION_DOWN: i32 = 0;
    pub const ACTION_UP: i32 = 1;
    pub const ACTION_MOVE: i32 = 2;
    pub const ACTION_CANCEL: i32 = 3;
    pub const ACTION_OUTSIDE: i32 = 4;
    pub const ACTION_POINTER_DOWN: i32 = 5;
    pub const ACTION_POINTER_UP: i32 = 6;
    pub const ACTION_HOVER_MOVE: i32 = 7;
    pub const ACTION_SCROLL: i32 = 8;
}

//=== TouchAction =========================================================

/// Classified motion action.
///
/// `PointerDown` and `PointerUp` carry the index of the pointer that
/// triggered the event. Plain `Down` and `Up` always refer to index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    Down,
    PointerDown { index: usize },
    Move,
    Up,
    PointerUp { index: usize },
    Cancel,

    /// Any action the adapter does not forward (hover, scroll, outside).
    Other(i32),
}

impl TouchAction {
    /// Decodes a raw action word.
    pub fn from_raw(raw: i32) -> Self {
        let masked = raw & action::ACTION_MASK;
        let index = ((raw & action::ACTION_POINTER_INDEX_MASK)
            >> action::ACTION_POINTER_INDEX_SHIFT) as usize;
        Self::classify(masked, index)
    }

    /// Classifies a masked action; `index` is only kept for pointer
    /// down/up.
    pub fn classify(masked: i32, index: usize) -> Self {
        match masked {
            action::ACTION_DOWN => Self::Down,
            action::ACTION_POINTER_DOWN => Self::PointerDown { index },
            action::ACTION_MOVE => Self::Move,
            action::ACTION_UP => Self::Up,
            action::ACTION_POINTER_UP => Self::PointerUp { index },
            action::ACTION_CANCEL => Self::Cancel,
            other => Self::Other(other),
        }
    }

    /// Masked action code, without the index.
    pub fn masked(self) -> i32 {
        match self {
            Self::Down => action::ACTION_DOWN,
            Self::PointerDown { .. } => action::ACTION_POINTER_DOWN,
            Self::Move => action::ACTION_MOVE,
            Self::Up => action::ACTION_UP,
            Self::PointerUp { .. } => action::ACTION_POINTER_UP,
            Self::Cancel => action::ACTION_CANCEL,
            Self::Other(code) => code & action::ACTION_MASK,
        }
    }

    /// Encodes back into an action word.
    ///
    /// `None` if the action index does not fit the 8-bit index field.
    pub fn to_raw(self) -> Option<i32> {
        let index = self.action_index();
        if index > action::MAX_ENCODED_INDEX {
            return None;
        }
        Some(self.masked() | ((index as i32) << action::ACTION_POINTER_INDEX_SHIFT))
    }

    /// Index of the pointer that triggered the event.
    pub fn action_index(self) -> usize {
        match self {
            Self::PointerDown { index } | Self::PointerUp { index } => index,
            _ => 0,
        }
    }
}

//=== PointerSource =======================================================

/// Read access to a host motion event.
///
/// Implemented by [`MotionEvent`]; host integrations implement it for
/// their native event type to avoid an intermediate copy.
pub trait PointerSource {
    fn pointer_count(&self) -> usize;
    fn pointer_id(&self, index: usize) -> i32;
    fn x(&self, index: usize) -> f32;
    fn y(&self, index: usize) -> f32;

    /// Raw action word (masked action and action index).
    fn action(&self) -> i32;

    fn action_masked(&self) -> i32 {
        self.action() & action::ACTION_MASK
    }

    fn action_index(&self) -> usize {
        ((self.action() & action::ACTION_POINTER_INDEX_MASK)
            >> action::ACTION_POINTER_INDEX_SHIFT) as usize
    }
}

//=== MotionEvent =========================================================

/// One pointer as reported by the host, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl RawPointer {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Owned motion event.
///
/// The action index is stored apart from the masked action, so events
/// built from a [`TouchAction`] are not limited to the 8-bit index field.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    masked: i32,
    index: usize,
    pointers: Vec<RawPointer>,
}

impl MotionEvent {
    /// Builds an event from a raw action word.
    pub fn from_raw(action: i32, pointers: Vec<RawPointer>) -> Self {
        Self {
            masked: action & action::ACTION_MASK,
            index: ((action & action::ACTION_POINTER_INDEX_MASK)
                >> action::ACTION_POINTER_INDEX_SHIFT) as usize,
            pointers,
        }
    }

    /// Builds an event from a classified action.
    pub fn new(action: TouchAction, pointers: Vec<RawPointer>) -> Self {
        Self {
            masked: action.masked(),
            index: action.action_index(),
            pointers,
        }
    }

    pub fn touch_action(&self) -> TouchAction {
        TouchAction::classify(self.masked, self.index)
    }

    pub fn pointers(&self) -> &[RawPointer] {
        &self.pointers
    }
}

impl PointerSource for MotionEvent {
    fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    fn pointer_id(&self, index: usize) -> i32 {
        self.pointers[index].id
    }

    fn x(&self, index: usize) -> f32 {
        self.pointers[index].x
    }

    fn y(&self, index: usize) -> f32 {
        self.pointers[index].y
    }

    /// Indices past the 8-bit field are clamped here; read them through
    /// [`action_index`](PointerSource::action_index).
    fn action(&self) -> i32 {
        let index = self.index.min(action::MAX_ENCODED_INDEX) as i32;
        self.masked | (index << action::ACTION_POINTER_INDEX_SHIFT)
    }

    fn action_masked(&self) -> i32 {
        self.masked
    }

    fn action_index(&self) -> usize {
        self.index
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
