//=========================================================================
// Touch Tracker
//=========================================================================
//
// Converts winit's per-finger touch events into Android-style
// multi-pointer motion events.
//
// Architecture:
//   Touch { id: u64, phase } → TouchTracker → MotionEvent (all pointers)
//
// winit reports one finger per event with an opaque 64-bit id. Android
// reports every active pointer with small reusable ids (lowest free id
// first) and tags the event with the index of the pointer that changed.
// The tracker keeps the active set ordered by pointer id so indices are
// stable between events.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::event::TouchPhase;

//=== Internal Dependencies ===============================================

use crate::core::input::{MotionEvent, RawPointer, TouchAction};

//=== Constants ===========================================================

/// Source id used for the emulated mouse pointer.
pub(crate) const MOUSE_SOURCE: u64 = u64::MAX;

//=== TouchTracker ========================================================

#[derive(Debug, Clone, Copy)]
struct ActivePointer {
    source: u64,
    pointer: RawPointer,
}

/// Active pointers, ordered by pointer id.
pub(crate) struct TouchTracker {
    active: Vec<ActivePointer>,
}

impl TouchTracker {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 10;

        Self {
            active: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts one winit touch into a motion event, if it produces one.
    pub(crate) fn process(
        &mut self,
        source: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
    ) -> Option<MotionEvent> {
        match phase {
            TouchPhase::Started => Some(self.started(source, x, y)),
            TouchPhase::Moved => self.moved(source, x, y),
            TouchPhase::Ended => self.ended(source, x, y),
            TouchPhase::Cancelled => self.cancelled(source),
        }
    }

    /// A finger went down. Reuses the lowest free pointer id.
    pub(crate) fn started(&mut self, source: u64, x: f32, y: f32) -> MotionEvent {
        if self.index_of(source).is_some() {
            trace!(target: "platform::input", "Duplicate touch start treated as move");
            return self.moved(source, x, y).unwrap_or_else(|| self.snapshot(TouchAction::Move));
        }

        let id = self.lowest_free_id();
        let index = self
            .active
            .iter()
            .position(|p| p.pointer.id > id)
            .unwrap_or(self.active.len());

        self.active.insert(
            index,
            ActivePointer {
                source,
                pointer: RawPointer::new(id, x, y),
            },
        );

        let action = if self.active.len() == 1 {
            TouchAction::Down
        } else {
            TouchAction::PointerDown { index }
        };
        self.snapshot(action)
    }

    pub(crate) fn moved(&mut self, source: u64, x: f32, y: f32) -> Option<MotionEvent> {
        let index = self.index_of(source)?;
        self.update(index, x, y);
        Some(self.snapshot(TouchAction::Move))
    }

    /// A finger went up. The event still lists the lifted pointer.
    pub(crate) fn ended(&mut self, source: u64, x: f32, y: f32) -> Option<MotionEvent> {
        let index = self.index_of(source)?;
        self.update(index, x, y);

        let action = if self.active.len() == 1 {
            TouchAction::Up
        } else {
            TouchAction::PointerUp { index }
        };
        let event = self.snapshot(action);

        self.active.remove(index);
        Some(event)
    }

    /// The system aborted the gesture: cancels every active pointer.
    ///
    /// Later cancels for the same gesture produce nothing.
    pub(crate) fn cancelled(&mut self, source: u64) -> Option<MotionEvent> {
        self.index_of(source)?;
        let event = self.snapshot(TouchAction::Cancel);
        self.active.clear();
        Some(event)
    }

    //--- Queries ----------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn is_tracking(&self, source: u64) -> bool {
        self.index_of(source).is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, source: u64) -> Option<usize> {
        self.active.iter().position(|p| p.source == source)
    }

    fn update(&mut self, index: usize, x: f32, y: f32) {
        let pointer = &mut self.active[index].pointer;
        pointer.x = x;
        pointer.y = y;
    }

    fn lowest_free_id(&self) -> i32 {
        // active is sorted by id, so the first gap is the lowest free id
        let mut id = 0;
        for p in &self.active {
            if p.pointer.id != id {
                break;
            }
            id += 1;
        }
        id
    }

    fn snapshot(&self, action: TouchAction) -> MotionEvent {
        MotionEvent::new(action, self.active.iter().map(|p| p.pointer).collect())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
