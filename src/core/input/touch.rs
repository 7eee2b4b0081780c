//=========================================================================
// Touch Sample
//
// Per-callback snapshot of all pointers of a motion event, in the
// parallel-array layout the bridge consumes (ids, xs, ys).
//
// A sample is built fresh for every touch callback and sized exactly to
// the reported pointer count. Events reporting more pointers than the
// configured maximum are rejected instead of truncated.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::motion::PointerSource;

//=== TouchError ==========================================================

/// Reasons a motion event cannot be forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchError {
    /// The event reports more simultaneous pointers than allowed.
    TooManyPointers { count: usize, max: usize },

    /// The event's action index does not name one of its pointers.
    ActionIndexOutOfRange { index: usize, count: usize },
}

impl std::fmt::Display for TouchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyPointers { count, max } => {
                write!(f, "Motion event reports {} pointers (max {})", count, max)
            }
            Self::ActionIndexOutOfRange { index, count } => {
                write!(f, "Action index {} out of range for {} pointers", index, count)
            }
        }
    }
}

impl std::error::Error for TouchError {}

//=== TouchPoint ==========================================================

/// One pointer of a [`TouchSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

//=== TouchSample =========================================================

/// Pointer ids and integer positions of one motion event.
///
/// Index `i` of `ids`, `xs` and `ys` describes the same pointer. The
/// three sequences always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchSample {
    ids: Vec<i32>,
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl TouchSample {
    //--- Construction -----------------------------------------------------

    /// Copies every pointer of `event`, truncating coordinates toward zero.
    ///
    /// # Errors
    ///
    /// [`TouchError::TooManyPointers`] if the event has more than
    /// `max_pointers` pointers.
    pub fn capture<P>(event: &P, max_pointers: usize) -> Result<Self, TouchError>
    where
        P: PointerSource + ?Sized,
    {
        let count = event.pointer_count();
        if count > max_pointers {
            return Err(TouchError::TooManyPointers {
                count,
                max: max_pointers,
            });
        }

        let mut sample = Self::with_capacity(count);
        for i in 0..count {
            sample.push(event.pointer_id(i), event.x(i) as i32, event.y(i) as i32);
        }
        Ok(sample)
    }

    /// Builds a sample from `(id, x, y)` triples.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32, i32)>,
    {
        let mut sample = Self::default();
        for (id, x, y) in points {
            sample.push(id, x, y);
        }
        sample
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, id: i32, x: i32, y: i32) {
        self.ids.push(id);
        self.xs.push(x);
        self.ys.push(y);
    }

    //--- Queries ----------------------------------------------------------

    /// Number of pointers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    pub fn get(&self, index: usize) -> Option<TouchPoint> {
        Some(TouchPoint {
            id: *self.ids.get(index)?,
            x: self.xs[index],
            y: self.ys[index],
        })
    }

    /// Id of the pointer at `index`.
    ///
    /// # Errors
    ///
    /// [`TouchError::ActionIndexOutOfRange`] if there is no such pointer.
    pub fn id_at(&self, index: usize) -> Result<i32, TouchError> {
        self.ids
            .get(index)
            .copied()
            .ok_or(TouchError::ActionIndexOutOfRange {
                index,
                count: self.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = TouchPoint> + '_ {
        self.ids
            .iter()
            .zip(&self.xs)
            .zip(&self.ys)
            .map(|((&id, &x), &y)| TouchPoint { id, x, y })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::motion::{MotionEvent, RawPointer, TouchAction};

    fn event(pointers: Vec<RawPointer>) -> MotionEvent {
        MotionEvent::new(TouchAction::Move, pointers)
    }

    #[test]
    fn capture_copies_every_pointer() {
        let e = event(vec![
            RawPointer::new(5, 11.0, 21.0),
            RawPointer::new(7, 30.0, 40.0),
        ]);

        let sample = TouchSample::capture(&e, 256).unwrap();

        assert_eq!(sample.len(), 2);
        assert_eq!(sample.ids(), &[5, 7]);
        assert_eq!(sample.xs(), &[11, 30]);
        assert_eq!(sample.ys(), &[21, 40]);
    }

    #[test]
    fn capture_truncates_toward_zero() {
        let e = event(vec![
            RawPointer::new(0, 10.9, 20.5),
            RawPointer::new(1, -0.7, 3.999),
        ]);

        let sample = TouchSample::capture(&e, 256).unwrap();

        assert_eq!(sample.xs(), &[10, 0]);
        assert_eq!(sample.ys(), &[20, 3]);
    }

    #[test]
    fn capture_sizes_exactly_to_pointer_count() {
        let big = event((0..10).map(|i| RawPointer::new(i, 0.0, 0.0)).collect());
        let small = event(vec![RawPointer::new(42, 1.0, 1.0)]);

        let _ = TouchSample::capture(&big, 256).unwrap();
        let sample = TouchSample::capture(&small, 256).unwrap();

        assert_eq!(sample.len(), 1, "No stale pointers from a previous event");
        assert_eq!(sample.ids(), &[42]);
    }

    #[test]
    fn capture_empty_event() {
        let sample = TouchSample::capture(&event(vec![]), 256).unwrap();
        assert!(sample.is_empty());
    }

    #[test]
    fn capture_rejects_overflow() {
        let e = event((0..4).map(|i| RawPointer::new(i, 0.0, 0.0)).collect());

        let err = TouchSample::capture(&e, 3).unwrap_err();

        assert_eq!(err, TouchError::TooManyPointers { count: 4, max: 3 });
    }

    #[test]
    fn capture_accepts_exactly_max() {
        let e = event((0..3).map(|i| RawPointer::new(i, 0.0, 0.0)).collect());
        assert!(TouchSample::capture(&e, 3).is_ok());
    }

    #[test]
    fn id_at_reports_out_of_range() {
        let sample = TouchSample::from_points([(9, 1, 2)]);

        assert_eq!(sample.id_at(0), Ok(9));
        assert_eq!(
            sample.id_at(1),
            Err(TouchError::ActionIndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn iter_and_get_agree() {
        let sample = TouchSample::from_points([(1, 10, 20), (2, 30, 40)]);

        let points: Vec<_> = sample.iter().collect();

        assert_eq!(points.len(), 2);
        assert_eq!(Some(points[1]), sample.get(1));
        assert_eq!(sample.get(2), None);
    }

    #[test]
    fn error_display() {
        let err = TouchError::TooManyPointers { count: 300, max: 256 };
        assert_eq!(err.to_string(), "Motion event reports 300 pointers (max 256)");
    }
}
