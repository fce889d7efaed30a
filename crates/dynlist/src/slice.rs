use std::iter::FusedIterator;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::ListError;

/// An unresolved `start:stop:step` triple. Any component may be absent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub const FULL: Self = Self {
        start: None,
        stop: None,
        step: None,
    };

    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    pub const fn range(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    pub const fn with_start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    pub const fn with_stop(mut self, stop: isize) -> Self {
        self.stop = Some(stop);
        self
    }

    pub const fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolves the slice against a sequence of `len` elements.
    ///
    /// Bounds never fail: they are shifted by `len` when negative and then
    /// clamped to the addressable range for the direction of travel. The only
    /// error is a zero step.
    pub fn indices(&self, len: usize) -> Result<SliceIndices, ListError> {
        let step = match self.step {
            None => 1,
            Some(0) => return Err(ListError::ZeroStep),
            Some(step) => step.max(-isize::MAX),
        };

        let n = isize::try_from(len).unwrap_or(isize::MAX);
        let (lower, upper) = if step < 0 { (-1, n - 1) } else { (0, n) };
        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + n).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = match self.start {
            Some(start) => clamp(start),
            None if step < 0 => upper,
            None => lower,
        };
        let stop = match self.stop {
            Some(stop) => clamp(stop),
            None if step < 0 => lower,
            None => upper,
        };

        let len = if step < 0 {
            if stop < start {
                ((start - stop - 1) / -step + 1) as usize
            } else {
                0
            }
        } else if start < stop {
            ((stop - start - 1) / step + 1) as usize
        } else {
            0
        };

        Ok(SliceIndices {
            start,
            stop,
            step,
            len,
        })
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Self::range(range.start, range.end)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::FULL.with_start(range.start)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Self::FULL.with_stop(range.end)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

/// A slice resolved against a concrete length.
///
/// `start` is the first position visited. For positive steps both bounds lie in
/// `[0, len]`, for negative steps in `[-1, len - 1]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SliceIndices {
    start: isize,
    stop: isize,
    step: isize,
    len: usize,
}

impl SliceIndices {
    pub fn start(&self) -> isize {
        self.start
    }

    pub fn stop(&self) -> isize {
        self.stop
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_contiguous(&self) -> bool {
        self.step == 1
    }

    /// The half-open span touched by a step-1 splice. Empty spans sit at `start`.
    pub(crate) fn span(&self) -> Range<usize> {
        debug_assert!(self.is_contiguous());
        let start = self.start as usize;
        let stop = self.stop.max(self.start) as usize;
        start..stop
    }

    pub fn positions(&self) -> Positions {
        Positions {
            next: self.start,
            step: self.step,
            remaining: self.len,
        }
    }
}

impl IntoIterator for SliceIndices {
    type Item = usize;
    type IntoIter = Positions;

    fn into_iter(self) -> Self::IntoIter {
        self.positions()
    }
}

#[derive(Clone, Debug)]
pub struct Positions {
    next: isize,
    step: isize,
    remaining: usize,
}

impl Iterator for Positions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let position = self.next as usize;
        self.remaining -= 1;
        self.next = self.next.wrapping_add(self.step);
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Positions {
    fn next_back(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let offset = self.step * self.remaining as isize;
        Some((self.next + offset) as usize)
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}
