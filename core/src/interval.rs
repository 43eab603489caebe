//! Depth interval primitives.
//!
//! Everything that compares intervals goes through [`same_depth`], [`overlaps`] and
//! [`compare_by_start`], both in the merger and when validating edits.

use std::cmp::Ordering;

use crate::error::SoilError;
use crate::models::{
    AggregatedInterval, DepthDependentSoilData, DepthInterval, ProjectDepthInterval,
    SoilDataDepthInterval,
};

/// Anything scoped to a depth range.
pub trait HasDepthInterval {
    fn depth_interval(&self) -> DepthInterval;
}

impl HasDepthInterval for DepthInterval {
    fn depth_interval(&self) -> DepthInterval {
        *self
    }
}

impl HasDepthInterval for ProjectDepthInterval {
    fn depth_interval(&self) -> DepthInterval {
        self.depth_interval
    }
}

impl HasDepthInterval for SoilDataDepthInterval {
    fn depth_interval(&self) -> DepthInterval {
        self.depth_interval
    }
}

impl HasDepthInterval for DepthDependentSoilData {
    fn depth_interval(&self) -> DepthInterval {
        self.depth_interval
    }
}

impl HasDepthInterval for AggregatedInterval {
    fn depth_interval(&self) -> DepthInterval {
        self.interval.depth_interval
    }
}

impl<T: HasDepthInterval + ?Sized> HasDepthInterval for &T {
    fn depth_interval(&self) -> DepthInterval {
        (**self).depth_interval()
    }
}

impl DepthInterval {
    /// Build an interval, rejecting negative depths and empty or inverted ranges.
    pub fn new(start: i32, end: i32) -> Result<Self, SoilError> {
        let interval = DepthInterval { start, end };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> Result<(), SoilError> {
        let reason = if self.start < 0 {
            "start must not be negative"
        } else if self.start >= self.end {
            "start must be less than end"
        } else {
            return Ok(());
        };
        Err(SoilError::InvalidInterval {
            start: self.start,
            end: self.end,
            reason: reason.to_string(),
        })
    }
}

/// True iff both bounds match exactly.
pub fn same_depth<A, B>(a: &A, b: &B) -> bool
where
    A: HasDepthInterval + ?Sized,
    B: HasDepthInterval + ?Sized,
{
    a.depth_interval() == b.depth_interval()
}

/// True iff the half-open ranges share at least one centimeter.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: HasDepthInterval + ?Sized,
    B: HasDepthInterval + ?Sized,
{
    let a = a.depth_interval();
    let b = b.depth_interval();
    a.start.max(b.start) < a.end.min(b.end)
}

/// Orders by ascending start depth only.
pub fn compare_by_start<A, B>(a: &A, b: &B) -> Ordering
where
    A: HasDepthInterval + ?Sized,
    B: HasDepthInterval + ?Sized,
{
    a.depth_interval().start.cmp(&b.depth_interval().start)
}

/// Reject `candidate` if it overlaps any of `existing`.
///
/// Entries with the same depth as `candidate` are skipped, so an interval can be
/// checked against a list that already contains it.
pub fn check_no_overlap<C, E>(candidate: &C, existing: &[E]) -> Result<(), SoilError>
where
    C: HasDepthInterval + ?Sized,
    E: HasDepthInterval,
{
    let interval = candidate.depth_interval();
    match existing
        .iter()
        .find(|e| !same_depth(*e, candidate) && overlaps(*e, candidate))
    {
        Some(conflict) => {
            let conflict = conflict.depth_interval();
            Err(SoilError::OverlappingInterval {
                start: interval.start,
                end: interval.end,
                existing_start: conflict.start,
                existing_end: conflict.end,
            })
        }
        None => Ok(()),
    }
}
