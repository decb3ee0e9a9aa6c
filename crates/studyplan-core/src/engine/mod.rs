//! Study-schedule allocation engine.
//!
//! Two stages composing sequentially:
//! - [`rank`] orders subjects by priority weight, tie-broken by ascending
//!   progress (less-complete subjects first)
//! - [`allocate`] partitions the daily study window into study and break
//!   slots over the ranked sequence
//!
//! The engine is a pure, synchronous, single-threaded computation: no I/O,
//! no shared mutable state, nothing persists between calls. Subjects and
//! preferences are supplied fresh on each invocation and the slot sequence
//! is recomputed from scratch.

mod allocator;
mod clock;
mod ranker;

pub use allocator::{
    allocate, build_plan, exceeds_preferred_end, Preferences, SlotKind, StudySlot, REST_LABEL,
};
pub use ranker::rank;

pub(crate) use clock::parse_hhmm;
