//! Subject ranking.
//!
//! Orders subjects for the allocator: higher priority weight first, ties
//! broken by ascending progress so subjects further from completion are
//! scheduled earlier. The ordering determines both sequence and time-share
//! bias downstream.

use std::cmp::Ordering;

use crate::subject::Subject;

/// Rank subjects by descending priority weight, then ascending progress.
///
/// A total, pure ordering function: the result is a permutation of the
/// input (duplicates preserved, nothing dropped), the input is not mutated,
/// and subjects that compare equal keep their original relative order.
pub fn rank(subjects: &[Subject]) -> Vec<Subject> {
    let mut ranked = subjects.to_vec();
    // sort_by is stable, which is what keeps equal subjects in input order
    ranked.sort_by(|a, b| {
        match b.priority.weight().cmp(&a.priority.weight()) {
            Ordering::Equal => a.progress.cmp(&b.progress),
            other => other,
        }
    });
    ranked
}
