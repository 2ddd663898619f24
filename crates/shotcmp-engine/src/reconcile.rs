//! Segment reconciliation: pairs up comparable segments from the two
//! sides using the transition stream as cut points.
//!
//! The transition distances partition the ray into slices. Each
//! segment belongs to the slice its entry distance falls in, with a
//! half-tolerance shift so an entry that ties an event boundary lands
//! in the slice that event opens. Within a slice the two sides are
//! zipped in order; a side with more segments in a slice pairs its
//! extras against nothing.

use crate::transition::Transition;
use shotcmp_model::{Ray, Segment};

/// One reconciled pair of segment indices. `None` marks a slice where
/// only the other side had a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledPair {
    /// Index into the recorded sequence.
    pub original: Option<usize>,
    /// Index into the regenerated sequence.
    pub current: Option<usize>,
}

/// Pair up the two sides' segments, slice by slice.
///
/// Every segment index on both sides appears in exactly one returned
/// pair. With no events at all the two sequences are zipped directly.
pub fn reconcile(
    ray: &Ray,
    original: &[Segment],
    current: &[Segment],
    events: &[Transition],
    dist_tol: f64,
) -> Vec<ReconciledPair> {
    let cuts: Vec<f64> = events.iter().map(|e| e.dist).collect();
    let lhs = slice_indices(ray, original, &cuts, dist_tol);
    let rhs = slice_indices(ray, current, &cuts, dist_tol);

    let mut pairs = Vec::new();
    for slice in 0..=cuts.len() {
        let l = &lhs[slice];
        let r = &rhs[slice];
        for k in 0..l.len().max(r.len()) {
            pairs.push(ReconciledPair {
                original: l.get(k).copied(),
                current: r.get(k).copied(),
            });
        }
    }
    pairs
}

/// Bin one side's segment indices into `cuts.len() + 1` slices.
///
/// Slice `s` holds segments whose entry distance is at least
/// `cuts[s-1] - dist_tol` and below `cuts[s] - dist_tol`; slice 0 is
/// everything before the first cut.
fn slice_indices(
    ray: &Ray,
    segments: &[Segment],
    cuts: &[f64],
    dist_tol: f64,
) -> Vec<Vec<usize>> {
    let mut slices = vec![Vec::new(); cuts.len() + 1];
    for (idx, seg) in segments.iter().enumerate() {
        let entry = seg.entry_dist(&ray.origin);
        let slice = cuts
            .iter()
            .take_while(|cut| entry >= *cut - dist_tol)
            .count();
        slices[slice].push(idx);
    }
    slices
}
