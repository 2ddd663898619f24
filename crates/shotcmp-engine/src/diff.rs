//! Field-level comparison of reconciled segment pairs.

use crate::settings::CompareSettings;
use shotcmp_math::dist;
use shotcmp_model::{DiffInstance, FieldDelta, Gap, Overlap, Partition, Segment};

/// Compare one reconciled pair against the tolerances.
///
/// An absent side or a kind mismatch is a fundamental divergence and
/// is reported without any field comparison. Otherwise every field of
/// the shared kind is compared and every exceeded tolerance recorded;
/// `None` means the pair is equivalent. Tolerances are inclusive: a
/// delta equal to the tolerance passes.
pub fn diff_segment_pair(
    original: Option<(usize, &Segment)>,
    current: Option<(usize, &Segment)>,
    settings: &CompareSettings,
) -> Option<DiffInstance> {
    let instance = |deltas: Vec<FieldDelta>| DiffInstance {
        original: original.map(|(i, _)| i),
        current: current.map(|(i, _)| i),
        deltas,
    };

    let (lhs, rhs) = match (original, current) {
        (Some((_, l)), Some((_, r))) => (l, r),
        (l, r) => {
            return Some(instance(vec![FieldDelta::Kind {
                original: l.map(|(_, s)| s.kind()),
                current: r.map(|(_, s)| s.kind()),
            }]));
        }
    };

    if lhs.kind() != rhs.kind() {
        return Some(instance(vec![FieldDelta::Kind {
            original: Some(lhs.kind()),
            current: Some(rhs.kind()),
        }]));
    }

    let deltas = match (lhs, rhs) {
        (Segment::Partition(l), Segment::Partition(r)) => diff_partitions(l, r, settings),
        (Segment::Gap(l), Segment::Gap(r)) => diff_gaps(l, r, settings),
        (Segment::Overlap(l), Segment::Overlap(r)) => diff_overlaps(l, r, settings),
        // A miss carries no fields; two misses are always equal.
        (Segment::Miss, Segment::Miss) => Vec::new(),
        _ => unreachable!("kinds already matched"),
    };

    if deltas.is_empty() {
        None
    } else {
        Some(instance(deltas))
    }
}

fn diff_partitions(l: &Partition, r: &Partition, s: &CompareSettings) -> Vec<FieldDelta> {
    let mut deltas = Vec::new();

    let in_delta = dist(&l.in_point, &r.in_point);
    if in_delta > s.dist_tol {
        deltas.push(FieldDelta::InPoint { delta: in_delta });
    }
    let out_delta = dist(&l.out_point, &r.out_point);
    if out_delta > s.dist_tol {
        deltas.push(FieldDelta::OutPoint { delta: out_delta });
    }
    let los_delta = (l.los - r.los).abs();
    if los_delta > s.los_tol {
        deltas.push(FieldDelta::Los { delta: los_delta });
    }
    let scaled_delta = (l.scaled_los - r.scaled_los).abs();
    if scaled_delta > s.scaled_los_tol {
        deltas.push(FieldDelta::ScaledLos {
            delta: scaled_delta,
        });
    }
    let obliq_in_delta = (l.obliq_in - r.obliq_in).abs();
    if obliq_in_delta > s.obliq_tol {
        deltas.push(FieldDelta::ObliqIn {
            delta: obliq_in_delta,
        });
    }
    let obliq_out_delta = (l.obliq_out - r.obliq_out).abs();
    if obliq_out_delta > s.obliq_tol {
        deltas.push(FieldDelta::ObliqOut {
            delta: obliq_out_delta,
        });
    }
    if l.region_name != r.region_name {
        deltas.push(FieldDelta::RegionName {
            original: l.region_name.clone(),
            current: r.region_name.clone(),
        });
    }
    if l.path_name != r.path_name {
        deltas.push(FieldDelta::PathName {
            original: l.path_name.clone(),
            current: r.path_name.clone(),
        });
    }
    if l.region_id != r.region_id {
        deltas.push(FieldDelta::RegionId {
            original: l.region_id,
            current: r.region_id,
        });
    }

    deltas
}

fn diff_gaps(l: &Gap, r: &Gap, s: &CompareSettings) -> Vec<FieldDelta> {
    let mut deltas = Vec::new();

    let in_delta = dist(&l.in_point, &r.in_point);
    if in_delta > s.dist_tol {
        deltas.push(FieldDelta::InPoint { delta: in_delta });
    }
    let los_delta = (l.los - r.los).abs();
    if los_delta > s.los_tol {
        deltas.push(FieldDelta::Los { delta: los_delta });
    }

    deltas
}

fn diff_overlaps(l: &Overlap, r: &Overlap, s: &CompareSettings) -> Vec<FieldDelta> {
    let mut deltas = Vec::new();

    if l.region1 != r.region1 {
        deltas.push(FieldDelta::ClaimantName {
            slot: 1,
            original: l.region1.clone(),
            current: r.region1.clone(),
        });
    }
    if l.region2 != r.region2 {
        deltas.push(FieldDelta::ClaimantName {
            slot: 2,
            original: l.region2.clone(),
            current: r.region2.clone(),
        });
    }
    if l.id1 != r.id1 {
        deltas.push(FieldDelta::ClaimantId {
            slot: 1,
            original: l.id1,
            current: r.id1,
        });
    }
    if l.id2 != r.id2 {
        deltas.push(FieldDelta::ClaimantId {
            slot: 2,
            original: l.id2,
            current: r.id2,
        });
    }
    let in_delta = dist(&l.in_point, &r.in_point);
    if in_delta > s.dist_tol {
        deltas.push(FieldDelta::InPoint { delta: in_delta });
    }
    let out_delta = dist(&l.out_point, &r.out_point);
    if out_delta > s.dist_tol {
        deltas.push(FieldDelta::OutPoint { delta: out_delta });
    }
    let los_delta = (l.los - r.los).abs();
    if los_delta > s.los_tol {
        deltas.push(FieldDelta::Los { delta: los_delta });
    }

    deltas
}
