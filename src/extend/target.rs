//! Target selection: choosing the most promising neighbouring cluster or
//! alignment to extend towards, within a diagonal-distance budget.

use crate::extend::model::{Alignment, Cluster};
use crate::extend::scoring::ScoringContext;

/// Scans clusters strictly after `curr_idx` (same strand only) and returns
/// the index of the most promising forward neighbour, plus the target
/// coordinates to extend towards. `default_target` supplies the caller's
/// fallback `(targetA, targetB)` — typically the sequence ends — used both
/// as the returned value when nothing is found and as the initial distance
/// budget.
///
/// Preserves the "first good enough" heuristic deliberately: the scan breaks
/// at the first candidate whose gap is cheap enough rather than continuing
/// to search for the best one.
pub fn forward_target(
    clusters: &[Cluster], curr_idx: usize, default_target: (i64, i64), scoring: &ScoringContext,
) -> (Option<usize>, i64, i64) {
    let curr = &clusters[curr_idx];
    let last = curr.last();
    let s_a = last.s_a + last.len - 1;
    let s_b = last.s_b + last.len - 1;

    let (default_a, default_b) = default_target;
    let mut dist = (default_a - s_a).min(default_b - s_b);

    let mut best: Option<usize> = None;
    let mut target_a = default_a;
    let mut target_b = default_b;

    for (cand_idx, cand) in clusters.iter().enumerate().skip(curr_idx + 1) {
        if cand.dir_b != curr.dir_b {
            continue;
        }

        let mut e_a = cand.first().s_a;
        let mut e_b = cand.first().s_b;

        if (e_a < s_a || e_b < s_b) && cand.last().s_a >= s_a && cand.last().s_b >= s_b {
            for m in &cand.matches {
                e_a = m.s_a;
                e_b = m.s_b;
                if e_a >= s_a && e_b >= s_b {
                    break;
                }
            }
        }

        if e_a >= s_a && e_b >= s_b {
            let (greater, lesser) = if e_a - s_a > e_b - s_b { (e_a - s_a, e_b - s_b) } else { (e_b - s_b, e_a - s_a) };

            if greater < scoring.break_len || lesser * scoring.good_score + (greater - lesser) * scoring.cont_gap_score >= 0 {
                best = Some(cand_idx);
                target_a = e_a;
                target_b = e_b;
                break;
            } else if (greater << 1) - lesser < dist {
                best = Some(cand_idx);
                target_a = e_a;
                target_b = e_b;
                dist = (greater << 1) - lesser;
            }
        }
    }

    (best, target_a, target_b)
}

/// Mirror of [`forward_target`] over the already-produced alignment list:
/// scans strictly preceding alignments in reverse order, same strand,
/// requiring `eA <= sA_curr` and `eB <= sB_curr`. Returns `None` to mean
/// "extend towards position (1, 1)".
pub fn reverse_target(alignments: &[Alignment], curr_idx: usize, scoring: &ScoringContext) -> Option<usize> {
    let curr = &alignments[curr_idx];
    let s_a = curr.s_a;
    let s_b = curr.s_b;

    let mut dist = s_a.min(s_b);
    let mut best: Option<usize> = None;

    for cand_idx in (0..curr_idx).rev() {
        let cand = &alignments[cand_idx];
        if cand.dir_b != curr.dir_b {
            continue;
        }
        let e_a = cand.e_a;
        let e_b = cand.e_b;
        if e_a <= s_a && e_b <= s_b {
            let (greater, lesser) = if s_a - e_a > s_b - e_b { (s_a - e_a, s_b - e_b) } else { (s_b - e_b, s_a - e_a) };

            if greater < scoring.break_len || lesser * scoring.good_score + (greater - lesser) * scoring.cont_gap_score >= 0 {
                return Some(cand_idx);
            } else if (greater << 1) - lesser < dist {
                best = Some(cand_idx);
                dist = (greater << 1) - lesser;
            }
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::model::{Match, Strand};

    fn scoring() -> ScoringContext {
        ScoringContext::dna_default().with_break_len(50)
    }

    #[test]
    fn forward_target_finds_close_cluster_within_break_len() {
        let clusters = vec![
            Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 10 }], Strand::Forward),
            Cluster::new(vec![Match { s_a: 20, s_b: 20, len: 10 }], Strand::Forward),
        ];
        let (target, ta, tb) = forward_target(&clusters, 0, (1000, 1000), &scoring());
        assert_eq!(target, Some(1));
        assert_eq!((ta, tb), (20, 20));
    }

    #[test]
    fn forward_target_skips_opposite_strand() {
        let clusters = vec![
            Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 10 }], Strand::Forward),
            Cluster::new(vec![Match { s_a: 20, s_b: 20, len: 10 }], Strand::Reverse),
        ];
        let (target, ..) = forward_target(&clusters, 0, (1000, 1000), &scoring());
        assert_eq!(target, None);
    }

    #[test]
    fn reverse_target_scans_backwards() {
        let alignments = vec![
            Alignment::seed(&Match { s_a: 1, s_b: 1, len: 10 }, Strand::Forward),
            Alignment::seed(&Match { s_a: 100, s_b: 100, len: 10 }, Strand::Forward),
        ];
        let target = reverse_target(&alignments, 1, &scoring());
        assert_eq!(target, Some(0));
    }

    #[test]
    fn reverse_target_none_when_no_candidate() {
        let alignments = vec![Alignment::seed(&Match { s_a: 1, s_b: 1, len: 10 }, Strand::Forward)];
        let target = reverse_target(&alignments, 0, &scoring());
        assert_eq!(target, None);
    }
}
