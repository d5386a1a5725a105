//! Shadow test: whether a cluster is already covered by an earlier
//! alignment on the same strand and can be dropped without further work.

use crate::extend::model::{Alignment, Cluster};

/// Returns `true` if some alignment in `alignments` fully contains `cluster`'s
/// span in both A and B coordinates on the same strand. Scans backwards from
/// the end, matching the original's search order (most recent alignments are
/// the most likely shadow candidates).
pub fn is_shadowed(cluster: &Cluster, alignments: &[Alignment]) -> bool {
    let first = cluster.first();
    let last = cluster.last();
    let s_a = first.s_a;
    let e_a = last.s_a + last.len - 1;
    let s_b = first.s_b;
    let e_b = last.s_b + last.len - 1;

    alignments
        .iter()
        .rev()
        .any(|a| a.dir_b == cluster.dir_b && a.e_a >= e_a && a.e_b >= e_b && a.s_a <= s_a && a.s_b <= s_b)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::model::{Match, Strand};

    #[test]
    fn cluster_fully_inside_alignment_is_shadowed() {
        let alignment = Alignment::seed(&Match { s_a: 1, s_b: 1, len: 100 }, Strand::Forward);
        let cluster = Cluster::new(vec![Match { s_a: 10, s_b: 10, len: 5 }], Strand::Forward);
        assert!(is_shadowed(&cluster, &[alignment]));
    }

    #[test]
    fn cluster_extending_past_alignment_is_not_shadowed() {
        let alignment = Alignment::seed(&Match { s_a: 1, s_b: 1, len: 20 }, Strand::Forward);
        let cluster = Cluster::new(vec![Match { s_a: 10, s_b: 10, len: 50 }], Strand::Forward);
        assert!(!is_shadowed(&cluster, &[alignment]));
    }

    #[test]
    fn opposite_strand_never_shadows() {
        let alignment = Alignment::seed(&Match { s_a: 1, s_b: 1, len: 100 }, Strand::Reverse);
        let cluster = Cluster::new(vec![Match { s_a: 10, s_b: 10, len: 5 }], Strand::Forward);
        assert!(!is_shadowed(&cluster, &[alignment]));
    }

    #[test]
    fn no_alignments_never_shadows() {
        let cluster = Cluster::new(vec![Match { s_a: 10, s_b: 10, len: 5 }], Strand::Forward);
        assert!(!is_shadowed(&cluster, &[]));
    }
}
