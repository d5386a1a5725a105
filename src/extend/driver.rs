//! Merge driver: the top-level loop that walks one synteny's sorted
//! clusters and produces the final list of alignments for that (A, B) pair.
//!
//! Follows the index-as-cursor pattern from the design notes: alignments
//! live in a single growing `Vec`, and every reference to "the current
//! alignment" or "the merge target" is a vector index, not a held iterator,
//! since `extend_backward` may shrink the vector out from under a stale
//! reference.

use crate::extend::extender::{SequenceExtender, extend_backward, extend_forward};
use crate::extend::model::{Alignment, ExtendFlags, SequenceRecord, Strand, Synteny};
use crate::extend::scoring::ScoringContext;
use crate::extend::shadow::is_shadowed;
use crate::extend::target::{forward_target, reverse_target};

/// Consumes `synteny`'s clusters (marking each `was_fused` as it goes) and
/// returns the alignments built against `a`/`b`, sorted ascending by `sA`.
///
/// Reverse-strand clusters are extended against a lazily-built
/// reverse-complement of `b`, built at most once per call and shared by
/// every reverse-strand cluster in this synteny.
pub fn merge_synteny(
    synteny: &mut Synteny, a: &SequenceRecord, b: &SequenceRecord, extender: &impl SequenceExtender, scoring: &ScoringContext,
) -> Vec<Alignment> {
    let mut alignments: Vec<Alignment> = Vec::new();
    let mut b_rev: Option<SequenceRecord> = None;

    for c_idx in 0..synteny.clusters.len() {
        if is_shadowed(&synteny.clusters[c_idx], &alignments) {
            synteny.clusters[c_idx].was_fused = true;
            continue;
        }

        let dir_b = synteny.clusters[c_idx].dir_b;
        let b_buf: &SequenceRecord = match dir_b {
            Strand::Forward => b,
            Strand::Reverse => b_rev.get_or_insert_with(|| b.reverse_complement()),
        };

        let seed_match = *synteny.clusters[c_idx].first();
        alignments.push(Alignment::seed(&seed_match, dir_b));
        let seed_idx = alignments.len() - 1;

        let target_idx = reverse_target(&alignments, seed_idx, scoring);
        let merged = extend_backward(extender, &mut alignments, seed_idx, target_idx, a, b_buf, scoring);

        // `extend_backward` only ever removes the just-pushed seed (always
        // the last element), so `target_idx` — always strictly less than
        // `seed_idx` — stays valid after the removal.
        let curr_idx = if merged { target_idx.expect("a merge implies a target was supplied") } else { seed_idx };

        for m in &synteny.clusters[c_idx].matches[1..] {
            extend_forward(extender, &mut alignments[curr_idx], a, m.e_a(), b_buf, m.e_b(), ExtendFlags::FORWARD_SEARCH, scoring);
        }

        let default_target = (a.len(), b_buf.len());
        let (fwd_idx, target_a, target_b) = forward_target(&synteny.clusters, c_idx, default_target, scoring);

        let mut flags = ExtendFlags::FORWARD_SEARCH;
        if fwd_idx.is_none() && scoring.to_seqend {
            flags |= ExtendFlags::SEQEND_BIT;
        }
        extend_forward(extender, &mut alignments[curr_idx], a, target_a, b_buf, target_b, flags, scoring);

        synteny.clusters[c_idx].was_fused = true;
    }

    alignments.sort_by_key(|aln| aln.s_a);
    alignments
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::extender::GlobalDpExtender;
    use crate::extend::model::{Cluster, Match};

    fn scoring() -> ScoringContext {
        ScoringContext::dna_default().with_break_len(10).with_to_seqend(true)
    }

    #[test]
    fn exact_identity_single_cluster_yields_one_alignment() {
        let a = SequenceRecord::new("a".into(), b"acgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgt");
        let scoring = scoring();
        let extender = GlobalDpExtender::new(&scoring, -5, -2);

        let mut synteny = Synteny { clusters: vec![Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 8 }], Strand::Forward)] };
        let alignments = merge_synteny(&mut synteny, &a, &b, &extender, &scoring);

        assert_eq!(alignments.len(), 1);
        assert_eq!((alignments[0].s_a, alignments[0].e_a), (1, 8));
        assert_eq!((alignments[0].s_b, alignments[0].e_b), (1, 8));
        assert!(synteny.clusters[0].was_fused);
    }

    #[test]
    fn two_adjacent_clusters_merge_into_one_alignment() {
        let a = SequenceRecord::new("a".into(), b"acgtacgtacgtacgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgtacgtacgtacgt");
        let scoring = scoring();
        let extender = GlobalDpExtender::new(&scoring, -5, -2);

        let mut synteny = Synteny {
            clusters: vec![
                Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 4 }], Strand::Forward),
                Cluster::new(vec![Match { s_a: 11, s_b: 11, len: 4 }], Strand::Forward),
            ],
        };
        let alignments = merge_synteny(&mut synteny, &a, &b, &extender, &scoring);

        assert_eq!(alignments.len(), 1);
        assert!(synteny.clusters.iter().all(|c| c.was_fused));
    }

    #[test]
    fn shadowed_cluster_produces_no_new_alignment_but_is_fused() {
        let a = SequenceRecord::new("a".into(), b"acgtacgtacgtacgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgtacgtacgtacgt");
        let scoring = scoring();
        let extender = GlobalDpExtender::new(&scoring, -5, -2);

        let mut synteny = Synteny {
            clusters: vec![
                Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 20 }], Strand::Forward),
                Cluster::new(vec![Match { s_a: 5, s_b: 5, len: 3 }], Strand::Forward),
            ],
        };
        let alignments = merge_synteny(&mut synteny, &a, &b, &extender, &scoring);

        assert_eq!(alignments.len(), 1);
        assert!(synteny.clusters.iter().all(|c| c.was_fused));
    }

    #[test]
    fn alignments_are_emitted_sorted_by_sa() {
        let a = SequenceRecord::new("a".into(), b"acgtacgtacgtacgtacgtacgtacgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgtacgtacgtacgtacgtacgtacgt");
        // No to_seqend, tight break_len: keep the two clusters from merging so
        // the driver has two alignments to sort.
        let scoring = ScoringContext::dna_default().with_break_len(1).with_to_seqend(false);
        let extender = GlobalDpExtender::new(&scoring, -5, -2);

        let mut synteny = Synteny {
            clusters: vec![
                Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 4 }], Strand::Forward),
                Cluster::new(vec![Match { s_a: 25, s_b: 25, len: 4 }], Strand::Forward),
            ],
        };
        let alignments = merge_synteny(&mut synteny, &a, &b, &extender, &scoring);
        for pair in alignments.windows(2) {
            assert!(pair[0].s_a <= pair[1].s_a);
        }
    }
}
