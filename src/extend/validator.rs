//! Optional self-check: asserts every cluster match is a true character
//! equality and is contained within some emitted alignment, and that every
//! alignment's endpoints are in-bounds and self-matching.
//!
//! Enabled via `--validate`; failures here are the "fatal programming
//! error" class from the error handling design, since a broken invariant at
//! this point means the merge driver produced inconsistent output.

use crate::extend::model::{Alignment, Cluster, SequenceRecord, Strand};
use crate::extend::scoring::{ScoringContext, normalize_for_lookup};

/// Runs every assertion in the original's `validateData`. On the first
/// violation, prints a diagnostic to stderr and terminates the process —
/// this is diagnosable-but-fatal, not a recoverable `Result`.
pub fn validate(clusters: &[Cluster], alignments: &[Alignment], a: &SequenceRecord, b: &SequenceRecord, scoring: &ScoringContext) {
    let mut b_rev: Option<SequenceRecord> = None;

    for cluster in clusters {
        fatal_unless(cluster.was_fused, "cluster was never fused into an alignment");

        let b_for_cluster = match cluster.dir_b {
            Strand::Forward => b,
            Strand::Reverse => b_rev.get_or_insert_with(|| b.reverse_complement()),
        };

        for m in &cluster.matches {
            for i in 0..m.len {
                fatal_unless(a.at(m.s_a + i) == b_for_cluster.at(m.s_b + i), "cluster match is not a true character equality");
            }

            let contained = alignments
                .iter()
                .any(|aln| aln.s_a <= m.s_a && aln.s_b <= m.s_b && aln.e_a >= m.s_a + m.len - 1 && aln.e_b >= m.s_b + m.len - 1);
            fatal_unless(contained, "cluster match is not contained in any emitted alignment");
        }
    }

    for aln in alignments {
        let b_for_aln = match aln.dir_b {
            Strand::Forward => b,
            Strand::Reverse => b_rev.get_or_insert_with(|| b.reverse_complement()),
        };

        fatal_unless(aln.s_a <= aln.e_a, "alignment sA > eA");
        fatal_unless(aln.s_b <= aln.e_b, "alignment sB > eB");
        fatal_unless(aln.s_a >= 1 && aln.e_a <= a.len(), "alignment A coordinates out of bounds");
        fatal_unless(aln.s_b >= 1 && aln.e_b <= b_for_aln.len(), "alignment B coordinates out of bounds");

        fatal_unless(boundary_scores_non_negative(a.at(aln.s_a), b_for_aln.at(aln.s_b), scoring), "alignment start boundary is not optimal");
        fatal_unless(boundary_scores_non_negative(a.at(aln.e_a), b_for_aln.at(aln.e_b), scoring), "alignment end boundary is not optimal");
    }
}

fn boundary_scores_non_negative(a_raw: u8, b_raw: u8, scoring: &ScoringContext) -> bool {
    scoring.score(normalize_for_lookup(a_raw), normalize_for_lookup(b_raw)) >= 0
}

fn fatal_unless(condition: bool, message: &str) {
    if !condition {
        eprintln!("ERROR: validation assertion failed: {message}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::model::Match;

    #[test]
    fn valid_fused_cluster_and_alignment_pass() {
        let a = SequenceRecord::new("a".into(), b"acgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgt");
        let scoring = ScoringContext::dna_default();

        let mut cluster = Cluster::new(vec![Match { s_a: 1, s_b: 1, len: 8 }], Strand::Forward);
        cluster.was_fused = true;
        let alignment = Alignment::seed(&Match { s_a: 1, s_b: 1, len: 8 }, Strand::Forward);

        validate(&[cluster], &[alignment], &a, &b, &scoring);
    }

    #[test]
    fn boundary_check_accepts_identical_bases() {
        let scoring = ScoringContext::dna_default();
        assert!(boundary_scores_non_negative(b'a', b'a', &scoring));
    }
}
