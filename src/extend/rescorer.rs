//! Delta re-scorer: walks an alignment's delta vector to fill in `Errors`,
//! `SimErrors`, and `NonAlphas`.

use crate::extend::model::{Alignment, SequenceRecord, Strand};
use crate::extend::scoring::{ScoringContext, normalize_for_lookup};
use crate::extend::model::STOP_CHAR;

/// Re-scores every alignment in place. `dir_b == Reverse` alignments are
/// walked against `b`'s reverse complement, lazily materialized once per
/// call and shared across all reverse-strand alignments in the batch — the
/// original's "reuse a single per-pair buffer" design note.
pub fn rescore_all(alignments: &mut [Alignment], a: &SequenceRecord, b: &SequenceRecord, scoring: &ScoringContext) {
    let mut b_rev: Option<SequenceRecord> = None;
    for aln in alignments.iter_mut() {
        let b_for_aln = match aln.dir_b {
            Strand::Forward => b,
            Strand::Reverse => b_rev.get_or_insert_with(|| b.reverse_complement()),
        };
        rescore_one(aln, a, b_for_aln, scoring);
    }
}

fn rescore_one(aln: &mut Alignment, a: &SequenceRecord, b: &SequenceRecord, scoring: &ScoringContext) {
    let mut a_pos = aln.s_a;
    let mut b_pos = aln.s_b;

    let mut errors = 0i64;
    let mut sim_errors = 0i64;
    let mut non_alphas = 0i64;
    let mut remain = aln.e_a - aln.s_a + 1;

    let mut score_column = |a_pos: &mut i64, b_pos: &mut i64, errors: &mut i64, sim_errors: &mut i64, non_alphas: &mut i64| {
        let raw_a = a.at(*a_pos);
        let raw_b = b.at(*b_pos);
        *a_pos += 1;
        *b_pos += 1;

        if !raw_a.is_ascii_alphabetic() {
            *non_alphas += 1;
        }
        if !raw_b.is_ascii_alphabetic() {
            *non_alphas += 1;
        }

        let ch1 = normalize_for_lookup(raw_a);
        let ch2 = normalize_for_lookup(raw_b);
        if scoring.score(ch1, ch2) < 1 {
            *sim_errors += 1;
        }
        if ch1 != ch2 {
            *errors += 1;
        }
    };

    for &d in &aln.delta {
        let sign = d.signum();
        let magnitude = d.abs();

        for _ in 1..magnitude {
            score_column(&mut a_pos, &mut b_pos, &mut errors, &mut sim_errors, &mut non_alphas);
        }
        remain -= magnitude - 1;

        // The indel column itself always costs one error and one sim-error.
        errors += 1;
        sim_errors += 1;
        if sign > 0 {
            a_pos += 1;
            remain -= 1;
        } else {
            b_pos += 1;
        }
    }

    for _ in 0..remain {
        score_column(&mut a_pos, &mut b_pos, &mut errors, &mut sim_errors, &mut non_alphas);
    }

    let _ = STOP_CHAR; // referenced via normalize_for_lookup

    aln.errors = errors;
    aln.sim_errors = sim_errors;
    aln.non_alphas = non_alphas;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extend::model::Match;

    #[test]
    fn exact_identity_has_no_errors() {
        let a = SequenceRecord::new("a".into(), b"acgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtacgt");
        let scoring = ScoringContext::dna_default();
        let mut aln = Alignment::seed(&Match { s_a: 1, s_b: 1, len: 8 }, Strand::Forward);
        rescore_all(std::slice::from_mut(&mut aln), &a, &b, &scoring);
        assert_eq!((aln.errors, aln.sim_errors, aln.non_alphas), (0, 0, 0));
    }

    #[test]
    fn single_substitution_counts_one_error() {
        let a = SequenceRecord::new("a".into(), b"acgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtccgt");
        let scoring = ScoringContext::dna_default();
        let mut aln = Alignment { s_a: 1, e_a: 8, s_b: 1, e_b: 8, dir_b: Strand::Forward, delta: vec![], delta_a_pos: 0, errors: 0, sim_errors: 0, non_alphas: 0 };
        rescore_all(std::slice::from_mut(&mut aln), &a, &b, &scoring);
        assert_eq!(aln.errors, 1);
        assert_eq!(aln.sim_errors, 1);
        assert_eq!(aln.non_alphas, 0);
    }

    #[test]
    fn rescoring_twice_is_idempotent() {
        let a = SequenceRecord::new("a".into(), b"acgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtccgt");
        let scoring = ScoringContext::dna_default();
        let mut aln = Alignment { s_a: 1, e_a: 8, s_b: 1, e_b: 8, dir_b: Strand::Forward, delta: vec![], delta_a_pos: 0, errors: 0, sim_errors: 0, non_alphas: 0 };
        rescore_all(std::slice::from_mut(&mut aln), &a, &b, &scoring);
        let first = (aln.errors, aln.sim_errors, aln.non_alphas);
        rescore_all(std::slice::from_mut(&mut aln), &a, &b, &scoring);
        assert_eq!((aln.errors, aln.sim_errors, aln.non_alphas), first);
    }

    #[test]
    fn reverse_strand_rescoring_matches_eagerly_built_brev() {
        // A reverse-strand alignment's sB/eB already live in Brev-space (the
        // coordinate system the extender actually worked in); rescore_all's
        // lazily-built reverse-complement buffer must agree with a directly,
        // eagerly built one fed the same Brev-space coordinates.
        let a = SequenceRecord::new("a".into(), b"acgtacgtacgt");
        let b = SequenceRecord::new("b".into(), b"acgtccgtaaaa");
        let scoring = ScoringContext::dna_default();
        let b_rev = b.reverse_complement();

        let mut eager = Alignment { s_a: 3, e_a: 6, s_b: 7, e_b: 10, dir_b: Strand::Forward, delta: vec![], delta_a_pos: 0, errors: 0, sim_errors: 0, non_alphas: 0 };
        rescore_one(&mut eager, &a, &b_rev, &scoring);

        let mut lazy = Alignment { s_a: 3, e_a: 6, s_b: 7, e_b: 10, dir_b: Strand::Reverse, delta: vec![], delta_a_pos: 0, errors: 0, sim_errors: 0, non_alphas: 0 };
        rescore_all(std::slice::from_mut(&mut lazy), &a, &b, &scoring);

        assert_eq!((eager.errors, eager.sim_errors, eager.non_alphas), (lazy.errors, lazy.sim_errors, lazy.non_alphas));
    }
}
