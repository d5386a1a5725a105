//! The pairwise-extension collaborator contract (`SequenceExtender`) and the
//! façade (`extend_backward`/`extend_forward`) that drives it, enforces
//! `MAX_ALIGNMENT_LENGTH`, and splices new delta suffixes onto an existing
//! alignment's delta vector.

use bio::alignment::AlignmentOperation;
use bio::alignment::pairwise::Aligner;

use crate::extend::geometry::delta_a_pos_sum;
use crate::extend::model::{Alignment, ExtendFlags, SequenceRecord};
use crate::extend::scoring::ScoringContext;

/// Abstract pairwise-extension kernel, mirroring the original's bare
/// `alignSearch`/`alignTarget` primitives as a first-class trait so the
/// default DP kernel can be swapped for a tuned one without touching the
/// merge/extend/re-score logic above it.
pub trait SequenceExtender {
    /// Attempts to find a high-scoring path from `(xlo, ylo)` towards
    /// `(xhi, yhi)`; may shrink the target endpoints to the actual best
    /// anchor it discovered (mutating `xlo`/`ylo` in place; `xhi`/`yhi` are
    /// the caller's fixed ceiling). Returns whether the target was reached.
    fn align_search(
        &self, a: &SequenceRecord, xlo: &mut i64, xhi: i64, b: &SequenceRecord, ylo: &mut i64, yhi: i64,
        flags: ExtendFlags,
    ) -> bool;

    /// Produces a delta suffix covering `[xlo, xhi]` on A and `[ylo, yhi]` on
    /// B (or as close to `(xhi, yhi)` as the kernel could get), appending
    /// entries to `delta`. Returns whether the target was actually reached.
    fn align_target(
        &self, a: &SequenceRecord, xlo: i64, xhi: i64, b: &SequenceRecord, ylo: i64, yhi: i64, delta: &mut Vec<i64>,
        flags: ExtendFlags,
    ) -> bool;
}

/// Default, swappable extension kernel: an affine-gap global DP over
/// `bio::alignment::pairwise::Aligner`, scored through a [`ScoringContext`].
/// Intentionally the simplest correct thing, not a tuned production kernel
/// (see the non-goals on alignment-kernel design).
pub struct GlobalDpExtender<'s> {
    scoring: &'s ScoringContext,
    gap_open: i32,
    gap_extend: i32,
}

impl<'s> GlobalDpExtender<'s> {
    pub fn new(scoring: &'s ScoringContext, gap_open: i32, gap_extend: i32) -> Self {
        GlobalDpExtender { scoring, gap_open, gap_extend }
    }
}

impl SequenceExtender for GlobalDpExtender<'_> {
    fn align_search(
        &self, a: &SequenceRecord, _xlo: &mut i64, _xhi: i64, b: &SequenceRecord, _ylo: &mut i64, _yhi: i64,
        _flags: ExtendFlags,
    ) -> bool {
        // The DP kernel always finds a (possibly zero-length) global path
        // across whatever window it is given; there is no "shrink to the
        // best anchor" behaviour to perform, so the search primitive always
        // reports the target as reachable and lets the caller's own
        // overflow/no-target checks decide whether to actually use it.
        !a.is_empty() && !b.is_empty()
    }

    fn align_target(
        &self, a: &SequenceRecord, xlo: i64, xhi: i64, b: &SequenceRecord, ylo: i64, yhi: i64, delta: &mut Vec<i64>,
        _flags: ExtendFlags,
    ) -> bool {
        if xhi < xlo || yhi < ylo {
            return false;
        }

        let x: Vec<u8> = (xlo..=xhi).map(|i| a.at(i)).collect();
        let y: Vec<u8> = (ylo..=yhi).map(|i| b.at(i)).collect();

        let scoring = self.scoring;
        let score_fn = move |c1: u8, c2: u8| scoring.score(c1, c2);
        let mut aligner = Aligner::new(self.gap_open, self.gap_extend, score_fn);

        // Always a forced global alignment, regardless of SEQEND_BIT: this
        // crate's delta encoding has no way to represent a freely clipped
        // run of either sequence (every position in [xlo,xhi]x[ylo,yhi] must
        // show up as a match, substitution, or indel), so the kernel must
        // fully consume both x and y by construction. A semiglobal alignment
        // would let `bio` emit Xclip/Yclip ops for the window edges, which
        // would leave the produced delta short of (xhi, yhi) while the
        // caller still force-sets e_a/e_b to those targets. Other
        // `SequenceExtender` implementations are free to act on SEQEND_BIT;
        // this one doesn't need to.
        let alignment = aligner.global(&x, &y);

        append_delta_from_ops(delta, &alignment.operations);
        true
    }
}

/// Translates a `bio` alignment trace into the signed delta encoding:
/// `Ins` (A consumed, no B counterpart) is a positive/A-deletion entry;
/// `Del` (B consumed, no A counterpart) is a negative/A-insertion entry.
/// Runs of `Match`/`Subst` feed the `|k|-1` stride between indels.
fn append_delta_from_ops(delta: &mut Vec<i64>, ops: &[AlignmentOperation]) {
    let mut stride: i64 = 0;
    for op in ops {
        match op {
            AlignmentOperation::Match | AlignmentOperation::Subst => stride += 1,
            AlignmentOperation::Ins => {
                delta.push(stride + 1);
                stride = 0;
            }
            AlignmentOperation::Del => {
                delta.push(-(stride + 1));
                stride = 0;
            }
            AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {
                // Forced global alignment never clips either sequence; a clip
                // op here means a kernel stopped short of fully consuming
                // its window, which would desynchronize e_a/e_b from the
                // delta this function just built.
                eprintln!("ERROR: alignment kernel produced an unexpected clip operation");
                eprintln!("       Please file a bug report");
                std::process::exit(1);
            }
        }
    }
}

/// Extends `curr` (the alignment at index `curr_idx` in `alignments`) from
/// `(sA, sB)` toward `target`'s `(eA, eB)` (or `(1, 1)` if `target` is
/// `None`). If the target is reached, `curr` is fused into it and removed
/// from `alignments`; the caller must treat `target_idx` as the surviving
/// alignment's index afterwards. Returns `true` iff a merge happened.
#[allow(clippy::too_many_arguments)]
pub fn extend_backward(
    extender: &impl SequenceExtender, alignments: &mut Vec<Alignment>, curr_idx: usize, target_idx: Option<usize>,
    a: &SequenceRecord, b: &SequenceRecord, scoring: &ScoringContext,
) -> bool {
    let mut flags = ExtendFlags::BACKWARD_SEARCH;
    let (mut target_a, mut target_b) = match target_idx {
        Some(ti) => (alignments[ti].e_a, alignments[ti].e_b),
        None => {
            flags |= ExtendFlags::OPTIMAL_BIT;
            (1, 1)
        }
    };

    let mut overflow = false;
    let mut double_overflow = false;
    if alignments[curr_idx].s_a - target_a + 1 > scoring.max_alignment_length {
        target_a = alignments[curr_idx].s_a - scoring.max_alignment_length + 1;
        overflow = true;
        flags |= ExtendFlags::OPTIMAL_BIT;
    }
    if alignments[curr_idx].s_b - target_b + 1 > scoring.max_alignment_length {
        target_b = alignments[curr_idx].s_b - scoring.max_alignment_length + 1;
        double_overflow = overflow;
        overflow = true;
        flags |= ExtendFlags::OPTIMAL_BIT;
    }

    if scoring.to_seqend && !double_overflow {
        flags |= ExtendFlags::SEQEND_BIT;
    }

    let mut xlo = alignments[curr_idx].s_a;
    let mut ylo = alignments[curr_idx].s_b;
    let mut reached = extender.align_search(a, &mut xlo, target_a, b, &mut ylo, target_b, flags);

    if overflow || target_idx.is_none() {
        reached = false;
    }

    if reached {
        let target_idx = target_idx.expect("reached implies a target was supplied");
        let curr_s_a = alignments[curr_idx].s_a;
        let curr_s_b = alignments[curr_idx].s_b;
        let curr_e_a = alignments[curr_idx].e_a;
        let curr_e_b = alignments[curr_idx].e_b;

        extend_forward_into(extender, &mut alignments[target_idx], a, curr_s_a, b, curr_s_b, ExtendFlags::FORCED_FORWARD_ALIGN, scoring);

        alignments[target_idx].e_a = curr_e_a;
        alignments[target_idx].e_b = curr_e_b;
        alignments.remove(curr_idx);
        true
    } else {
        let mut suffix = Vec::new();
        extender.align_target(a, target_a, alignments[curr_idx].s_a, b, target_b, alignments[curr_idx].s_b, &mut suffix, ExtendFlags::FORCED_FORWARD_ALIGN);
        let curr = &mut alignments[curr_idx];
        suffix.append(&mut curr.delta);
        curr.delta = suffix;
        curr.s_a = target_a;
        curr.s_b = target_b;
        curr.recompute_delta_a_pos();
        false
    }
}

/// Extends `curr` forward from `curr.eA, curr.eB` toward `(target_a,
/// target_b)`, clamping to `MAX_ALIGNMENT_LENGTH` and splicing the new delta
/// suffix onto `curr.delta` with the correct offset. Returns whether the
/// (possibly clamped) target was reached without overflow.
pub fn extend_forward(
    extender: &impl SequenceExtender, curr: &mut Alignment, a: &SequenceRecord, target_a: i64, b: &SequenceRecord,
    target_b: i64, flags: ExtendFlags, scoring: &ScoringContext,
) -> bool {
    extend_forward_into(extender, curr, a, target_a, b, target_b, flags, scoring)
}

fn extend_forward_into(
    extender: &impl SequenceExtender, curr: &mut Alignment, a: &SequenceRecord, mut target_a: i64, b: &SequenceRecord,
    mut target_b: i64, mut flags: ExtendFlags, scoring: &ScoringContext,
) -> bool {
    let di = curr.delta.len();

    let val_a = target_a - curr.e_a + 1;
    let val_b = target_b - curr.e_b + 1;

    let mut overflow = false;
    let mut double_overflow = false;
    if val_a > scoring.max_alignment_length {
        target_a = curr.e_a + scoring.max_alignment_length - 1;
        overflow = true;
        flags |= ExtendFlags::OPTIMAL_BIT;
    }
    if val_b > scoring.max_alignment_length {
        target_b = curr.e_b + scoring.max_alignment_length - 1;
        double_overflow = overflow;
        overflow = true;
        flags |= ExtendFlags::OPTIMAL_BIT;
    }
    if double_overflow {
        flags.remove(ExtendFlags::SEQEND_BIT);
    }

    let mut reached = extender.align_target(a, curr.e_a, target_a, b, curr.e_b, target_b, &mut curr.delta, flags);

    if reached && overflow {
        reached = false;
    }

    if di < curr.delta.len() {
        let val_a = (curr.e_a - curr.s_a + 1) - curr.delta_a_pos - 1;
        curr.delta[di] += if curr.delta[di] > 0 { val_a } else { -val_a };
        if curr.delta[di] == 0 || val_a < 0 {
            eprintln!("ERROR: failed to merge alignments at position {}", curr.e_a);
            eprintln!("       Please file a bug report");
            std::process::exit(1);
        }
        curr.delta_a_pos += delta_a_pos_sum(&curr.delta[di..]);
    }

    curr.e_a = target_a;
    curr.e_b = target_b;

    reached
}
